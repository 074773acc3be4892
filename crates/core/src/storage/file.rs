//! Key-value storage backed by a single JSON object on disk.
//!
//! Every write rewrites the whole file through a temporary sibling and a
//! rename, so a crash leaves either the old or the new contents.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::storage::{KeyValueStore, StorageError};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load()?;
        items.insert(key.to_owned(), value.to_owned());
        self.store(&items)?;

        debug!(path = %self.path.display(), key, "wrote storage item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.store(&items)?;
        }
        Ok(())
    }

    /// One rename for all pairs, so the file never holds half of them.
    fn set_items(&self, pairs: &[(&str, String)]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load()?;
        for (key, value) in pairs {
            items.insert((*key).to_owned(), value.clone());
        }
        self.store(&items)?;

        debug!(path = %self.path.display(), count = pairs.len(), "wrote storage items");
        Ok(())
    }
}
