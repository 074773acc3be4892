use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::storage::{KeyValueStore, StorageError};

/// Volatile store. Used by tests and by hosts that have no storage to offer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }

    fn set_items(&self, pairs: &[(&str, String)]) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in pairs {
            items.insert((*key).to_owned(), value.clone());
        }
        Ok(())
    }
}
