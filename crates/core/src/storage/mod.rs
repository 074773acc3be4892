//! Persistent key-value storage and the parked-location record stored in it.
//!
//! The record is two text entries, one per axis. Nothing else is stored.

use tracing::error;

use crate::{Error, position::Coordinates};

pub mod file;
pub mod memory;

pub const PARKED_LATITUDE_KEY: &str = "parkedLatitude";
pub const PARKED_LONGITUDE_KEY: &str = "parkedLongitude";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not a json object of strings: {0}")]
    Format(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

/// String-to-string storage that survives app restarts.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Writes every pair or none of them.
    ///
    /// The default writes one key at a time and, if a write fails, puts the
    /// keys it already touched back the way they were. Stores that can write
    /// several keys at once should override this.
    fn set_items(&self, items: &[(&str, String)]) -> Result<(), StorageError> {
        let mut previous = Vec::with_capacity(items.len());

        for (key, value) in items {
            let before = self.get_item(key)?;
            if let Err(e) = self.set_item(key, value) {
                roll_back(self, &previous);
                return Err(e);
            }
            previous.push((*key, before));
        }

        Ok(())
    }
}

fn roll_back<S: KeyValueStore + ?Sized>(store: &S, previous: &[(&str, Option<String>)]) {
    for (key, before) in previous.iter().rev() {
        let restored = match before {
            Some(value) => store.set_item(key, value),
            None => store.remove_item(key),
        };

        if let Err(e) = restored {
            error!(key, %e, "failed to roll back storage item");
        }
    }
}

/// Overwrites the parked location with `coordinates`.
pub fn write_parked_location(
    store: &dyn KeyValueStore,
    coordinates: Coordinates,
) -> Result<(), StorageError> {
    store.set_items(&[
        (PARKED_LATITUDE_KEY, coordinates.latitude.to_string()),
        (PARKED_LONGITUDE_KEY, coordinates.longitude.to_string()),
    ])
}

/// Reads the parked location back. `None` when nothing was ever saved.
pub fn read_parked_location(store: &dyn KeyValueStore) -> Result<Option<Coordinates>, Error> {
    let latitude = store.get_item(PARKED_LATITUDE_KEY)?;
    let longitude = store.get_item(PARKED_LONGITUDE_KEY)?;

    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(latitude), Some(longitude)) => Ok(Some(Coordinates::new(
            parse_axis(PARKED_LATITUDE_KEY, latitude)?,
            parse_axis(PARKED_LONGITUDE_KEY, longitude)?,
        ))),
        // half of a record is as unusable as a garbled one
        (None, Some(_)) => Err(corrupt(PARKED_LATITUDE_KEY, String::new())),
        (Some(_), None) => Err(corrupt(PARKED_LONGITUDE_KEY, String::new())),
    }
}

fn parse_axis(key: &'static str, value: String) -> Result<f64, Error> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(corrupt(key, value)),
    }
}

fn corrupt(key: &'static str, value: String) -> Error {
    error!(key, value = %value, "stored parking location is corrupt");
    Error::CorruptParkedLocation { key, value }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use crate::testing::FailingStore;

    #[test]
    fn test_write_uses_shortest_decimal_text() {
        let store = MemoryStore::default();
        write_parked_location(&store, Coordinates::new(37.0, -122.0)).unwrap();

        assert_eq!(store.get_item(PARKED_LATITUDE_KEY).unwrap().as_deref(), Some("37"));
        assert_eq!(store.get_item(PARKED_LONGITUDE_KEY).unwrap().as_deref(), Some("-122"));

        write_parked_location(&store, Coordinates::new(37.1, -122.1)).unwrap();
        assert_eq!(store.get_item(PARKED_LATITUDE_KEY).unwrap().as_deref(), Some("37.1"));
        assert_eq!(store.get_item(PARKED_LONGITUDE_KEY).unwrap().as_deref(), Some("-122.1"));
    }

    #[test]
    fn test_missing_record_is_none() {
        let store = MemoryStore::default();
        assert_eq!(read_parked_location(&store).unwrap(), None);
    }

    #[test]
    fn test_second_save_overwrites_first() {
        let store = MemoryStore::default();
        write_parked_location(&store, Coordinates::new(1.5, 2.5)).unwrap();
        write_parked_location(&store, Coordinates::new(-33.8688, 151.2093)).unwrap();

        assert_eq!(
            read_parked_location(&store).unwrap(),
            Some(Coordinates::new(-33.8688, 151.2093))
        );
    }

    #[test]
    fn test_garbled_value_is_corrupt() {
        let store = MemoryStore::default();
        store.set_item(PARKED_LATITUDE_KEY, "undefined").unwrap();
        store.set_item(PARKED_LONGITUDE_KEY, "-122").unwrap();

        match read_parked_location(&store) {
            Err(Error::CorruptParkedLocation { key, value }) => {
                assert_eq!(key, PARKED_LATITUDE_KEY);
                assert_eq!(value, "undefined");
            }
            other => panic!("expected corrupt record, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_value_is_corrupt() {
        let store = MemoryStore::default();
        store.set_item(PARKED_LATITUDE_KEY, "37").unwrap();
        store.set_item(PARKED_LONGITUDE_KEY, "NaN").unwrap();

        assert!(matches!(
            read_parked_location(&store),
            Err(Error::CorruptParkedLocation { key: PARKED_LONGITUDE_KEY, .. })
        ));
    }

    #[test]
    fn test_half_record_is_corrupt() {
        let store = MemoryStore::default();
        store.set_item(PARKED_LATITUDE_KEY, "37").unwrap();

        assert!(matches!(
            read_parked_location(&store),
            Err(Error::CorruptParkedLocation { key: PARKED_LONGITUDE_KEY, .. })
        ));
    }

    #[test]
    fn test_failed_write_keeps_previous_location() {
        // calls 1-2 are the first save, call 4 is the second longitude
        let store = FailingStore::failing_on(4);
        write_parked_location(&store, Coordinates::new(10.0, 20.0)).unwrap();

        assert!(matches!(
            write_parked_location(&store, Coordinates::new(50.0, 60.0)),
            Err(StorageError::Backend(_))
        ));
        assert_eq!(
            read_parked_location(&store).unwrap(),
            Some(Coordinates::new(10.0, 20.0))
        );
    }

    #[test]
    fn test_failed_first_write_leaves_nothing_behind() {
        let store = FailingStore::failing_on(2);

        assert!(write_parked_location(&store, Coordinates::new(50.0, 60.0)).is_err());
        assert_eq!(store.get_item(PARKED_LATITUDE_KEY).unwrap(), None);
        assert_eq!(read_parked_location(&store).unwrap(), None);
    }
}
