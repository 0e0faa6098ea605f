//! Key/value local storage for the campus portal
//!
//! This crate provides the string key/value storage the portal keeps its
//! session identity and persisted stores in. It mirrors the browser's
//! `localStorage`: synchronous, string keys, string values.

mod error;
mod file;

use std::collections::HashMap;
use std::sync::RwLock;

pub use error::*;
pub use file::*;

/// Well-known storage keys
pub mod known_keys {
    /// Signed-in user id
    pub const USER_ID: &str = "userId";

    /// Signed-in user role
    pub const USER_TYPE: &str = "userType";

    /// Marker set on the first load of a browsing session
    pub const HAS_VISITED: &str = "hasVisited";

    /// Persisted event collection
    pub const EVENT_STORE: &str = "event-store";

    /// Persisted certificate collection
    pub const CERTIFICATE_STORE: &str = "certificate-store";

    /// Persisted on-duty request collection
    pub const OD_STORE: &str = "od-store";
}

/// Trait for local key/value storage
pub trait LocalStorage: Send + Sync {
    /// Gets a value
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Sets a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Lists all keys that currently hold a value
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Checks if a key holds a value
    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-memory storage, for tests and for session-scoped state that should
/// not survive the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage with pre-populated values
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        values.remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();

        // Set a value
        storage.set(known_keys::USER_ID, "S1").unwrap();

        // Get it back
        let value = storage.get(known_keys::USER_ID).unwrap();
        assert_eq!(value, Some("S1".to_string()));

        // Check existence
        assert!(storage.exists(known_keys::USER_ID).unwrap());
        assert!(!storage.exists(known_keys::USER_TYPE).unwrap());

        // Remove, twice
        storage.remove(known_keys::USER_ID).unwrap();
        storage.remove(known_keys::USER_ID).unwrap();
        assert!(!storage.exists(known_keys::USER_ID).unwrap());
    }

    #[test]
    fn test_prepopulated_keys() {
        let mut initial = HashMap::new();
        initial.insert(known_keys::USER_TYPE.to_string(), "faculty".to_string());
        initial.insert(known_keys::USER_ID.to_string(), "F7".to_string());

        let storage = MemoryStorage::with_values(initial);
        assert_eq!(
            storage.keys().unwrap(),
            vec!["userId".to_string(), "userType".to_string()]
        );
    }
}
