//! Key-value storage boundary
//!
//! The toggle store persists through this seam: LocalStorage in the browser,
//! an in-memory map everywhere else. Backends report failures as values; the
//! store folds them into diagnostics and carries on.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Failure raised by a storage backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Synchronous key-value persistence
///
/// Calls never hang; they either complete or return an error for the caller
/// to swallow.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory backend for native builds and tests
///
/// Clones share the same underlying map, so a test can hold one clone, hand
/// the other to a store, and inspect what got persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage backend (WASM only)
///
/// The storage object is looked up through the window on every call; an
/// unavailable LocalStorage (sandboxed iframe, cookies disabled) surfaces as
/// an error instead of a panic.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = Self::storage()
            .ok_or_else(|| StorageError::Read("LocalStorage is unavailable".into()))?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage()
            .ok_or_else(|| StorageError::Write("LocalStorage is unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("missing").unwrap(), None);

        storage.set("key", "value").unwrap();
        assert_eq!(storage.get("key").unwrap(), Some("value".to_string()));

        storage.set("key", "other").unwrap();
        assert_eq!(storage.get("key").unwrap(), Some("other".to_string()));
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();

        storage.set("key", "value").unwrap();
        assert_eq!(observer.get("key").unwrap(), Some("value".to_string()));
    }
}
