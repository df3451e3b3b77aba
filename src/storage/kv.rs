//! Key-value store adapter
//!
//! Every collection lives under one fixed key as a JSON document. Backends
//! implement [`KeyValueStore`] and report failures; [`JsonStore`] sits on top
//! and turns every failure into "absent" after logging it, so a corrupt or
//! unreadable slot degrades to "no data" instead of an error.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::{read_optional, remove_if_exists, write_atomic};

/// The fixed storage slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Users,
    Categories,
    Expenses,
    Session,
    Initialized,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Categories => "categories",
            Self::Expenses => "expenses",
            Self::Session => "session",
            Self::Initialized => "initialized",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Users,
            Self::Categories,
            Self::Expenses,
            Self::Session,
            Self::Initialized,
        ]
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persistent string-keyed string store
///
/// Operations are atomic per key; there is no multi-key transaction.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> ExpenseResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ExpenseResult<()>;
    fn remove(&self, key: &str) -> ExpenseResult<()>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> ExpenseResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ExpenseError::Validation(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
        read_optional(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> ExpenseResult<()> {
        write_atomic(self.path_for(key)?, value.as_bytes())
    }

    fn remove(&self, key: &str) -> ExpenseResult<()> {
        remove_if_exists(self.path_for(key)?)
    }
}

/// Volatile store for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ExpenseResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ExpenseResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Fail-soft JSON view over a [`KeyValueStore`]
#[derive(Clone)]
pub struct JsonStore {
    backend: Arc<dyn KeyValueStore>,
}

impl JsonStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Raw string value; `None` when absent or unreadable
    pub fn get_raw(&self, key: StorageKey) -> Option<String> {
        match self.backend.get(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "storage read failed, treating as absent");
                None
            }
        }
    }

    /// Store a raw string value, logging failures
    pub fn set_raw(&self, key: StorageKey, value: &str) {
        if let Err(e) = self.backend.set(key.as_str(), value) {
            tracing::error!(key = %key, error = %e, "storage write failed");
        }
    }

    /// Decode the JSON document under `key`; `None` when absent, unreadable or corrupt
    pub fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "stored JSON is corrupt, treating as absent");
                None
            }
        }
    }

    /// Encode `value` as JSON under `key`, logging failures
    pub fn write<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.set_raw(key, &json),
            Err(e) => tracing::error!(key = %key, error = %e, "failed to encode value"),
        }
    }

    /// Delete the value under `key`, logging failures
    pub fn remove(&self, key: StorageKey) {
        if let Err(e) = self.backend.remove(key.as_str()) {
            tracing::error!(key = %key, error = %e, "storage remove failed");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::BrokenStore;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.get("users").unwrap(), None);
        store.set("users", "[]").unwrap();
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("users.json").exists());

        store.remove("users").unwrap();
        assert_eq!(store.get("users").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("session", "{}").unwrap();
        assert_eq!(store.get("session").unwrap().as_deref(), Some("{}"));
        store.remove("session").unwrap();
        assert_eq!(store.get("session").unwrap(), None);
    }

    #[test]
    fn test_json_store_corrupt_value_is_absent() {
        let backend = Arc::new(MemoryStore::new());
        backend.set("users", "{not json").unwrap();
        let store = JsonStore::new(backend);

        let users: Option<Vec<String>> = store.read(StorageKey::Users);
        assert!(users.is_none());
    }

    #[test]
    fn test_json_store_failures_are_soft() {
        let store = JsonStore::new(Arc::new(BrokenStore));

        assert!(store.get_raw(StorageKey::Initialized).is_none());
        assert!(store.read::<Vec<u32>>(StorageKey::Expenses).is_none());
        store.write(StorageKey::Expenses, &vec![1, 2, 3]);
        store.remove(StorageKey::Session);
    }

    #[test]
    fn test_json_store_round_trip() {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        store.write(StorageKey::Categories, &vec!["a".to_string()]);

        let read: Vec<String> = store.read(StorageKey::Categories).unwrap();
        assert_eq!(read, vec!["a".to_string()]);
    }

    #[test]
    fn test_storage_key_names() {
        let names: Vec<_> = StorageKey::all().iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["users", "categories", "expenses", "session", "initialized"]);
    }
}
