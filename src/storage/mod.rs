//! Storage layer for the expense tracker
//!
//! A key-value backend (one JSON file per key, or memory for tests) with a
//! fail-soft JSON adapter on top, and a repository per collection.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod kv;
pub mod repository;
pub mod session;
pub mod users;

use std::sync::Arc;

pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use kv::{FileStore, JsonStore, KeyValueStore, MemoryStore, StorageKey};
pub use repository::{Record, Repository};
pub use session::SessionManager;
pub use users::UserRepository;

use crate::audit::AuditLogger;
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseResult;

const INITIALIZED_VALUE: &str = "true";

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    store: JsonStore,
    pub users: UserRepository,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
    pub session: SessionManager,
}

impl Storage {
    /// Storage over `backend` without an audit trail
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::build(JsonStore::new(backend), None)
    }

    /// Storage over `backend` that records every mutation in `audit`
    pub fn with_audit(backend: Arc<dyn KeyValueStore>, audit: AuditLogger) -> Self {
        Self::build(JsonStore::new(backend), Some(Arc::new(audit)))
    }

    /// File-backed storage under the data directory, audited to `audit.log`
    pub fn open(paths: &ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;
        let backend = Arc::new(FileStore::new(paths.data_dir()));
        tracing::debug!(dir = %paths.data_dir().display(), "opening file store");
        Ok(Self::with_audit(backend, AuditLogger::new(paths.audit_log())))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn build(store: JsonStore, audit: Option<Arc<AuditLogger>>) -> Self {
        Self {
            users: Repository::new(store.clone(), audit.clone()),
            categories: Repository::new(store.clone(), audit.clone()),
            expenses: Repository::new(store.clone(), audit),
            session: SessionManager::new(store.clone()),
            store,
        }
    }

    /// Whether first-run setup has completed
    pub fn is_initialized(&self) -> bool {
        self.store
            .get_raw(StorageKey::Initialized)
            .is_some_and(|v| v.trim() == INITIALIZED_VALUE)
    }

    pub fn mark_initialized(&self) {
        self.store.set_raw(StorageKey::Initialized, INITIALIZED_VALUE);
    }

    pub fn clear_initialized(&self) {
        self.store.remove(StorageKey::Initialized);
    }
}
