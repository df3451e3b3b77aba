//! Session persistence
//!
//! A single slot holding the logged-in user's session. No expiry.

use crate::models::Session;

use super::kv::{JsonStore, StorageKey};

pub struct SessionManager {
    store: JsonStore,
}

impl SessionManager {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Persist `session`, replacing any previous one
    pub fn save(&self, session: &Session) {
        self.store.write(StorageKey::Session, session);
    }

    /// The stored session; `None` when absent or unreadable
    pub fn get(&self) -> Option<Session> {
        self.store.read(StorageKey::Session)
    }

    pub fn clear(&self) {
        self.store.remove(StorageKey::Session);
    }
}
