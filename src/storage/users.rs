//! User repository
//!
//! Manages the `users` collection

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::audit::EntityType;
use crate::models::{NewUser, Role, User, UserId, UserPatch};

use super::kv::StorageKey;
use super::repository::{Record, Repository};

pub type UserRepository = Repository<User>;

impl Record for User {
    type Id = UserId;
    type New = NewUser;
    type Patch = UserPatch;

    const KEY: StorageKey = StorageKey::Users;
    const ENTITY: EntityType = EntityType::User;

    fn id(&self) -> UserId {
        self.id
    }

    fn from_new(new: NewUser, id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            username: new.username,
            password_hash: new.password_hash,
            role: new.role,
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: UserPatch, _now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(hash) = patch.password_hash {
            self.password_hash = hash;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
    }

    fn label(&self) -> String {
        self.username.clone()
    }

    fn audit_view(&self) -> Value {
        let mut view = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Some(hash) = view.get_mut("passwordHash") {
            *hash = Value::String("[redacted]".into());
        }
        view
    }
}

impl Repository<User> {
    /// Exact, case-sensitive username lookup
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.find(|u| u.username == username)
    }

    pub fn admins(&self) -> Vec<User> {
        self.filter(|u| u.role == Role::Admin)
    }
}
