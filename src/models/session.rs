//! Session model
//!
//! The single persisted record naming the logged-in user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::user::{Role, User};

/// The currently authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub login_time: DateTime<Utc>,
}

impl Session {
    /// Issue a session for `user` starting at `login_time`
    pub fn for_user(user: &User, login_time: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            login_time,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
