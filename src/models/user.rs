//! User model
//!
//! Users own expenses and carry a role. The stored record keeps the password
//! hash; everything handed back to presentation code is a [`PublicUser`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::UserId;

/// Access level of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages users and categories, may edit any expense
    Admin,
    /// Manages only their own expenses
    #[default]
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// A stored user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Login name, unique and case-sensitive
    pub username: String,
    /// PHC-format password hash; empty when the record has none
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }

    /// Strip the password hash for display
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// A user record without its password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl fmt::Display for PublicUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.username)
    }
}

/// Fields supplied when adding a user to the repository
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Mutable user fields; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(),
            name: "Administrator".into(),
            username: "admin".into(),
            password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".into(),
            role: Role::Admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("passwordHash").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_public_user_has_no_hash() {
        let public = sample_user().to_public();
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(public.username, "admin");
    }

    #[test]
    fn test_missing_hash_deserializes_empty() {
        let json = format!(
            r#"{{"id":"{}","name":"A","username":"a","role":"user","createdAt":"2024-01-01T00:00:00Z"}}"#,
            UserId::new().as_uuid()
        );
        let user: User = serde_json::from_str(&json).unwrap();
        assert!(!user.has_password());
    }
}
