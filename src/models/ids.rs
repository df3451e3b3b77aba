//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. IDs are random UUIDv4 values, so two records
//! created within the same millisecond never collide.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// Minimum number of characters accepted for a short ID lookup
pub const MIN_SHORT_ID_LEN: usize = 4;

/// Common behaviour of entity ID newtypes
pub trait EntityId: Copy + Eq + Hash + fmt::Debug + fmt::Display {
    /// Generate a fresh, unique ID
    fn generate() -> Self;

    /// The full UUID string of this ID
    fn full(&self) -> String;

    /// Whether `input` (full UUID, prefixed display form, or a leading
    /// fragment of at least [`MIN_SHORT_ID_LEN`] characters) refers to this ID
    fn matches(&self, input: &str) -> bool;
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl EntityId for $name {
            fn generate() -> Self {
                Self::new()
            }

            fn full(&self) -> String {
                self.0.to_string()
            }

            fn matches(&self, input: &str) -> bool {
                let input = input.trim();
                let fragment = input.strip_prefix($display_prefix).unwrap_or(input);
                if fragment.len() < MIN_SHORT_ID_LEN {
                    return false;
                }
                self.0.to_string().starts_with(&fragment.to_lowercase())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(UserId, "usr-");
define_id!(CategoryId, "cat-");
define_id!(ExpenseId, "exp-");
