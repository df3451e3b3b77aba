//! Audit entry types
//!
//! One entry per repository mutation. The change itself is tagged by
//! operation so a line only carries the snapshots that make sense for it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "created",
            Operation::Update => "updated",
            Operation::Delete => "deleted",
        })
    }
}

/// Collections whose mutations are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Category,
    Expense,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityType::User => "user",
            EntityType::Category => "category",
            EntityType::Expense => "expense",
        })
    }
}

/// What happened to the record, with the matching snapshots
///
/// Snapshots are plain JSON so repositories can redact fields before
/// handing them over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Change {
    Create {
        after: Value,
    },
    Update {
        before: Value,
        after: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diff: Option<String>,
    },
    Delete {
        before: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub entity: EntityType,
    /// Full UUID of the record
    pub id: String,
    /// Category name, expense title or username at the time of the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub change: Change,
}

impl AuditEntry {
    fn new(entity: EntityType, id: String, label: Option<String>, change: Change) -> Self {
        Self {
            at: Utc::now(),
            entity,
            id,
            label,
            change,
        }
    }

    pub fn created(entity: EntityType, id: String, label: Option<String>, after: Value) -> Self {
        Self::new(entity, id, label, Change::Create { after })
    }

    pub fn updated(
        entity: EntityType,
        id: String,
        label: Option<String>,
        before: Value,
        after: Value,
        diff: Option<String>,
    ) -> Self {
        Self::new(entity, id, label, Change::Update { before, after, diff })
    }

    pub fn deleted(entity: EntityType, id: String, label: Option<String>, before: Value) -> Self {
        Self::new(entity, id, label, Change::Delete { before })
    }

    pub fn operation(&self) -> Operation {
        match self.change {
            Change::Create { .. } => Operation::Create,
            Change::Update { .. } => Operation::Update,
            Change::Delete { .. } => Operation::Delete,
        }
    }

    pub fn diff(&self) -> Option<&str> {
        match &self.change {
            Change::Update { diff, .. } => diff.as_deref(),
            _ => None,
        }
    }

    /// One line for terminal listings, plus the diff when there is one
    pub fn summary_line(&self) -> String {
        let short_id: String = self.id.chars().take(8).collect();
        let mut line = format!(
            "{}  {} {} {}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.entity,
            short_id,
            self.operation()
        );
        if let Some(label) = &self.label {
            line.push_str(&format!(" \"{}\"", label));
        }
        if let Some(diff) = self.diff() {
            line.push_str(&format!("\n    {}", diff));
        }
        line
    }
}
