//! Audit logging for the expense tracker
//!
//! Records every create, update and delete performed through the
//! repositories in an append-only JSONL file, with before/after snapshots.
//! Password hashes never reach the log: repositories hand in redacted
//! snapshots.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Change, EntityType, Operation};
pub use logger::AuditLogger;
