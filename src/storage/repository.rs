//! Whole-collection repository over the JSON store
//!
//! Each collection is one JSON array under a fixed key. Every mutation reads
//! the full array, changes it and writes it back while holding the
//! collection's write lock, so two mutations on the same repository cannot
//! lose each other's changes.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::models::EntityId;

use super::kv::{JsonStore, StorageKey};

/// A stored entity kind
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: EntityId;
    /// Caller-supplied fields for `add`
    type New;
    /// Mutable fields for `update`
    type Patch;

    const KEY: StorageKey;
    const ENTITY: EntityType;

    fn id(&self) -> Self::Id;

    /// Build a record from its creation fields
    fn from_new(new: Self::New, id: Self::Id, now: DateTime<Utc>) -> Self;

    /// Merge `patch` into the record. `id` and `created_at` are never touched.
    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    /// Short human label used in the audit log
    fn label(&self) -> String;

    /// JSON snapshot written to the audit log
    fn audit_view(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// CRUD over one collection
pub struct Repository<R: Record> {
    store: JsonStore,
    audit: Option<Arc<AuditLogger>>,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Repository<R> {
    pub fn new(store: JsonStore, audit: Option<Arc<AuditLogger>>) -> Self {
        Self {
            store,
            audit,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// All records; empty when the slot is absent or unreadable
    pub fn get_all(&self) -> Vec<R> {
        self.store.read(R::KEY).unwrap_or_default()
    }

    /// Replace the whole collection
    pub fn save_all(&self, records: &[R]) {
        let _guard = self.lock();
        self.store.write(R::KEY, records);
    }

    pub fn get(&self, id: R::Id) -> Option<R> {
        self.get_all().into_iter().find(|r| r.id() == id)
    }

    pub fn find<P>(&self, predicate: P) -> Option<R>
    where
        P: Fn(&R) -> bool,
    {
        self.get_all().into_iter().find(|r| predicate(r))
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<R>
    where
        P: Fn(&R) -> bool,
    {
        self.get_all().into_iter().filter(|r| predicate(r)).collect()
    }

    /// Records whose ID matches a full or shortened ID
    pub fn find_matching(&self, input: &str) -> Vec<R> {
        self.filter(|r| r.id().matches(input))
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.get_all().is_empty()
    }

    /// Append a new record with a fresh ID and creation time
    pub fn add(&self, new: R::New) -> R {
        let _guard = self.lock();
        let mut records = self.get_all();
        let record = R::from_new(new, R::Id::generate(), Utc::now());
        records.push(record.clone());
        self.store.write(R::KEY, &records);

        tracing::debug!(entity = %R::ENTITY, id = %record.id(), "record added");
        self.audit(AuditEntry::created(
            R::ENTITY,
            record.id().full(),
            Some(record.label()),
            record.audit_view(),
        ));
        record
    }

    /// Merge `patch` into the record with `id`
    ///
    /// Returns `None` and leaves the collection untouched when no record has
    /// that ID.
    pub fn update(&self, id: R::Id, patch: R::Patch) -> Option<R> {
        let _guard = self.lock();
        let mut records = self.get_all();
        let record = records.iter_mut().find(|r| r.id() == id)?;

        let before = record.audit_view();
        record.apply_patch(patch, Utc::now());
        let updated = record.clone();
        self.store.write(R::KEY, &records);

        let after = updated.audit_view();
        let diff = generate_diff(&before, &after);
        tracing::debug!(entity = %R::ENTITY, id = %id, "record updated");
        self.audit(AuditEntry::updated(
            R::ENTITY,
            id.full(),
            Some(updated.label()),
            before,
            after,
            diff,
        ));
        Some(updated)
    }

    /// Remove the record with `id`; returns whether anything was removed
    pub fn delete(&self, id: R::Id) -> bool {
        let _guard = self.lock();
        let mut records = self.get_all();
        let Some(pos) = records.iter().position(|r| r.id() == id) else {
            return false;
        };

        let removed = records.remove(pos);
        self.store.write(R::KEY, &records);

        tracing::debug!(entity = %R::ENTITY, id = %id, "record deleted");
        self.audit(AuditEntry::deleted(
            R::ENTITY,
            id.full(),
            Some(removed.label()),
            removed.audit_view(),
        ));
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.append(&entry) {
                tracing::warn!(entity = %R::ENTITY, error = %e, "failed to write audit entry");
            }
        }
    }
}
