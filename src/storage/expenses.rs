//! Expense repository
//!
//! Manages the `expenses` collection. Category and owner references are
//! stored as given; checking them is the expense service's job.

use chrono::{DateTime, Utc};

use crate::audit::EntityType;
use crate::models::{CategoryId, Expense, ExpenseId, ExpensePatch, NewExpense, UserId};

use super::kv::StorageKey;
use super::repository::{Record, Repository};

pub type ExpenseRepository = Repository<Expense>;

impl Record for Expense {
    type Id = ExpenseId;
    type New = NewExpense;
    type Patch = ExpensePatch;

    const KEY: StorageKey = StorageKey::Expenses;
    const ENTITY: EntityType = EntityType::Expense;

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn from_new(new: NewExpense, id: ExpenseId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            amount: new.amount,
            category_id: new.category_id,
            date: new.date,
            notes: new.notes,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: ExpensePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.updated_at = now;
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

impl Repository<Expense> {
    /// Expenses owned by `user_id`
    pub fn by_user(&self, user_id: UserId) -> Vec<Expense> {
        self.filter(|e| e.user_id == user_id)
    }

    pub fn by_category(&self, category_id: CategoryId) -> Vec<Expense> {
        self.filter(|e| e.category_id == category_id)
    }
}
