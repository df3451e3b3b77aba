//! Expense listing
//!
//! Expenses joined with their category and owner, sorted by date or amount.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::models::category::UNKNOWN_CATEGORY_COLOR;
use crate::models::{Category, CategoryId, Expense, Money, User, UserId};
use crate::services::{CategoryService, ExpenseService};
use crate::storage::Storage;

/// Label shown for a missing category or owner
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            other => Err(format!("Unknown sort key '{}'. Use date or amount", other)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("Unknown sort order '{}'. Use asc or desc", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Amount => write!(f, "amount"),
        }
    }
}

/// An expense with its category and owner resolved for display
#[derive(Debug, Clone)]
pub struct ExpenseRow {
    pub expense: Expense,
    pub category_name: String,
    pub category_color: String,
    pub owner: String,
    /// Whether the viewer may edit or delete it
    pub can_edit: bool,
}

/// Resolves expenses against the current categories and users
pub struct RowBuilder<'v> {
    categories: HashMap<CategoryId, Category>,
    owners: HashMap<UserId, String>,
    viewer: &'v User,
}

impl<'v> RowBuilder<'v> {
    pub fn new(storage: &Storage, viewer: &'v User) -> Self {
        let owners = storage
            .users
            .get_all()
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();
        Self {
            categories: CategoryService::new(storage).lookup(),
            owners,
            viewer,
        }
    }

    pub fn row(&self, expense: Expense) -> ExpenseRow {
        let (category_name, category_color) = match self.categories.get(&expense.category_id) {
            Some(c) => (c.name.clone(), c.color.clone()),
            None => (UNKNOWN_LABEL.to_string(), UNKNOWN_CATEGORY_COLOR.to_string()),
        };
        let owner = self
            .owners
            .get(&expense.user_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        let can_edit = ExpenseService::can_edit(self.viewer, &expense);

        ExpenseRow {
            expense,
            category_name,
            category_color,
            owner,
            can_edit,
        }
    }

    /// Resolve a category name for a single ID
    pub fn category_name(&self, id: CategoryId) -> &str {
        self.categories
            .get(&id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }
}

/// Sort expenses in place
///
/// Ties keep a stable order by creation time, newest first.
pub fn sort_expenses(expenses: &mut [Expense], key: SortKey, order: SortOrder) {
    expenses.sort_by(|a, b| {
        let primary = match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.cmp(&b.amount),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// The full, sorted expense list
#[derive(Debug, Clone)]
pub struct ExpenseListing {
    pub rows: Vec<ExpenseRow>,
    pub total: Money,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl ExpenseListing {
    pub fn generate(storage: &Storage, viewer: &User, key: SortKey, order: SortOrder) -> Self {
        let mut expenses = ExpenseService::new(storage).list();
        sort_expenses(&mut expenses, key, order);

        let total = expenses.iter().map(|e| e.amount).sum();
        let builder = RowBuilder::new(storage, viewer);
        let rows = expenses.into_iter().map(|e| builder.row(e)).collect();

        Self {
            rows,
            total,
            sort_key: key,
            sort_order: order,
        }
    }

    /// Keep only the first `limit` rows; the total still covers all
    pub fn truncate(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }
}
