//! Expense model
//!
//! An expense is a single spending record owned by a user and filed under a
//! category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, UserId};
use super::money::Money;

/// Maximum expense title length
pub const MAX_TITLE_LEN: usize = 100;

/// Largest amount a single expense may carry (Rp 1.000.000.000.000)
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000_000);

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    /// Always positive
    pub amount: Money,
    /// Not checked against the category collection by storage
    pub category_id: CategoryId,
    /// Calendar date the money was spent
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Owner
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Validate the expense against the calendar date `today`
    pub fn validate(&self, today: NaiveDate) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.title, self.amount, self.date, today)
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.title, self.amount)
    }
}

/// Fields supplied when adding an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: Money,
    pub category_id: CategoryId,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub user_id: UserId,
}

/// Mutable expense fields
///
/// `notes: Some(None)` clears the notes; `None` leaves them unchanged.
/// Ownership cannot be changed through a patch.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub category_id: Option<CategoryId>,
    pub date: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category_id.is_none()
            && self.date.is_none()
            && self.notes.is_none()
    }
}

/// Shared field checks for new and edited expenses
pub fn validate_fields(
    title: &str,
    amount: Money,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ExpenseValidationError> {
    if title.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ExpenseValidationError::TitleTooLong(len));
    }
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ExpenseValidationError::AmountTooLarge(amount));
    }
    if date > today {
        return Err(ExpenseValidationError::FutureDate(date));
    }
    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    NonPositiveAmount,
    AmountTooLarge(Money),
    FutureDate(NaiveDate),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::TitleTooLong(len) => {
                write!(f, "Expense title too long ({} chars, max {})", len, MAX_TITLE_LEN)
            }
            Self::NonPositiveAmount => write!(f, "Amount must be a positive number"),
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::FutureDate(date) => write!(f, "Date {} is in the future", date),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
