//! JSON Export functionality
//!
//! Exports the whole store, minus password hashes, as one JSON document.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money, PublicUser};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full store export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of the tool that wrote the export
    pub app_version: String,
    pub users: Vec<PublicUser>,
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub user_count: usize,
    pub category_count: usize,
    pub expense_count: usize,
    pub total_amount: Money,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> Self {
        let users: Vec<PublicUser> = storage
            .users
            .get_all()
            .into_iter()
            .map(PublicUser::from)
            .collect();
        let categories = storage.categories.get_all();
        let mut expenses = storage.expenses.get_all();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at)));

        let metadata = ExportMetadata {
            user_count: users.len(),
            category_count: categories.len(),
            expense_count: expenses.len(),
            total_amount: expenses.iter().map(|e| e.amount).sum(),
            earliest_expense: expenses.first().map(|e| e.date),
            latest_expense: expenses.last().map(|e| e.date),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            users,
            categories,
            expenses,
            metadata,
        }
    }
}

/// Export the full store as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCategory, NewExpense, NewUser, Role, UserId};

    fn seeded() -> Storage {
        let storage = Storage::in_memory();
        let user = storage.users.add(NewUser {
            name: "Admin".into(),
            username: "admin".into(),
            password_hash: "$argon2id$secret-hash".into(),
            role: Role::Admin,
        });
        let cat = storage.categories.add(NewCategory::new("Belanja", "#FFCE56"));
        for (day, units) in [(20, 5_000), (3, 7_500)] {
            storage.expenses.add(NewExpense {
                title: "Sabun".into(),
                amount: Money::from_units(units),
                category_id: cat.id,
                date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                notes: None,
                user_id: user.id,
            });
        }
        storage.expenses.add(NewExpense {
            title: "Lost".into(),
            amount: Money::from_units(1),
            category_id: cat.id,
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            notes: None,
            user_id: UserId::new(),
        });
        storage
    }

    #[test]
    fn test_metadata() {
        let export = FullExport::from_storage(&seeded());

        assert_eq!(export.metadata.user_count, 1);
        assert_eq!(export.metadata.expense_count, 3);
        assert_eq!(export.metadata.total_amount, Money::from_units(12_501));
        assert_eq!(
            export.metadata.earliest_expense,
            NaiveDate::from_ymd_opt(2024, 6, 3)
        );
        assert_eq!(
            export.metadata.latest_expense,
            NaiveDate::from_ymd_opt(2024, 6, 20)
        );
    }

    #[test]
    fn test_json_has_no_password_hashes() {
        let mut buf = Vec::new();
        export_full_json(&seeded(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(!text.contains("secret-hash"));
        assert!(!text.contains("passwordHash"));

        let parsed: FullExport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.categories.len(), 1);
    }
}
