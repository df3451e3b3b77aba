//! CSV Export functionality
//!
//! One row per expense, with the category and owner resolved to names.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::listing::{sort_expenses, UNKNOWN_LABEL};
use crate::reports::{SortKey, SortOrder};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Export all expenses to CSV, oldest first
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<()> {
    let categories = CategoryService::new(storage).lookup();
    let owners: HashMap<_, _> = storage
        .users
        .get_all()
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let mut expenses = storage.expenses.get_all();
    sort_expenses(&mut expenses, SortKey::Date, SortOrder::Asc);

    let mut csv = csv::Writer::from_writer(writer);
    let to_err = |e: csv::Error| ExpenseError::Export(e.to_string());

    csv.write_record([
        "ID", "Date", "Title", "Category", "Amount", "Notes", "User", "Created At",
    ])
    .map_err(to_err)?;

    for expense in expenses {
        let category = categories
            .get(&expense.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_LABEL);
        let owner = owners
            .get(&expense.user_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL);

        csv.write_record([
            expense.id.as_uuid().to_string().as_str(),
            &expense.date.to_string(),
            &expense.title,
            category,
            &format!("{:.2}", expense.amount.as_f64()),
            expense.notes.as_deref().unwrap_or(""),
            owner,
            &expense.created_at.to_rfc3339(),
        ])
        .map_err(to_err)?;
    }

    csv.flush().map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}
