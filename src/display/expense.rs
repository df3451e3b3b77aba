//! Expense display formatting

use crate::reports::ExpenseRow;

use super::{truncate, DisplayOptions};

/// Format expenses as a table
///
/// Rows the viewer cannot change are not marked; editable rows carry `*`.
pub fn format_expense_table(rows: &[ExpenseRow], opts: &DisplayOptions) -> String {
    if rows.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:12} {:10} {:24} {:18} {:>18} {}\n",
        "", "ID", "Date", "Title", "Category", "Amount", "By"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for row in rows {
        let marker = if row.can_edit { "*" } else { " " };
        output.push_str(&format!(
            "{:1} {:12} {:10} {:24} {:18} {:>18} {}\n",
            marker,
            row.expense.id.to_string(),
            opts.date(row.expense.date),
            truncate(&row.expense.title, 24),
            truncate(&row.category_name, 18),
            opts.money(row.expense.amount),
            row.owner
        ));
    }

    output
}

/// Format one expense in full
pub fn format_expense_details(row: &ExpenseRow, opts: &DisplayOptions) -> String {
    let e = &row.expense;
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", e.id.as_uuid()));
    output.push_str(&format!("Title:     {}\n", e.title));
    output.push_str(&format!("Amount:    {}\n", opts.money(e.amount)));
    output.push_str(&format!(
        "Category:  {} ({})\n",
        row.category_name, row.category_color
    ));
    output.push_str(&format!("Date:      {}\n", opts.date(e.date)));
    if let Some(notes) = &e.notes {
        output.push_str(&format!("Notes:     {}\n", notes));
    }
    output.push_str(&format!("Recorded:  {} by {}\n", e.created_at.format("%Y-%m-%d %H:%M UTC"), row.owner));
    if e.updated_at != e.created_at {
        output.push_str(&format!("Updated:   {}\n", e.updated_at.format("%Y-%m-%d %H:%M UTC")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Expense, ExpenseId, Money, UserId};
    use chrono::{NaiveDate, Utc};

    fn row(notes: Option<&str>, can_edit: bool) -> ExpenseRow {
        let now = Utc::now();
        ExpenseRow {
            expense: Expense {
                id: ExpenseId::new(),
                title: "Bayar listrik bulan Juni".into(),
                amount: Money::from_units(350_000),
                category_id: CategoryId::new(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                notes: notes.map(String::from),
                user_id: UserId::new(),
                created_at: now,
                updated_at: now,
            },
            category_name: "Tagihan".into(),
            category_color: "#4BC0C0".into(),
            owner: "budi".into(),
            can_edit,
        }
    }

    #[test]
    fn test_table() {
        let opts = DisplayOptions::default();
        let output = format_expense_table(&[row(None, true), row(None, false)], &opts);

        assert!(output.contains("Rp 350.000"));
        assert!(output.contains("01/06/2024"));
        assert!(output.contains("Tagihan"));
        assert_eq!(output.lines().filter(|l| l.starts_with('*')).count(), 1);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_expense_table(&[], &DisplayOptions::default()),
            "No expenses found.\n"
        );
    }

    #[test]
    fn test_details() {
        let opts = DisplayOptions::default();
        let with_notes = format_expense_details(&row(Some("token PLN"), true), &opts);
        assert!(with_notes.contains("Notes:     token PLN"));
        assert!(with_notes.contains("Category:  Tagihan (#4BC0C0)"));
        assert!(!with_notes.contains("Updated:"));

        let without = format_expense_details(&row(None, true), &opts);
        assert!(!without.contains("Notes:"));
    }
}
