//! Dashboard summary
//!
//! Totals across all expenses, today's spending, and the most recently
//! recorded expenses.

use chrono::NaiveDate;

use crate::display::DisplayOptions;
use crate::models::{Money, Session, User};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::listing::{ExpenseRow, RowBuilder};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub greeting_name: String,
    pub is_admin: bool,
    pub total: Money,
    pub expense_count: usize,
    pub today: NaiveDate,
    pub today_total: Money,
    pub today_count: usize,
    /// Newest first by creation time
    pub recent: Vec<ExpenseRow>,
}

impl Dashboard {
    pub fn generate(
        storage: &Storage,
        viewer: &User,
        today: NaiveDate,
        recent_count: usize,
    ) -> Self {
        let mut expenses = ExpenseService::new(storage).list();

        let total = expenses.iter().map(|e| e.amount).sum();
        let todays: Vec<Money> = expenses
            .iter()
            .filter(|e| e.date == today)
            .map(|e| e.amount)
            .collect();

        let expense_count = expenses.len();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        expenses.truncate(recent_count);

        let builder = RowBuilder::new(storage, viewer);
        Self {
            greeting_name: viewer.name.clone(),
            is_admin: viewer.role.is_admin(),
            total,
            expense_count,
            today,
            today_total: todays.iter().sum(),
            today_count: todays.len(),
            recent: expenses.into_iter().map(|e| builder.row(e)).collect(),
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, opts: &DisplayOptions) -> String {
        let mut output = String::new();

        let role = if self.is_admin { "Administrator" } else { "User" };
        output.push_str(&format!("Hello, {} ({})\n", self.greeting_name, role));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total spending:   {:>20}  ({} expenses)\n",
            opts.money(self.total),
            self.expense_count
        ));
        output.push_str(&format!(
            "Today ({}): {:>20}  ({} expenses)\n",
            opts.date(self.today),
            opts.money(self.today_total),
            self.today_count
        ));
        output.push('\n');

        output.push_str("Recent expenses\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.recent.is_empty() {
            output.push_str("No expenses recorded yet.\n");
        } else {
            output.push_str(&crate::display::format_expense_table(&self.recent, opts));
        }

        output
    }
}

/// Session header shown above the dashboard
pub fn format_session_line(session: &Session) -> String {
    format!(
        "Logged in as {} since {}",
        session.username,
        session.login_time.format("%Y-%m-%d %H:%M UTC")
    )
}
