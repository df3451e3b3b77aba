//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for expenses, categories and users.
//! Amounts and dates follow the user's settings.

pub mod category;
pub mod expense;
pub mod user;

pub use category::format_category_list;
pub use expense::{format_expense_details, format_expense_table};
pub use user::format_user_list;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::Money;

/// Formatting preferences taken from [`Settings`]
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
}

impl DisplayOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Shorten `s` to at most `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Bakso", 10), "Bakso");
        assert_eq!(truncate("Makanan & Minuman", 10), "Makanan...");
        assert_eq!(truncate("Kopi susu", 2), "..");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_default_options() {
        let opts = DisplayOptions::default();
        assert_eq!(opts.money(Money::from_units(1_000_000)), "Rp 1.000.000");
        assert_eq!(
            opts.date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            "05/03/2024"
        );
    }

    #[test]
    fn test_custom_symbol() {
        let opts = DisplayOptions {
            currency_symbol: "IDR".into(),
            date_format: "%Y-%m-%d".into(),
        };
        assert_eq!(opts.money(Money::from_minor(1_250_050)), "IDR 12.500,5");
    }
}
