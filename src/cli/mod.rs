//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod auth;
pub mod category;
pub mod expense;
pub mod export;
pub mod report;
pub mod user;

pub use audit::handle_audit;
pub use auth::{handle_config, handle_init, handle_login, handle_logout, handle_status};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportFormat};
pub use report::{handle_dashboard, handle_report};
pub use user::{handle_user_command, UserCommands};

use chrono::NaiveDate;

use crate::crypto::SecureString;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;

/// Environment variable consulted by every `--password` flag
pub const PASSWORD_ENV: &str = "EXPENSE_PASSWORD";

/// Use the password given on the command line, or prompt for it
pub(crate) fn read_password(provided: Option<String>, prompt: &str) -> ExpenseResult<SecureString> {
    if let Some(password) = provided {
        return Ok(SecureString::from(password));
    }

    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| ExpenseError::Io(format!("Failed to read password: {}", e)))
}

pub(crate) fn parse_amount(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|e| ExpenseError::Validation(format!("Invalid amount '{}': {}", s, e)))
}

pub(crate) fn parse_date(s: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
    })
}
