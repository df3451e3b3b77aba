//! User settings for the expense tracker
//!
//! Manages display preferences, password policy and password hashing cost.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::crypto::password::HashingParams;
use crate::error::ExpenseError;

/// Application settings persisted to `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol prefixed to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Minimum accepted password length for new accounts
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Argon2 cost parameters for new password hashes
    #[serde(default)]
    pub password_hashing: HashingParams,

    /// Number of expenses shown in the dashboard's recent list
    #[serde(default = "default_recent_expense_count")]
    pub recent_expense_count: usize,

    /// Number of points kept in report trend series
    #[serde(default = "default_trend_points")]
    pub trend_points: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "Rp".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_min_password_length() -> usize {
    6
}

fn default_recent_expense_count() -> usize {
    5
}

fn default_trend_points() -> usize {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            min_password_length: default_min_password_length(),
            password_hashing: HashingParams::default(),
            recent_expense_count: default_recent_expense_count(),
            trend_points: default_trend_points(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
