//! Export module for the expense tracker
//!
//! - CSV: expenses, spreadsheet-compatible
//! - JSON: the whole store, machine-readable
//! - YAML: the whole store, human-readable
//!
//! Password hashes are never exported.

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
