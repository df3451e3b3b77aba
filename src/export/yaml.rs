//! YAML Export functionality
//!
//! Same content as the JSON export, in a human-readable form.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full store to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage);
    let to_err = |e: std::io::Error| ExpenseError::Export(e.to_string());

    writeln!(writer, "# Expense Tracker Export").map_err(to_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(to_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(to_err)?;
    writeln!(writer).map_err(to_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
