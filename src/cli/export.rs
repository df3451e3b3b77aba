//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::app::App;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only)
    Csv,
    /// JSON format (users, categories and expenses)
    Json,
    /// YAML format (same content as JSON, human-readable)
    Yaml,
}

/// Export to `output`, or to stdout when no file is given
pub fn handle_export_command(
    app: &App,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> ExpenseResult<()> {
    let actor = app.require_user()?;
    tracing::info!(by = %actor.username, ?format, "exporting data");

    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(app.storage(), format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| ExpenseError::Export(e.to_string()))?;
            println!("Exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(app.storage(), format, &mut writer)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(storage: &Storage, format: ExportFormat, writer: &mut W) -> ExpenseResult<()> {
    match format {
        ExportFormat::Csv => export_expenses_csv(storage, writer),
        ExportFormat::Json => export_full_json(storage, writer),
        ExportFormat::Yaml => export_full_yaml(storage, writer),
    }
}
