//! Dashboard and spending report commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Local;

use crate::app::App;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{Dashboard, ReportPeriod, SpendingReport};

pub fn handle_dashboard(app: &App) -> ExpenseResult<()> {
    let actor = app.require_user()?;
    let today = Local::now().date_naive();

    let dashboard = Dashboard::generate(
        app.storage(),
        &actor,
        today,
        app.settings().recent_expense_count,
    );
    print!("{}", dashboard.format_terminal(&app.display_options()));
    Ok(())
}

/// Print the spending report, optionally also writing it as CSV
pub fn handle_report(app: &App, period: ReportPeriod, csv: Option<PathBuf>) -> ExpenseResult<()> {
    app.require_user()?;
    let today = Local::now().date_naive();

    let report = SpendingReport::generate(app.storage(), period, today, app.settings().trend_points);
    print!("{}", report.format_terminal(&app.display_options()));

    if let Some(path) = csv {
        let file = File::create(&path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!();
        println!("Report exported to: {}", path.display());
    }

    Ok(())
}
