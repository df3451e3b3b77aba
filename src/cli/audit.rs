//! Audit log viewer (administrators only)

use crate::app::App;
use crate::audit::AuditLogger;
use crate::error::ExpenseResult;

pub fn handle_audit(app: &App, limit: usize) -> ExpenseResult<()> {
    app.require_initialized()?;
    app.auth().require_admin()?;

    let entries = AuditLogger::new(app.paths().audit_log()).tail(limit)?;
    if entries.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.summary_line());
    }
    Ok(())
}
