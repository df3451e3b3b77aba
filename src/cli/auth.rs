//! Setup, login and status commands

use crate::app::App;
use crate::crypto::SecureString;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::dashboard::format_session_line;
use crate::setup::FirstRunInput;

use super::read_password;

/// Run first-run setup, creating the administrator account
pub fn handle_init(
    app: &App,
    name: String,
    username: String,
    password: Option<String>,
) -> ExpenseResult<()> {
    if app.storage().is_initialized() {
        return Err(ExpenseError::AlreadyInitialized);
    }

    let (password, confirm_password) = match password {
        Some(p) => (SecureString::from(p.clone()), SecureString::from(p)),
        None => (
            read_password(None, "Admin password: ")?,
            read_password(None, "Confirm password: ")?,
        ),
    };

    let admin = app.initializer().run_first_setup(FirstRunInput {
        name,
        username,
        password,
        confirm_password,
    })?;
    app.settings().save(app.paths())?;

    let categories = app.storage().categories.get_all();
    println!("Initialized expense tracker at: {}", app.paths().base_dir().display());
    println!("  Administrator: {} ({})", admin.username, admin.name);
    println!("  Default categories: {}", categories.len());
    println!();
    println!("Run 'expense login {}' to get started.", admin.username);
    Ok(())
}

pub fn handle_login(app: &App, username: String, password: Option<String>) -> ExpenseResult<()> {
    app.require_initialized()?;

    let password = read_password(password, "Password: ")?;
    match app.auth().login(username.trim(), password.as_str()) {
        Some(session) => {
            println!("Welcome, {}!", session.name);
            println!("{}", format_session_line(&session));
            Ok(())
        }
        None => Err(ExpenseError::PermissionDenied(
            "invalid username or password".into(),
        )),
    }
}

pub fn handle_logout(app: &App) -> ExpenseResult<()> {
    let auth = app.auth();
    match auth.current_session() {
        Some(session) => {
            auth.logout();
            println!("Logged out {}.", session.username);
        }
        None => println!("No active session."),
    }
    Ok(())
}

pub fn handle_status(app: &App) -> ExpenseResult<()> {
    let status = app.status();

    if !status.initialized {
        println!("Not initialized. Run 'expense init' to create the administrator account.");
        return Ok(());
    }

    match (&status.session, status.current_user_role) {
        (Some(session), Some(role)) => {
            println!("{}", format_session_line(session));
            println!("Role: {}", role);
        }
        _ => println!("Initialized. Not logged in."),
    }
    Ok(())
}

/// Show paths and settings
pub fn handle_config(app: &App) -> ExpenseResult<()> {
    let paths = app.paths();
    let settings = app.settings();

    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:      {}", settings.currency_symbol);
    println!("  Date format:          {}", settings.date_format);
    println!("  Min password length:  {}", settings.min_password_length);
    println!("  Recent expenses:      {}", settings.recent_expense_count);
    println!("  Trend points:         {}", settings.trend_points);
    println!(
        "  Password hashing:     Argon2id (m={} KiB, t={}, p={})",
        settings.password_hashing.memory_cost,
        settings.password_hashing.time_cost,
        settings.password_hashing.parallelism
    );
    Ok(())
}
