use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use expense_tracker::app::App;
use expense_tracker::cli::{
    handle_audit, handle_category_command, handle_config, handle_dashboard, handle_expense_command,
    handle_export_command, handle_init, handle_login, handle_logout, handle_report,
    handle_status, handle_user_command, CategoryCommands, ExpenseCommands, ExportFormat,
    UserCommands, PASSWORD_ENV,
};
use expense_tracker::reports::ReportPeriod;

/// Environment variable holding the log filter
const LOG_ENV: &str = "EXPENSE_LOG";

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Local family expense tracker",
    long_about = "Record household expenses on this machine. An administrator \
                  manages categories and accounts; every member can record \
                  expenses and see spending reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up the tracker and create the administrator account
    Init {
        /// Administrator display name
        #[arg(long, default_value = "Administrator")]
        name: String,
        /// Administrator login name
        #[arg(long, default_value = "admin")]
        username: String,
        /// Administrator password (prompted if omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in
    Login {
        username: String,
        /// Password (prompted if omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// Log out
    Logout,

    /// Show setup and login state
    Status,

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// User management commands (administrators only)
    #[command(subcommand)]
    User(UserCommands),

    /// Show totals and recent expenses
    Dashboard,

    /// Spending by category and over time
    Report {
        /// Period: week, month or year
        #[arg(short, long, default_value = "month")]
        period: ReportPeriod,
        /// Also write the report to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Export data
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show recent changes, newest first (administrators only)
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();
    let app = App::open()?;

    match cli.command {
        Some(Commands::Init {
            name,
            username,
            password,
        }) => handle_init(&app, name, username, password)?,
        Some(Commands::Login { username, password }) => handle_login(&app, username, password)?,
        Some(Commands::Logout) => handle_logout(&app)?,
        Some(Commands::Status) => handle_status(&app)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&app, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&app, cmd)?,
        Some(Commands::User(cmd)) => handle_user_command(&app, cmd)?,
        Some(Commands::Dashboard) => handle_dashboard(&app)?,
        Some(Commands::Report { period, csv }) => handle_report(&app, period, csv)?,
        Some(Commands::Export { format, output }) => handle_export_command(&app, format, output)?,
        Some(Commands::Audit { limit }) => handle_audit(&app, limit)?,
        Some(Commands::Config) => handle_config(&app)?,
        None => {
            handle_status(&app)?;
            println!();
            println!("Run 'expense --help' for usage information.");
        }
    }

    Ok(())
}
