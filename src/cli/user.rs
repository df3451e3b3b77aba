//! User management CLI commands (administrators only)

use clap::Subcommand;

use crate::app::App;
use crate::display::format_user_list;
use crate::error::ExpenseResult;
use crate::models::Role;
use crate::services::{NewUserInput, UserService};

use super::{read_password, PASSWORD_ENV};

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List,

    /// Create a new user account
    Add {
        /// Login name (no spaces)
        username: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Role: "user" or "admin"
        #[arg(short, long, default_value = "user")]
        role: Role,
        /// Password for the new account (prompted if omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// Delete a user account (their expenses are kept)
    Delete {
        /// Username or ID
        user: String,
    },
}

/// Handle a user command
pub fn handle_user_command(app: &App, cmd: UserCommands) -> ExpenseResult<()> {
    let actor = app.require_user()?;
    let service = UserService::new(app.storage(), app.settings());

    match cmd {
        UserCommands::List => {
            print!("{}", format_user_list(&service.list(&actor)?));
        }

        UserCommands::Add {
            username,
            name,
            role,
            password,
        } => {
            let password = read_password(password, "Password for new user: ")?;
            let user = service.create(
                &actor,
                NewUserInput::new(name, username, password).with_role(role),
            )?;
            println!("Created user: {} ({})", user.username, user.role);
            println!("  ID: {}", user.id);
        }

        UserCommands::Delete { user } => {
            let deleted = service.delete(&actor, &user)?;
            println!("Deleted user: {}", deleted.username);
        }
    }

    Ok(())
}
