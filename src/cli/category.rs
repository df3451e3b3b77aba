//! Category CLI commands
//!
//! Listing is open to every user; changes require an administrator.

use clap::Subcommand;

use crate::app::App;
use crate::display::format_category_list;
use crate::error::ExpenseResult;
use crate::models::CategoryPatch;
use crate::services::CategoryService;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Color as #RRGGBB (picked from the palette if omitted)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Rename or recolor a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color (#RRGGBB)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a category (its expenses are kept)
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(app: &App, cmd: CategoryCommands) -> ExpenseResult<()> {
    let actor = app.require_user()?;
    let service = CategoryService::new(app.storage());

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()));
        }

        CategoryCommands::Add { name, color } => {
            let category = service.create(&actor, &name, color.as_deref())?;
            println!("Created category: {}", category.name);
            println!("  Color: {}", category.color);
            println!("  ID:    {}", category.id);
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            if name.is_none() && color.is_none() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(&actor, &category, CategoryPatch { name, color })?;
            println!("Updated category: {} ({})", updated.name, updated.color);
        }

        CategoryCommands::Delete { category } => {
            let deleted = service.delete(&actor, &category)?;
            let orphaned = app.storage().expenses.by_category(deleted.id).len();
            println!("Deleted category: {}", deleted.name);
            if orphaned > 0 {
                println!(
                    "  {} expense(s) kept; they now show as uncategorized.",
                    orphaned
                );
            }
        }
    }

    Ok(())
}
