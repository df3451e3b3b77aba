//! Expense CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::app::App;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::ExpenseResult;
use crate::models::ExpensePatch;
use crate::reports::{ExpenseListing, RowBuilder, SortKey, SortOrder};
use crate::services::{CategoryService, ExpenseInput, ExpenseService};

use super::{parse_amount, parse_date};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g., "25000", "25.000" or "12500,50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List expenses
    List {
        /// Sort by "date" or "amount"
        #[arg(short, long, default_value = "date")]
        sort: SortKey,
        /// Sort order, "asc" or "desc"
        #[arg(short, long, default_value = "desc")]
        order: SortOrder,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show expense details
    Show {
        /// Expense ID (or its first characters)
        expense: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (or its first characters)
        expense: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long, conflicts_with = "notes")]
        clear_notes: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (or its first characters)
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(app: &App, cmd: ExpenseCommands) -> ExpenseResult<()> {
    let actor = app.require_user()?;
    let storage = app.storage();
    let opts = app.display_options();
    let service = ExpenseService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
            notes,
        } => {
            let category = categories.resolve(&category)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let expense = service.create(
                &actor,
                ExpenseInput {
                    title,
                    amount: parse_amount(&amount)?,
                    category_id: category.id,
                    date,
                    notes,
                },
            )?;

            println!("Added expense: {}", expense.title);
            println!("  Amount:   {}", opts.money(expense.amount));
            println!("  Category: {}", category.name);
            println!("  Date:     {}", opts.date(expense.date));
            println!("  ID:       {}", expense.id);
        }

        ExpenseCommands::List { sort, order, limit } => {
            let mut listing = ExpenseListing::generate(storage, &actor, sort, order);
            let total = listing.rows.len();
            if let Some(limit) = limit {
                listing.truncate(limit);
            }

            print!("{}", format_expense_table(&listing.rows, &opts));
            if !listing.rows.is_empty() {
                println!();
                println!(
                    "Showing {} of {} expenses, sorted by {} ({})",
                    listing.rows.len(),
                    total,
                    listing.sort_key,
                    match listing.sort_order {
                        SortOrder::Asc => "ascending",
                        SortOrder::Desc => "descending",
                    }
                );
                println!("Total: {}", opts.money(listing.total));
            }
        }

        ExpenseCommands::Show { expense } => {
            let expense = service.resolve(&expense)?;
            let row = RowBuilder::new(storage, &actor).row(expense);
            print!("{}", format_expense_details(&row, &opts));
        }

        ExpenseCommands::Edit {
            expense,
            title,
            amount,
            category,
            date,
            notes,
            clear_notes,
        } => {
            let existing = service.resolve(&expense)?;

            let patch = ExpensePatch {
                title,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category_id: match category {
                    Some(c) => Some(categories.resolve(&c)?.id),
                    None => None,
                },
                date: date.as_deref().map(parse_date).transpose()?,
                notes: if clear_notes { Some(None) } else { notes.map(Some) },
            };

            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(&actor, existing.id, patch)?;
            println!("Updated expense: {}", updated.title);
        }

        ExpenseCommands::Delete { expense } => {
            let existing = service.resolve(&expense)?;
            let deleted = service.delete(&actor, existing.id)?;
            println!(
                "Deleted expense: {} ({})",
                deleted.title,
                opts.money(deleted.amount)
            );
        }
    }

    Ok(())
}
