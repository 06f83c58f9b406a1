//! Category CLI commands
//!
//! Implements CLI commands for category and subcategory management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_tree};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Subcategory;
use crate::services::{ExpenseStore, Tracker};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their subcategories
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
    },

    /// Show category details and spending per subcategory
    Show {
        /// Category name or ID
        category: String,
    },

    /// Delete a category, its subcategories and all of their expenses
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Subcategory subcommands
#[derive(Subcommand)]
pub enum SubcategoryCommands {
    /// Add a subcategory to a category
    Add {
        /// Subcategory name
        name: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
    },

    /// Delete a subcategory and all of its expenses
    Delete {
        /// Subcategory name or ID
        subcategory: String,
        /// Category name or ID, to disambiguate repeated names
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(
    tracker: &mut Tracker,
    settings: &Settings,
    cmd: CategoryCommands,
) -> ExpenseResult<()> {
    let store = &mut tracker.expenses;

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_tree(store.categories()));
        }

        CategoryCommands::Add { name } => {
            let category = store.add_category(&name)?;
            println!("Created category: {}", category.name);
            println!("  Color: {}", category.color);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let cat = store
                .find_category(&category)
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;
            print!(
                "{}",
                format_category_details(cat, store.expenses(), &settings.currency_symbol)
            );
        }

        CategoryCommands::Delete { category } => {
            let cat = store
                .find_category(&category)
                .cloned()
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;
            let affected = store
                .expenses()
                .iter()
                .filter(|e| e.category_id() == &cat.id)
                .count();

            store.delete_category(&cat.id)?;
            println!("Deleted category: {}", cat.name);
            if affected > 0 {
                println!("  Removed {} expense(s)", affected);
            }
        }
    }

    Ok(())
}

/// Handle a subcategory command
pub fn handle_subcategory_command(
    tracker: &mut Tracker,
    cmd: SubcategoryCommands,
) -> ExpenseResult<()> {
    let store = &mut tracker.expenses;

    match cmd {
        SubcategoryCommands::Add { name, category } => {
            let cat = store
                .find_category(&category)
                .cloned()
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;

            let sub = store
                .add_subcategory(&name, &cat.id)?
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;
            println!("Created subcategory: {} (in {})", sub.name, cat.name);
            println!("  ID: {}", sub.id);
        }

        SubcategoryCommands::Delete {
            subcategory,
            category,
        } => {
            let sub = resolve_subcategory(store, &subcategory, category.as_deref())?;
            let affected = store
                .expenses()
                .iter()
                .filter(|e| e.subcategory_id == sub.id)
                .count();

            store.delete_subcategory(&sub.id)?;
            println!("Deleted subcategory: {}", sub.name);
            if affected > 0 {
                println!("  Removed {} expense(s)", affected);
            }
        }
    }

    Ok(())
}

/// Look up a subcategory by ID or name, optionally within one category
pub(crate) fn resolve_subcategory(
    store: &ExpenseStore,
    subcategory: &str,
    category: Option<&str>,
) -> ExpenseResult<Subcategory> {
    let within = match category {
        Some(c) => Some(
            store
                .find_category(c)
                .map(|cat| cat.id.clone())
                .ok_or_else(|| ExpenseError::category_not_found(c))?,
        ),
        None => None,
    };

    store
        .find_subcategory(subcategory, within.as_ref())
        .cloned()
        .ok_or_else(|| ExpenseError::subcategory_not_found(subcategory))
}
