//! Shopping list CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::shopping::{format_shopping_list, format_shopping_lists};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ShoppingItem, ShoppingList};
use crate::services::{ShoppingListStore, Tracker};

/// Shopping list subcommands
#[derive(Subcommand)]
pub enum ShoppingCommands {
    /// List saved shopping lists
    List,

    /// Show a list with its items and totals
    Show {
        /// List title, ID or ID prefix
        list: String,
    },

    /// Save a new shopping list
    Create {
        /// List title
        title: String,
        /// Item as NAME:QUANTITY:UNIT_VALUE (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
    },

    /// Replace the title and items of a list
    Edit {
        /// List title, ID or ID prefix
        list: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// Item as NAME:QUANTITY:UNIT_VALUE (repeatable, replaces all items)
        #[arg(short, long = "item")]
        items: Vec<String>,
    },

    /// Delete a list
    Delete {
        /// List title, ID or ID prefix
        list: String,
    },
}

/// Handle a shopping list command
pub fn handle_shopping_command(
    tracker: &mut Tracker,
    settings: &Settings,
    cmd: ShoppingCommands,
) -> ExpenseResult<()> {
    let store = &mut tracker.shopping;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ShoppingCommands::List => {
            print!("{}", format_shopping_lists(store.lists(), symbol));
        }

        ShoppingCommands::Show { list } => {
            let found = find_list(store, &list)?;
            print!("{}", format_shopping_list(&found, symbol));
        }

        ShoppingCommands::Create { title, items } => {
            let items = parse_items(&items)?;
            let list = store.create(&title, items)?;
            println!(
                "Saved shopping list: {} ({} items, total {})",
                list.title,
                list.items.len(),
                list.total().format_with_symbol(symbol)
            );
            println!("  ID: {}", list.id);
        }

        ShoppingCommands::Edit { list, title, items } => {
            if title.is_none() && items.is_empty() {
                println!("No changes specified. Use --title or --item.");
                return Ok(());
            }

            let current = find_list(store, &list)?;
            let title = title.unwrap_or_else(|| current.title.clone());
            let items = if items.is_empty() {
                current.items.clone()
            } else {
                parse_items(&items)?
            };

            let updated = store
                .update(&current.id, &title, items)?
                .ok_or_else(|| ExpenseError::shopping_list_not_found(current.id.as_str()))?;
            print!("{}", format_shopping_list(&updated, symbol));
        }

        ShoppingCommands::Delete { list } => {
            let found = find_list(store, &list)?;
            store.delete(&found.id)?;
            println!("Deleted shopping list: {}", found.title);
        }
    }

    Ok(())
}

fn find_list(store: &ShoppingListStore, identifier: &str) -> ExpenseResult<ShoppingList> {
    store
        .find(identifier)
        .cloned()
        .ok_or_else(|| ExpenseError::shopping_list_not_found(identifier))
}

/// Parse `NAME:QUANTITY:UNIT_VALUE` item specs
///
/// The name may itself contain colons; quantity and value are taken from
/// the right.
pub(crate) fn parse_items(specs: &[String]) -> ExpenseResult<Vec<ShoppingItem>> {
    specs.iter().map(|spec| parse_item(spec)).collect()
}

fn parse_item(spec: &str) -> ExpenseResult<ShoppingItem> {
    let invalid = || {
        ExpenseError::Validation(format!(
            "Invalid item '{}'. Use NAME:QUANTITY:UNIT_VALUE",
            spec
        ))
    };

    let mut parts = spec.rsplitn(3, ':');
    let value = parts.next().ok_or_else(invalid)?;
    let quantity = parts.next().ok_or_else(invalid)?;
    let name = parts.next().ok_or_else(invalid)?;

    let quantity: u32 = quantity.trim().parse().map_err(|_| invalid())?;
    let value = parse_amount(value)?;

    ShoppingItem::new(name, quantity, value).map_err(|e| ExpenseError::Validation(e.to_string()))
}
