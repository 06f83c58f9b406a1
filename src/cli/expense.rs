//! Expense CLI commands

use clap::Subcommand;

use super::category::resolve_subcategory;
use super::{parse_amount, parse_date_or_today};
use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};
use crate::reports::{ExpenseHistory, HistoryFilter};
use crate::services::{ExpenseStore, Tracker};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "49.90" or "49,90")
        amount: String,
        /// Subcategory name or ID
        #[arg(short, long)]
        subcategory: String,
        /// Category name or ID, to disambiguate repeated subcategory names
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List the most recent expenses
    List {
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show expense details
    Show {
        /// Expense ID or ID prefix
        expense: String,
    },

    /// Change amount, date or subcategory of an expense
    Edit {
        /// Expense ID or ID prefix
        expense: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New subcategory name or ID
        #[arg(short, long)]
        subcategory: Option<String>,
        /// Category name or ID, to disambiguate the subcategory
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID or ID prefix
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    tracker: &mut Tracker,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let store = &mut tracker.expenses;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            subcategory,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_today(date.as_deref())?;
            let sub = resolve_subcategory(store, &subcategory, category.as_deref())?;

            let expense = store.add_expense(amount, date, &sub.id)?;
            println!(
                "Recorded {} on {} under {}",
                expense.amount.format_with_symbol(symbol),
                expense.date.format("%Y-%m-%d"),
                sub.name
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { limit } => {
            let history = ExpenseHistory::query(store.expenses(), HistoryFilter::default());
            print!(
                "{}",
                format_expense_table(
                    store.categories(),
                    history.entries.into_iter().take(limit),
                    symbol,
                    &settings.date_format,
                )
            );
        }

        ExpenseCommands::Show { expense } => {
            let found = find_expense(store, &expense)?;
            print!("{}", format_expense_details(store.categories(), &found, symbol));
        }

        ExpenseCommands::Edit {
            expense,
            amount,
            date,
            subcategory,
            category,
        } => {
            if amount.is_none() && date.is_none() && subcategory.is_none() {
                println!("No changes specified. Use --amount, --date, or --subcategory.");
                return Ok(());
            }

            let current = find_expense(store, &expense)?;
            let amount = match amount {
                Some(a) => parse_amount(&a)?,
                None => current.amount,
            };
            let date = match date {
                Some(d) => parse_date_or_today(Some(&d))?,
                None => current.date,
            };
            let subcategory_id = match subcategory {
                Some(s) => resolve_subcategory(store, &s, category.as_deref())?.id,
                None => current.subcategory_id.clone(),
            };

            let updated = store
                .update_expense(&current.id, amount, date, &subcategory_id)?
                .ok_or_else(|| ExpenseError::expense_not_found(current.id.as_str()))?;
            println!("Updated expense {}", updated.id.short());
            print!("{}", format_expense_details(store.categories(), &updated, symbol));
        }

        ExpenseCommands::Delete { expense } => {
            let found = find_expense(store, &expense)?;
            store.delete_expense(&found.id)?;
            println!(
                "Deleted expense of {} on {}",
                found.amount.format_with_symbol(symbol),
                found.date.format("%Y-%m-%d")
            );
        }
    }

    Ok(())
}

/// Find an expense by full ID or an unambiguous ID prefix
fn find_expense(store: &ExpenseStore, identifier: &str) -> ExpenseResult<Expense> {
    let identifier = identifier.trim();
    if let Some(expense) = store.get_expense(&ExpenseId::from(identifier)) {
        return Ok(expense.clone());
    }

    let mut matches = store
        .expenses()
        .iter()
        .filter(|e| !identifier.is_empty() && e.id.as_str().starts_with(identifier));

    match (matches.next(), matches.next()) {
        (Some(expense), None) => Ok(expense.clone()),
        (Some(_), Some(_)) => Err(ExpenseError::Validation(format!(
            "Expense ID prefix '{}' is ambiguous",
            identifier
        ))),
        (None, _) => Err(ExpenseError::expense_not_found(identifier)),
    }
}
