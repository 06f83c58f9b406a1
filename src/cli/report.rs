//! Report and history CLI commands

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::expense::format_expense_table;
use crate::display::report::format_breakdown;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{available_years, ExpenseHistory, HistoryFilter, PeriodFilter, SpendingBreakdown};
use crate::services::Tracker;

use super::category::resolve_subcategory;

/// Month and year narrowing shared by reports and history
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PeriodArgs {
    /// Month (1-12)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Year (e.g., 2024)
    #[arg(short, long)]
    pub year: Option<i32>,
}

impl From<PeriodArgs> for PeriodFilter {
    fn from(args: PeriodArgs) -> Self {
        PeriodFilter {
            month: args.month,
            year: args.year,
        }
    }
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending per category
    Categories {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Spending per subcategory
    Subcategories {
        #[command(flatten)]
        period: PeriodArgs,
        /// Only this subcategory (name or ID)
        #[arg(short, long)]
        subcategory: Option<String>,
        /// Category name or ID, to disambiguate the subcategory
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Years that have expenses
    Years,
}

/// Arguments of `expense history`
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Only expenses of this category (name or ID)
    #[arg(short, long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub period: PeriodArgs,
}

/// Handle a report command
pub fn handle_report_command(
    tracker: &Tracker,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let store = &tracker.expenses;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Categories { period } => {
            let breakdown =
                SpendingBreakdown::by_category(store.categories(), store.expenses(), period.into());
            print!("{}", format_breakdown(&breakdown, "Spending by category", symbol));
        }

        ReportCommands::Subcategories {
            period,
            subcategory,
            category,
        } => {
            let only = match subcategory {
                Some(s) => Some(resolve_subcategory(store, &s, category.as_deref())?.id),
                None => None,
            };
            let breakdown = SpendingBreakdown::by_subcategory(
                store.categories(),
                store.expenses(),
                period.into(),
                only.as_ref(),
            );
            print!("{}", format_breakdown(&breakdown, "Spending by subcategory", symbol));
        }

        ReportCommands::Years => {
            let years = available_years(store.expenses());
            if years.is_empty() {
                println!("No expenses recorded yet.");
            } else {
                for year in years {
                    println!("{}", year);
                }
            }
        }
    }

    Ok(())
}

/// Handle `expense history`
pub fn handle_history(tracker: &Tracker, settings: &Settings, args: HistoryArgs) -> ExpenseResult<()> {
    let store = &tracker.expenses;

    let category = match args.category {
        Some(c) => Some(
            store
                .find_category(&c)
                .map(|cat| cat.id.clone())
                .ok_or_else(|| ExpenseError::category_not_found(&c))?,
        ),
        None => None,
    };

    let filter = HistoryFilter {
        category,
        period: args.period.into(),
    };
    let label = filter.period.label();
    let history = ExpenseHistory::query(store.expenses(), filter);
    let total = history.total();
    let count = history.len();

    println!("Expense history: {}", label);
    print!(
        "{}",
        format_expense_table(
            store.categories(),
            history.entries,
            &settings.currency_symbol,
            &settings.date_format,
        )
    );
    if count > 0 {
        println!(
            "{} expense(s), total {}",
            count,
            total.format_with_symbol(&settings.currency_symbol)
        );
    }

    Ok(())
}
