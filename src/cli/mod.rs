//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the stores.

pub mod category;
pub mod config;
pub mod expense;
pub mod export;
pub mod report;
pub mod shopping;

pub use category::{
    handle_category_command, handle_subcategory_command, CategoryCommands, SubcategoryCommands,
};
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export, handle_import, ExportArgs, ExportFormat, ImportArgs};
pub use report::{handle_history, handle_report_command, HistoryArgs, PeriodArgs, ReportCommands};
pub use shopping::{handle_shopping_command, ShoppingCommands};

use chrono::{Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;

/// Parse a `YYYY-MM-DD` date, defaulting to today
pub(crate) fn parse_date_or_today(date: Option<&str>) -> ExpenseResult<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            ExpenseError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

/// Parse an amount such as `49.90`, `49,90` or `R$ 12`
pub(crate) fn parse_amount(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|e| ExpenseError::Validation(format!("Invalid amount: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date_or_today(Some("2024-03-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_date_or_today(Some("01/03/2024")).unwrap_err().is_validation());
        assert!(parse_date_or_today(None).is_ok());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("49,90").unwrap().cents(), 4990);
        assert!(parse_amount("lots").unwrap_err().is_validation());
    }
}
