//! Display formatting for terminal output
//!
//! Formats categories, expenses, shopping lists and reports as plain text
//! trees and `tabled` tables. Every formatter returns a `String`; printing
//! is left to the CLI handlers.

pub mod category;
pub mod expense;
pub mod report;
pub mod shopping;

pub use category::{format_category_details, format_category_tree};
pub use expense::{format_expense_details, format_expense_table};
pub use report::format_breakdown;
pub use shopping::{format_shopping_list, format_shopping_lists};

use std::fmt::Write;

use chrono::NaiveDate;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a date with a user-supplied strftime format
///
/// Formats chrono cannot render fall back to `%Y-%m-%d`.
pub(crate) fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    date.format(FALLBACK_DATE_FORMAT).to_string()
}

/// Truncate a string to `max_len` characters, marking the cut with `...`
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Public Transport", 10), "Public ...");
    }

    #[test]
    fn test_format_date_falls_back_on_bad_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_date(date, "%d/%m/%Y"), "01/03/2024");
        assert_eq!(format_date(date, "%Q"), "2024-03-01");
    }
}
