//! Reports module for the expense tracker
//!
//! Spending breakdowns by category or subcategory and the filtered expense
//! history.

pub mod breakdown;
pub mod history;

pub use breakdown::{available_years, BreakdownSlice, PeriodFilter, SpendingBreakdown};
pub use history::{ExpenseHistory, HistoryFilter};
