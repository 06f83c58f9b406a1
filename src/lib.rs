//! Expense tracker - personal expenses and shopping lists
//!
//! This library holds categories (each with subcategories), expenses and
//! shopping lists in memory and mirrors every change to a durable
//! key-value store before the change becomes visible.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (categories, expenses, shopping lists, money)
//! - `storage`: Key-value storage backends (JSON files, memory)
//! - `services`: The stores and the `Tracker` coordinator
//! - `reports`: Spending breakdowns and expense history
//! - `export`: JSON exchange format, YAML and CSV output
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expense` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use expense_tracker::models::{Money, SubcategoryId};
//! use expense_tracker::services::Tracker;
//!
//! let mut tracker = Tracker::open_in_memory();
//! let expense = tracker
//!     .expenses
//!     .add_expense(
//!         Money::from_units(49.90),
//!         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!         &SubcategoryId::from("1-1"),
//!     )
//!     .unwrap();
//! assert_eq!(expense.category_id().as_str(), "1");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
