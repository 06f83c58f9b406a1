//! Core data models for the expense tracker
//!
//! This module contains the data structures of the domain: categories with
//! their subcategories, expenses, and shopping lists.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod shopping;

pub use category::{palette_color, Category, CategoryValidationError, Subcategory};
pub use expense::{Expense, ExpenseValidationError};
pub use ids::{CategoryId, ExpenseId, ShoppingItemId, ShoppingListId, SubcategoryId};
pub use money::Money;
pub use shopping::{ShoppingItem, ShoppingList, ShoppingValidationError};
