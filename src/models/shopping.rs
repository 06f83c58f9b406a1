//! Shopping list models
//!
//! Shopping lists live alongside the expense data but have no relationship
//! to it: each list is a title plus items with a quantity and unit value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ShoppingItemId, ShoppingListId};
use super::money::Money;

/// One line on a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    /// Unique identifier
    pub id: ShoppingItemId,

    /// Item name
    pub name: String,

    /// How many units (at least 1)
    pub quantity: u32,

    /// Unit value (never negative)
    pub value: Money,
}

impl ShoppingItem {
    /// Create a validated item
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        value: Money,
    ) -> Result<Self, ShoppingValidationError> {
        let item = Self {
            id: ShoppingItemId::new(),
            name: name.into().trim().to_string(),
            quantity,
            value,
        };
        item.validate()?;
        Ok(item)
    }

    /// Value times quantity
    pub fn line_total(&self) -> Money {
        self.value.times(self.quantity)
    }

    /// Validate the item
    pub fn validate(&self) -> Result<(), ShoppingValidationError> {
        if self.name.trim().is_empty() {
            return Err(ShoppingValidationError::EmptyItemName);
        }
        if self.quantity < 1 {
            return Err(ShoppingValidationError::ZeroQuantity(self.name.clone()));
        }
        if self.value.is_negative() {
            return Err(ShoppingValidationError::NegativeValue(self.name.clone()));
        }
        Ok(())
    }
}

/// A named shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    /// Unique identifier
    pub id: ShoppingListId,

    /// List title
    pub title: String,

    /// Items in the order they were added
    #[serde(default)]
    pub items: Vec<ShoppingItem>,

    /// When the list was first saved
    pub created_at: DateTime<Utc>,
}

impl ShoppingList {
    /// Create a new list stamped with the current time
    pub fn new(title: impl Into<String>, items: Vec<ShoppingItem>) -> Self {
        Self {
            id: ShoppingListId::new(),
            title: title.into().trim().to_string(),
            items,
            created_at: Utc::now(),
        }
    }

    /// Sum of all line totals
    pub fn total(&self) -> Money {
        self.items.iter().map(ShoppingItem::line_total).sum()
    }

    /// Total number of units across all items
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Validate the list and every item on it
    pub fn validate(&self) -> Result<(), ShoppingValidationError> {
        if self.title.trim().is_empty() {
            return Err(ShoppingValidationError::EmptyTitle);
        }
        if self.items.is_empty() {
            return Err(ShoppingValidationError::NoItems);
        }
        self.items.iter().try_for_each(ShoppingItem::validate)
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Validation errors for shopping lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShoppingValidationError {
    EmptyTitle,
    NoItems,
    EmptyItemName,
    ZeroQuantity(String),
    NegativeValue(String),
}

impl fmt::Display for ShoppingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Shopping list title cannot be empty"),
            Self::NoItems => write!(f, "Shopping list needs at least one item"),
            Self::EmptyItemName => write!(f, "Item name cannot be empty"),
            Self::ZeroQuantity(name) => write!(f, "Quantity of '{}' must be at least 1", name),
            Self::NegativeValue(name) => write!(f, "Value of '{}' cannot be negative", name),
        }
    }
}

impl std::error::Error for ShoppingValidationError {}
