//! Expense model
//!
//! One recorded outflow tied to a subcategory. The owning category id is
//! carried alongside for fast filtering, but it is always derived from the
//! subcategory that is passed in; callers never supply it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Subcategory;
use super::ids::{CategoryId, ExpenseId, SubcategoryId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent (positive)
    pub amount: Money,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// Subcategory this expense is filed under
    pub subcategory_id: SubcategoryId,

    /// Owner of `subcategory_id`, kept in sync by the store
    pub(crate) category_id: CategoryId,
}

impl Expense {
    /// Create a new expense filed under `subcategory`
    pub fn new(amount: Money, date: NaiveDate, subcategory: &Subcategory) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            date,
            subcategory_id: subcategory.id.clone(),
            category_id: subcategory.category_id.clone(),
        }
    }

    /// The category this expense belongs to
    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    /// Replace every mutable field in place, keeping the id
    pub fn reassign(&mut self, amount: Money, date: NaiveDate, subcategory: &Subcategory) {
        self.amount = amount;
        self.date = date;
        self.subcategory_id = subcategory.id.clone();
        self.category_id = subcategory.category_id.clone();
    }

    /// Calendar month (1-12)
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries() -> Subcategory {
        Subcategory {
            id: SubcategoryId::from("1-1"),
            name: "Groceries".into(),
            category_id: CategoryId::from("1"),
        }
    }

    #[test]
    fn test_new_expense_derives_category() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expense = Expense::new(Money::from_cents(4990), date, &groceries());

        assert_eq!(expense.subcategory_id.as_str(), "1-1");
        assert_eq!(expense.category_id().as_str(), "1");
        assert_eq!(expense.month(), 3);
        assert_eq!(expense.year(), 2024);
    }

    #[test]
    fn test_reassign_keeps_id() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut expense = Expense::new(Money::from_cents(500), date, &groceries());
        let id = expense.id.clone();

        let fuel = Subcategory {
            id: SubcategoryId::from("2-1"),
            name: "Fuel".into(),
            category_id: CategoryId::from("2"),
        };
        let new_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        expense.reassign(Money::from_cents(1000), new_date, &fuel);

        assert_eq!(expense.id, id);
        assert_eq!(expense.amount.cents(), 1000);
        assert_eq!(expense.date, new_date);
        assert_eq!(expense.subcategory_id.as_str(), "2-1");
        assert_eq!(expense.category_id().as_str(), "2");
    }

    #[test]
    fn test_validation() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut expense = Expense::new(Money::from_cents(100), date, &groceries());
        assert!(expense.validate().is_ok());

        expense.amount = Money::zero();
        assert!(expense.validate().is_err());
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"id":"9","amount":49.9,"date":"2024-03-01","subcategoryId":"1-1","categoryId":"1"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();

        assert_eq!(expense.amount.cents(), 4990);
        assert_eq!(expense.category_id().as_str(), "1");
        assert_eq!(serde_json::to_string(&expense).unwrap(), json);
    }
}
