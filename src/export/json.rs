//! JSON exchange format
//!
//! The document produced by export and consumed by import: required
//! `categories` and `expenses` arrays plus an optional `shoppingLists` array.
//! Older files without `shoppingLists` still import.

use std::collections::HashSet;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ShoppingList};

/// Full exchange document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeData {
    /// All categories with their subcategories
    pub categories: Vec<Category>,

    /// All expenses
    pub expenses: Vec<Expense>,

    /// Shopping lists, absent in older files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_lists: Option<Vec<ShoppingList>>,
}

impl ExchangeData {
    /// Parse and validate an exchange document
    ///
    /// Fails if the text is not JSON, if either required collection is
    /// missing, if ids are duplicated, or if any record is invalid.
    pub fn parse(text: &str) -> ExpenseResult<Self> {
        let data: ExchangeData =
            serde_json::from_str(text).map_err(|e| ExpenseError::Import(e.to_string()))?;

        data.validate().map_err(ExpenseError::Import)?;

        Ok(data)
    }

    /// Serialize as pretty-printed JSON with a stable field order
    pub fn to_json_pretty(&self) -> ExpenseResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ExpenseError::Export(e.to_string()))
    }

    /// Write the document to `writer`
    pub fn write_json<W: Write>(&self, writer: &mut W, pretty: bool) -> ExpenseResult<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
        .map_err(|e| ExpenseError::Export(e.to_string()))
    }

    /// Check every record and id uniqueness across each collection
    ///
    /// Subcategory and expense back-references are not checked here; the
    /// store re-derives them on import.
    pub fn validate(&self) -> Result<(), String> {
        let mut category_ids = HashSet::new();
        let mut subcategory_ids = HashSet::new();

        for category in &self.categories {
            category
                .validate_fields()
                .map_err(|e| format!("Category {}: {}", category.id, e))?;
            if !category_ids.insert(&category.id) {
                return Err(format!("Duplicate category id {}", category.id));
            }
            for sub in &category.subcategories {
                if !subcategory_ids.insert(&sub.id) {
                    return Err(format!("Duplicate subcategory id {}", sub.id));
                }
            }
        }

        let mut expense_ids = HashSet::new();
        for expense in &self.expenses {
            expense
                .validate()
                .map_err(|e| format!("Expense {}: {}", expense.id, e))?;
            if !expense_ids.insert(&expense.id) {
                return Err(format!("Duplicate expense id {}", expense.id));
            }
        }

        if let Some(lists) = &self.shopping_lists {
            let mut list_ids = HashSet::new();
            for list in lists {
                list.validate()
                    .map_err(|e| format!("Shopping list {}: {}", list.id, e))?;
                if !list_ids.insert(&list.id) {
                    return Err(format!("Duplicate shopping list id {}", list.id));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::default_categories;

    #[test]
    fn test_empty_collections_are_valid() {
        let data = ExchangeData::parse(r#"{"categories": [], "expenses": []}"#).unwrap();
        assert!(data.categories.is_empty());
        assert!(data.expenses.is_empty());
        assert!(data.shopping_lists.is_none());
    }

    #[test]
    fn test_missing_collection_rejected() {
        let err = ExchangeData::parse(r#"{"categories": []}"#).unwrap_err();
        assert!(err.is_import());

        let err = ExchangeData::parse(r#"{"foo": 1}"#).unwrap_err();
        assert!(err.is_import());

        let err = ExchangeData::parse(r#"{"categories": null, "expenses": []}"#).unwrap_err();
        assert!(err.is_import());
    }

    #[test]
    fn test_malformed_text_rejected() {
        assert!(ExchangeData::parse("not json").unwrap_err().is_import());
        assert!(ExchangeData::parse("").unwrap_err().is_import());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut categories = default_categories();
        categories.push(categories[0].clone());
        let data = ExchangeData {
            categories,
            expenses: Vec::new(),
            shopping_lists: None,
        };
        assert!(data.validate().unwrap_err().contains("Duplicate category id 1"));
    }

    #[test]
    fn test_invalid_records_rejected() {
        let negative_expense = r#"{"categories": [], "expenses": [
            {"id": "e1", "amount": -5, "date": "2024-01-01", "subcategoryId": "1-1", "categoryId": "1"}
        ]}"#;
        let err = ExchangeData::parse(negative_expense).unwrap_err();
        assert!(err.is_import());
        assert!(err.to_string().contains("Expense e1"));

        let bad_color = r#"{"expenses": [], "categories": [
            {"id": "c", "name": "Pets", "color": "blue", "subcategories": []}
        ]}"#;
        assert!(ExchangeData::parse(bad_color).unwrap_err().is_import());

        let blank_subcategory = r##"{"expenses": [], "categories": [
            {"id": "c", "name": "Pets", "color": "#fff",
             "subcategories": [{"id": "c-1", "name": " ", "categoryId": "c"}]}
        ]}"##;
        assert!(ExchangeData::parse(blank_subcategory).unwrap_err().is_import());

        let zero_quantity = r#"{"categories": [], "expenses": [], "shoppingLists": [
            {"id": "l1", "title": "Market", "createdAt": "2024-01-01T00:00:00Z",
             "items": [{"id": "i1", "name": "Milk", "quantity": 0, "value": -3}]}
        ]}"#;
        let err = ExchangeData::parse(zero_quantity).unwrap_err();
        assert!(err.to_string().contains("Shopping list l1"));

        let untitled = r#"{"categories": [], "expenses": [], "shoppingLists": [
            {"id": "l1", "title": "", "createdAt": "2024-01-01T00:00:00Z",
             "items": [{"id": "i1", "name": "Milk", "quantity": 1, "value": 3}]}
        ]}"#;
        assert!(ExchangeData::parse(untitled).unwrap_err().is_import());
    }

    #[test]
    fn test_huge_amount_rejected() {
        let text = r#"{"categories": [], "expenses": [
            {"id": "e1", "amount": 1e17, "date": "2024-01-01", "subcategoryId": "1-1", "categoryId": "1"}
        ]}"#;
        assert!(ExchangeData::parse(text).unwrap_err().is_import());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let data = ExchangeData::parse(
            r#"{"version": 3, "categories": [], "expenses": [], "shoppingLists": []}"#,
        )
        .unwrap();
        assert_eq!(data.shopping_lists, Some(Vec::new()));
    }

    #[test]
    fn test_pretty_output_is_stable() {
        let data = ExchangeData {
            categories: default_categories(),
            expenses: Vec::new(),
            shopping_lists: None,
        };
        let first = data.to_json_pretty().unwrap();
        let second = data.to_json_pretty().unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("{\n  \"categories\": ["));
        assert!(!first.contains("shoppingLists"));
    }
}
