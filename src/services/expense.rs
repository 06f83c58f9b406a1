//! Expense store
//!
//! Holds categories (with their subcategories) and expenses in memory and is
//! the only way to change them. Every mutation goes through [`ExpenseStore::commit`],
//! which applies the change to a working copy, writes that copy to the
//! durable store and only then swaps it in. A failed write leaves the
//! in-memory state untouched.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::ExchangeData;
use crate::models::{
    palette_color, Category, CategoryId, Expense, ExpenseId, Money, ShoppingList, Subcategory,
    SubcategoryId,
};
use crate::storage::{
    default_categories, load_json, save_json, KeyValueStore, StorageLayout, CATEGORIES_KEY,
    COMBINED_KEY, EXPENSES_KEY,
};

/// Categories and expenses as one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseData {
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
}

impl ExpenseData {
    /// The state a fresh tracker starts with
    pub fn seeded() -> Self {
        Self {
            categories: default_categories(),
            expenses: Vec::new(),
        }
    }

    /// Repair denormalized references in place
    ///
    /// Subcategory back-references are pointed at the category holding them
    /// and each expense's category is re-derived from its subcategory.
    /// Expenses whose subcategory no longer exists keep what they had.
    /// Returns how many references were corrected.
    pub fn normalize(&mut self) -> usize {
        let mut corrected = 0;
        let mut owners: HashMap<SubcategoryId, CategoryId> = HashMap::new();

        for category in &mut self.categories {
            for sub in &mut category.subcategories {
                if sub.category_id != category.id {
                    sub.category_id = category.id.clone();
                    corrected += 1;
                }
                owners.insert(sub.id.clone(), category.id.clone());
            }
        }

        for expense in &mut self.expenses {
            if let Some(owner) = owners.get(&expense.subcategory_id) {
                if &expense.category_id != owner {
                    expense.category_id = owner.clone();
                    corrected += 1;
                }
            }
        }

        corrected
    }
}

/// Shape of the combined-layout value; either half may be missing
#[derive(Debug, Default, Deserialize)]
struct CombinedRecord {
    categories: Option<Vec<Category>>,
    expenses: Option<Vec<Expense>>,
}

/// What an import replaced
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Number of categories now held
    pub category_count: usize,
    /// Number of expenses now held
    pub expense_count: usize,
    /// References repaired while importing
    pub corrected_references: usize,
    /// Shopping lists carried by the document, if it had any
    pub shopping_lists: Option<Vec<ShoppingList>>,
}

/// In-memory expense state mirrored to a key-value store
pub struct ExpenseStore {
    backend: Arc<dyn KeyValueStore>,
    layout: StorageLayout,
    data: ExpenseData,
}

impl ExpenseStore {
    /// Open the store, loading any persisted snapshot
    ///
    /// Never fails: unreadable data falls back to the default categories and
    /// an empty expense list.
    pub fn open(backend: Arc<dyn KeyValueStore>, layout: StorageLayout) -> Self {
        let data = load_snapshot(backend.as_ref(), layout);
        Self {
            backend,
            layout,
            data,
        }
    }

    /// Re-read the persisted snapshot, discarding in-memory state
    pub fn reload(&mut self) {
        self.data = load_snapshot(self.backend.as_ref(), self.layout);
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &ExpenseData {
        &self.data
    }

    /// All categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    /// All expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.data.expenses
    }

    // === Lookups ===

    /// Get a category by ID
    pub fn get_category(&self, id: &CategoryId) -> Option<&Category> {
        self.data.categories.iter().find(|c| &c.id == id)
    }

    /// Get a subcategory by ID, wherever it lives
    pub fn get_subcategory(&self, id: &SubcategoryId) -> Option<&Subcategory> {
        self.data
            .categories
            .iter()
            .find_map(|c| c.subcategory(id))
    }

    /// Get an expense by ID
    pub fn get_expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.data.expenses.iter().find(|e| &e.id == id)
    }

    /// Find a category by ID or by name (case-insensitive)
    pub fn find_category(&self, identifier: &str) -> Option<&Category> {
        let identifier = identifier.trim();
        if let Some(category) = self.get_category(&CategoryId::from(identifier)) {
            return Some(category);
        }

        let name_lower = identifier.to_lowercase();
        self.data
            .categories
            .iter()
            .find(|c| c.name.to_lowercase() == name_lower)
    }

    /// Find a subcategory by ID or by name (case-insensitive)
    ///
    /// Names may repeat across categories, so `within` narrows a name lookup
    /// to one category.
    pub fn find_subcategory(
        &self,
        identifier: &str,
        within: Option<&CategoryId>,
    ) -> Option<&Subcategory> {
        let identifier = identifier.trim();
        if let Some(sub) = self.get_subcategory(&SubcategoryId::from(identifier)) {
            return Some(sub);
        }

        let name_lower = identifier.to_lowercase();
        self.data
            .categories
            .iter()
            .filter(|c| within.map_or(true, |id| &c.id == id))
            .flat_map(|c| c.subcategories.iter())
            .find(|s| s.name.to_lowercase() == name_lower)
    }

    // === Category Operations ===

    /// Append a new category with a palette color and no subcategories
    pub fn add_category(&mut self, name: &str) -> ExpenseResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpenseError::Validation("Category name cannot be empty".into()));
        }

        let category = self.commit(|data| {
            let category = Category::new(name, palette_color(data.categories.len()));
            data.categories.push(category.clone());
            Ok(category)
        })?;

        debug!(category = %category.id, name = %category.name, "Category added");
        Ok(category)
    }

    /// Delete a category, its subcategories and every expense filed under it
    ///
    /// Returns `false` without touching anything if the category is absent.
    pub fn delete_category(&mut self, id: &CategoryId) -> ExpenseResult<bool> {
        if self.get_category(id).is_none() {
            debug!(category = %id, "Delete of unknown category ignored");
            return Ok(false);
        }

        let removed_expenses = self.commit(|data| {
            data.categories.retain(|c| &c.id != id);
            let before = data.expenses.len();
            data.expenses.retain(|e| &e.category_id != id);
            Ok(before - data.expenses.len())
        })?;

        debug!(category = %id, removed_expenses, "Category deleted");
        Ok(true)
    }

    // === Subcategory Operations ===

    /// Append a new subcategory to a category
    ///
    /// Returns `Ok(None)` and changes nothing if the category is absent.
    pub fn add_subcategory(
        &mut self,
        name: &str,
        category_id: &CategoryId,
    ) -> ExpenseResult<Option<Subcategory>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpenseError::Validation(
                "Subcategory name cannot be empty".into(),
            ));
        }

        if self.get_category(category_id).is_none() {
            debug!(category = %category_id, "Subcategory for unknown category ignored");
            return Ok(None);
        }

        let subcategory = self.commit(|data| {
            let subcategory = Subcategory::new(name, category_id.clone());
            if let Some(category) = data.categories.iter_mut().find(|c| &c.id == category_id) {
                category.subcategories.push(subcategory.clone());
            }
            Ok(subcategory)
        })?;

        debug!(subcategory = %subcategory.id, category = %category_id, "Subcategory added");
        Ok(Some(subcategory))
    }

    /// Delete a subcategory and every expense filed under it
    pub fn delete_subcategory(&mut self, id: &SubcategoryId) -> ExpenseResult<bool> {
        if self.get_subcategory(id).is_none() {
            debug!(subcategory = %id, "Delete of unknown subcategory ignored");
            return Ok(false);
        }

        let removed_expenses = self.commit(|data| {
            for category in data.categories.iter_mut().filter(|c| c.owns(id)) {
                category.subcategories.retain(|s| &s.id != id);
            }
            let before = data.expenses.len();
            data.expenses.retain(|e| &e.subcategory_id != id);
            Ok(before - data.expenses.len())
        })?;

        debug!(subcategory = %id, removed_expenses, "Subcategory deleted");
        Ok(true)
    }

    // === Expense Operations ===

    /// Record a new expense under a subcategory
    ///
    /// The category is taken from the subcategory's owner.
    pub fn add_expense(
        &mut self,
        amount: Money,
        date: NaiveDate,
        subcategory_id: &SubcategoryId,
    ) -> ExpenseResult<Expense> {
        let subcategory = self
            .get_subcategory(subcategory_id)
            .ok_or_else(|| ExpenseError::subcategory_not_found(subcategory_id.as_str()))?;

        let expense = Expense::new(amount, date, subcategory);
        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.commit(|data| {
            data.expenses.push(expense.clone());
            Ok(())
        })?;

        debug!(expense = %expense.id, amount = %expense.amount, "Expense added");
        Ok(expense)
    }

    /// Delete an expense; `false` if it was not there
    pub fn delete_expense(&mut self, id: &ExpenseId) -> ExpenseResult<bool> {
        if self.get_expense(id).is_none() {
            return Ok(false);
        }

        self.commit(|data| {
            data.expenses.retain(|e| &e.id != id);
            Ok(())
        })?;

        debug!(expense = %id, "Expense deleted");
        Ok(true)
    }

    /// Replace amount, date and subcategory of an expense in place
    ///
    /// Returns `Ok(None)` if the expense is absent.
    pub fn update_expense(
        &mut self,
        id: &ExpenseId,
        amount: Money,
        date: NaiveDate,
        subcategory_id: &SubcategoryId,
    ) -> ExpenseResult<Option<Expense>> {
        if self.get_expense(id).is_none() {
            return Ok(None);
        }

        let subcategory = self
            .get_subcategory(subcategory_id)
            .cloned()
            .ok_or_else(|| ExpenseError::subcategory_not_found(subcategory_id.as_str()))?;

        if !amount.is_positive() {
            return Err(ExpenseError::Validation(format!(
                "Expense amount must be positive, got {}",
                amount
            )));
        }

        let updated = self.commit(|data| {
            let expense = data
                .expenses
                .iter_mut()
                .find(|e| &e.id == id)
                .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;
            expense.reassign(amount, date, &subcategory);
            Ok(expense.clone())
        })?;

        debug!(expense = %id, "Expense updated");
        Ok(Some(updated))
    }

    // === Export / Import ===

    /// Current categories and expenses as an exchange document
    pub fn to_exchange(&self) -> ExchangeData {
        ExchangeData {
            categories: self.data.categories.clone(),
            expenses: self.data.expenses.clone(),
            shopping_lists: None,
        }
    }

    /// Serialize categories and expenses to the exchange format
    pub fn export_data(&self) -> ExpenseResult<String> {
        self.to_exchange().to_json_pretty()
    }

    /// Replace all categories and expenses from an exchange document
    ///
    /// Nothing changes unless the text parses, carries both collections and
    /// every record in it is valid.
    pub fn import_data(&mut self, text: &str) -> ExpenseResult<ImportOutcome> {
        let exchange = ExchangeData::parse(text).map_err(|e| {
            warn!(error = %e, "Import rejected");
            e
        })?;
        self.import_exchange(exchange)
    }

    /// Replace all categories and expenses from an already parsed document
    pub fn import_exchange(&mut self, exchange: ExchangeData) -> ExpenseResult<ImportOutcome> {
        let mut incoming = ExpenseData {
            categories: exchange.categories,
            expenses: exchange.expenses,
        };
        let corrected_references = incoming.normalize();
        if corrected_references > 0 {
            warn!(corrected_references, "Imported data had inconsistent references");
        }

        let outcome = ImportOutcome {
            category_count: incoming.categories.len(),
            expense_count: incoming.expenses.len(),
            corrected_references,
            shopping_lists: exchange.shopping_lists,
        };

        self.commit(move |data| {
            *data = incoming;
            Ok(())
        })?;

        info!(
            categories = outcome.category_count,
            expenses = outcome.expense_count,
            "Data imported"
        );
        Ok(outcome)
    }

    // === Persistence ===

    /// Write the current state to storage as is
    pub fn flush(&self) -> ExpenseResult<()> {
        self.persist(&self.data)
    }

    /// Apply `change` to a copy of the state, persist it, then swap it in
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut ExpenseData) -> ExpenseResult<T>,
    ) -> ExpenseResult<T> {
        let mut working = self.data.clone();
        let result = change(&mut working)?;
        self.persist(&working)?;
        self.data = working;
        Ok(result)
    }

    fn persist(&self, data: &ExpenseData) -> ExpenseResult<()> {
        let backend = self.backend.as_ref();
        let stale: &[&str] = match self.layout {
            StorageLayout::Split => {
                save_json(backend, CATEGORIES_KEY, &data.categories)?;
                save_json(backend, EXPENSES_KEY, &data.expenses)?;
                &[COMBINED_KEY]
            }
            StorageLayout::Combined => {
                save_json(backend, COMBINED_KEY, data)?;
                &[CATEGORIES_KEY, EXPENSES_KEY]
            }
        };

        // The other layout's keys would shadow this write after a switch back
        for key in stale {
            match backend.remove(key) {
                Ok(true) => debug!(key, "Removed data left by the other storage layout"),
                Ok(false) => {}
                Err(e) => warn!(key, error = %e, "Failed to remove stale storage key"),
            }
        }
        Ok(())
    }
}

fn load_snapshot(backend: &dyn KeyValueStore, layout: StorageLayout) -> ExpenseData {
    // Each layout falls back to the other one's keys, so data written before
    // a layout switch is picked up and migrated on the next commit.
    let mut data = match layout {
        StorageLayout::Split if has_split_keys(backend) => load_split(backend),
        StorageLayout::Split => load_combined(backend).unwrap_or_else(ExpenseData::seeded),
        StorageLayout::Combined => match load_combined(backend) {
            Some(data) => data,
            None if has_split_keys(backend) => load_split(backend),
            None => ExpenseData::seeded(),
        },
    };

    let corrected = data.normalize();
    if corrected > 0 {
        warn!(corrected, "Stored data had inconsistent references");
    }
    data
}

fn has_split_keys(backend: &dyn KeyValueStore) -> bool {
    [CATEGORIES_KEY, EXPENSES_KEY]
        .iter()
        .any(|key| matches!(backend.get(key), Ok(Some(_))))
}

fn load_split(backend: &dyn KeyValueStore) -> ExpenseData {
    let categories = match load_json::<Vec<Category>>(backend, CATEGORIES_KEY) {
        Ok(Some(categories)) => categories,
        Ok(None) => default_categories(),
        Err(e) => {
            warn!(error = %e, "Stored categories unreadable, using defaults");
            default_categories()
        }
    };

    let expenses = match load_json::<Vec<Expense>>(backend, EXPENSES_KEY) {
        Ok(Some(expenses)) => expenses,
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "Stored expenses unreadable, starting empty");
            Vec::new()
        }
    };

    ExpenseData {
        categories,
        expenses,
    }
}

fn load_combined(backend: &dyn KeyValueStore) -> Option<ExpenseData> {
    match load_json::<CombinedRecord>(backend, COMBINED_KEY) {
        Ok(Some(record)) => Some(ExpenseData {
            categories: record.categories.unwrap_or_else(default_categories),
            expenses: record.expenses.unwrap_or_default(),
        }),
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "Stored data unreadable, using defaults");
            None
        }
    }
}
