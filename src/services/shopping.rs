//! Shopping list store
//!
//! Lists are kept apart from the expense data and persisted as one JSON
//! array under their own key.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ShoppingItem, ShoppingList, ShoppingListId};
use crate::storage::{load_json, save_json, KeyValueStore, SHOPPING_LISTS_KEY};

/// In-memory shopping lists mirrored to a key-value store
pub struct ShoppingListStore {
    backend: Arc<dyn KeyValueStore>,
    lists: Vec<ShoppingList>,
}

impl ShoppingListStore {
    /// Open the store, loading any persisted lists
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let lists = load_lists(backend.as_ref());
        Self { backend, lists }
    }

    /// Re-read the persisted lists, discarding in-memory state
    pub fn reload(&mut self) {
        self.lists = load_lists(self.backend.as_ref());
    }

    /// All lists in creation order
    pub fn lists(&self) -> &[ShoppingList] {
        &self.lists
    }

    /// Get a list by ID
    pub fn get(&self, id: &ShoppingListId) -> Option<&ShoppingList> {
        self.lists.iter().find(|l| &l.id == id)
    }

    /// Find a list by ID, short ID prefix or title (case-insensitive)
    pub fn find(&self, identifier: &str) -> Option<&ShoppingList> {
        let identifier = identifier.trim();
        if let Some(list) = self.get(&ShoppingListId::from(identifier)) {
            return Some(list);
        }

        let lower = identifier.to_lowercase();
        self.lists
            .iter()
            .find(|l| !identifier.is_empty() && l.id.as_str().starts_with(identifier))
            .or_else(|| self.lists.iter().find(|l| l.title.to_lowercase() == lower))
    }

    /// Create and persist a new list
    pub fn create(&mut self, title: &str, items: Vec<ShoppingItem>) -> ExpenseResult<ShoppingList> {
        let list = ShoppingList::new(title, items);
        list.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.commit(|lists| {
            lists.push(list.clone());
            Ok(())
        })?;

        debug!(list = %list.id, items = list.items.len(), "Shopping list created");
        Ok(list)
    }

    /// Replace title and items of a list, keeping its id and creation time
    ///
    /// Returns `Ok(None)` if the list is absent.
    pub fn update(
        &mut self,
        id: &ShoppingListId,
        title: &str,
        items: Vec<ShoppingItem>,
    ) -> ExpenseResult<Option<ShoppingList>> {
        let Some(existing) = self.get(id) else {
            return Ok(None);
        };

        let mut updated = existing.clone();
        updated.title = title.trim().to_string();
        updated.items = items;
        updated
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.commit(|lists| {
            if let Some(slot) = lists.iter_mut().find(|l| &l.id == id) {
                *slot = updated.clone();
            }
            Ok(())
        })?;

        debug!(list = %id, "Shopping list updated");
        Ok(Some(updated))
    }

    /// Delete a list; `false` if it was not there
    pub fn delete(&mut self, id: &ShoppingListId) -> ExpenseResult<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        self.commit(|lists| {
            lists.retain(|l| &l.id != id);
            Ok(())
        })?;

        debug!(list = %id, "Shopping list deleted");
        Ok(true)
    }

    /// Replace every list at once
    pub fn replace_all(&mut self, lists: Vec<ShoppingList>) -> ExpenseResult<()> {
        let count = lists.len();
        self.commit(move |current| {
            *current = lists;
            Ok(())
        })?;

        debug!(count, "Shopping lists replaced");
        Ok(())
    }

    /// Write the current lists to storage as is
    pub fn flush(&self) -> ExpenseResult<()> {
        save_json(self.backend.as_ref(), SHOPPING_LISTS_KEY, &self.lists)
    }

    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<ShoppingList>) -> ExpenseResult<T>,
    ) -> ExpenseResult<T> {
        let mut working = self.lists.clone();
        let result = change(&mut working)?;
        save_json(self.backend.as_ref(), SHOPPING_LISTS_KEY, &working)?;
        self.lists = working;
        Ok(result)
    }
}

fn load_lists(backend: &dyn KeyValueStore) -> Vec<ShoppingList> {
    match load_json::<Vec<ShoppingList>>(backend, SHOPPING_LISTS_KEY) {
        Ok(Some(lists)) => lists,
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "Stored shopping lists unreadable, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::MemoryStore;

    fn item(name: &str, quantity: u32, cents: i64) -> ShoppingItem {
        ShoppingItem::new(name, quantity, Money::from_cents(cents)).unwrap()
    }

    fn open_store() -> (Arc<MemoryStore>, ShoppingListStore) {
        let backend = Arc::new(MemoryStore::new());
        let store = ShoppingListStore::open(backend.clone());
        (backend, store)
    }

    #[test]
    fn test_create_and_totals() {
        let (_backend, mut store) = open_store();
        let list = store
            .create("Weekly", vec![item("Milk", 2, 150), item("Bread", 1, 300)])
            .unwrap();

        assert_eq!(list.total().cents(), 600);
        assert_eq!(list.unit_count(), 3);
        assert_eq!(store.lists().len(), 1);
        assert_eq!(store.get(&list.id), Some(&list));
    }

    #[test]
    fn test_create_requires_title_and_items() {
        let (backend, mut store) = open_store();

        assert!(store.create("  ", vec![item("Milk", 1, 100)]).unwrap_err().is_validation());
        assert!(store.create("Empty", Vec::new()).unwrap_err().is_validation());
        assert!(store.lists().is_empty());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_update_keeps_identity() {
        let (_backend, mut store) = open_store();
        let list = store.create("Party", vec![item("Chips", 3, 250)]).unwrap();

        let updated = store
            .update(&list.id, "Party!", vec![item("Soda", 6, 199)])
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, list.id);
        assert_eq!(updated.created_at, list.created_at);
        assert_eq!(updated.title, "Party!");
        assert_eq!(updated.total().cents(), 1194);

        let missing = store
            .update(&ShoppingListId::from("nope"), "x", vec![item("a", 1, 1)])
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_delete() {
        let (_backend, mut store) = open_store();
        let list = store.create("Once", vec![item("Tape", 1, 500)]).unwrap();

        assert!(store.delete(&list.id).unwrap());
        assert!(!store.delete(&list.id).unwrap());
        assert!(store.lists().is_empty());
    }

    #[test]
    fn test_find_by_title_or_prefix() {
        let (_backend, mut store) = open_store();
        let list = store.create("Hardware", vec![item("Nails", 100, 2)]).unwrap();

        assert_eq!(store.find("hardware").map(|l| &l.id), Some(&list.id));
        assert_eq!(store.find(list.id.short()).map(|l| &l.id), Some(&list.id));
        assert!(store.find("garden").is_none());
    }

    #[test]
    fn test_persists_across_reopen() {
        let (backend, mut store) = open_store();
        store.create("Keep", vec![item("Salt", 1, 90)]).unwrap();

        let reopened = ShoppingListStore::open(backend);
        assert_eq!(reopened.lists(), store.lists());
    }

    #[test]
    fn test_reload_picks_up_stored_lists() {
        let (backend, mut store) = open_store();
        store.create("Mine", vec![item("Salt", 1, 90)]).unwrap();

        let mut other = ShoppingListStore::open(backend.clone());
        let theirs = other.create("Theirs", vec![item("Soap", 2, 350)]).unwrap();
        assert_eq!(store.lists().len(), 1);

        store.reload();
        assert_eq!(store.lists(), other.lists());
        assert_eq!(store.get(&theirs.id), Some(&theirs));

        backend.set(SHOPPING_LISTS_KEY, "[{").unwrap();
        store.reload();
        assert!(store.lists().is_empty());
    }

    #[test]
    fn test_garbage_falls_back_to_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(SHOPPING_LISTS_KEY, "[{").unwrap();

        let store = ShoppingListStore::open(backend);
        assert!(store.lists().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_lists_unchanged() {
        let (backend, mut store) = open_store();
        let list = store.create("Keep", vec![item("Salt", 1, 90)]).unwrap();

        backend.set_read_only(true);
        assert!(store.delete(&list.id).is_err());
        assert!(store.replace_all(Vec::new()).is_err());
        assert_eq!(store.lists(), &[list]);
    }
}
