//! Service layer for the expense tracker
//!
//! The stores own the in-memory state and are the only mutation surface;
//! `Tracker` opens both over one shared backend and carries the export and
//! import that span them.

pub mod expense;
pub mod shopping;

pub use expense::{ExpenseData, ExpenseStore, ImportOutcome};
pub use shopping::ShoppingListStore;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::export::ExchangeData;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageLayout};

/// Both stores over one shared key-value backend
pub struct Tracker {
    pub expenses: ExpenseStore,
    pub shopping: ShoppingListStore,
}

impl Tracker {
    /// Open both stores on `backend`
    pub fn open(backend: Arc<dyn KeyValueStore>, layout: StorageLayout) -> Self {
        Self {
            expenses: ExpenseStore::open(backend.clone(), layout),
            shopping: ShoppingListStore::open(backend),
        }
    }

    /// Open a throwaway tracker that keeps everything in memory
    pub fn open_in_memory() -> Self {
        Self::open(Arc::new(MemoryStore::new()), StorageLayout::default())
    }

    /// Open the file-backed tracker under the configured data directory
    pub fn open_at(paths: &ExpensePaths, settings: &Settings) -> Self {
        debug!(dir = %paths.data_dir().display(), layout = ?settings.storage_layout, "Opening tracker");
        let backend = Arc::new(FileStore::new(paths.data_dir()));
        Self::open(backend, settings.storage_layout)
    }

    /// Write both stores to storage, e.g. to materialize the default seed
    pub fn flush(&self) -> ExpenseResult<()> {
        self.expenses.flush()?;
        self.shopping.flush()
    }

    /// Everything the tracker holds as one exchange document
    pub fn exchange(&self) -> ExchangeData {
        let mut exchange = self.expenses.to_exchange();
        exchange.shopping_lists = Some(self.shopping.lists().to_vec());
        exchange
    }

    /// Serialize categories, expenses and shopping lists
    pub fn export_data(&self) -> ExpenseResult<String> {
        self.exchange().to_json_pretty()
    }

    /// Import an exchange document
    ///
    /// Shopping lists are replaced only when the document carries them;
    /// older files without `shoppingLists` leave the current lists alone.
    /// If any write fails, neither store changes in memory.
    pub fn import_data(&mut self, text: &str) -> ExpenseResult<ImportOutcome> {
        let exchange = ExchangeData::parse(text).map_err(|e| {
            warn!(error = %e, "Import rejected");
            e
        })?;

        // Lists first; put back below if the expense data fails to persist
        let previous_lists = match &exchange.shopping_lists {
            Some(lists) => {
                let previous = self.shopping.lists().to_vec();
                self.shopping.replace_all(lists.clone())?;
                Some(previous)
            }
            None => None,
        };

        let outcome = match self.expenses.import_exchange(exchange) {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(previous) = previous_lists {
                    if let Err(restore) = self.shopping.replace_all(previous) {
                        warn!(error = %restore, "Failed to restore shopping lists after import error");
                    }
                }
                return Err(e);
            }
        };

        if let Some(lists) = &outcome.shopping_lists {
            info!(lists = lists.len(), "Shopping lists imported");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpenseError;
    use crate::models::{Money, ShoppingItem, SubcategoryId};
    use crate::storage::{EXPENSES_KEY, SHOPPING_LISTS_KEY};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn seeded_tracker() -> Tracker {
        let mut tracker = Tracker::open_in_memory();
        tracker
            .expenses
            .add_expense(
                Money::from_units(12.5),
                NaiveDate::from_ymd_opt(2024, 7, 14).unwrap(),
                &SubcategoryId::from("1-2"),
            )
            .unwrap();
        tracker
            .shopping
            .create(
                "Groceries",
                vec![ShoppingItem::new("Eggs", 12, Money::from_cents(30)).unwrap()],
            )
            .unwrap();
        tracker
    }

    #[test]
    fn test_export_includes_shopping_lists() {
        let tracker = seeded_tracker();
        let text = tracker.export_data().unwrap();

        let parsed = ExchangeData::parse(&text).unwrap();
        assert_eq!(parsed.categories.len(), 2);
        assert_eq!(parsed.expenses.len(), 1);
        assert_eq!(parsed.shopping_lists.map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_full_round_trip() {
        let source = seeded_tracker();
        let text = source.export_data().unwrap();

        let mut target = Tracker::open_in_memory();
        target.import_data(&text).unwrap();

        assert_eq!(target.expenses.snapshot(), source.expenses.snapshot());
        assert_eq!(target.shopping.lists(), source.shopping.lists());
    }

    #[test]
    fn test_older_file_keeps_shopping_lists() {
        let mut tracker = seeded_tracker();
        let lists_before = tracker.shopping.lists().to_vec();

        let outcome = tracker
            .import_data(r#"{"categories": [], "expenses": []}"#)
            .unwrap();

        assert!(outcome.shopping_lists.is_none());
        assert!(tracker.expenses.categories().is_empty());
        assert_eq!(tracker.shopping.lists(), lists_before.as_slice());
    }

    #[test]
    fn test_rejected_import_keeps_everything() {
        let mut tracker = seeded_tracker();
        let before = tracker.exchange();

        assert!(tracker.import_data(r#"{"shoppingLists": []}"#).is_err());
        assert_eq!(tracker.exchange(), before);
    }

    /// Backend that refuses writes to one key
    struct RefusingStore {
        inner: MemoryStore,
        refused: &'static str,
    }

    impl KeyValueStore for RefusingStore {
        fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> ExpenseResult<()> {
            if key == self.refused {
                return Err(ExpenseError::Storage(format!("{} is not writable", key)));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> ExpenseResult<bool> {
            self.inner.remove(key)
        }
    }

    fn refusing_tracker(refused: &'static str) -> Tracker {
        let backend = Arc::new(RefusingStore {
            inner: MemoryStore::new(),
            refused,
        });
        Tracker::open(backend, StorageLayout::Split)
    }

    const FULL_DOCUMENT: &str = r#"{"categories": [], "expenses": [], "shoppingLists": []}"#;

    #[test]
    fn test_failed_list_write_leaves_expense_data_alone() {
        let mut tracker = refusing_tracker(SHOPPING_LISTS_KEY);
        let before = tracker.exchange();

        assert!(tracker.import_data(FULL_DOCUMENT).unwrap_err().is_storage());
        assert_eq!(tracker.exchange(), before);
        assert_eq!(tracker.expenses.categories().len(), 2);
    }

    #[test]
    fn test_failed_expense_write_restores_lists() {
        let mut tracker = refusing_tracker(EXPENSES_KEY);
        tracker
            .shopping
            .create(
                "Groceries",
                vec![ShoppingItem::new("Eggs", 12, Money::from_cents(30)).unwrap()],
            )
            .unwrap();
        let before = tracker.exchange();

        assert!(tracker.import_data(FULL_DOCUMENT).unwrap_err().is_storage());
        assert_eq!(tracker.exchange(), before);

        tracker.shopping.reload();
        assert_eq!(Some(tracker.shopping.lists().to_vec()), before.shopping_lists);
    }

    #[test]
    fn test_file_backed_tracker_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        {
            let mut tracker = Tracker::open_at(&paths, &settings);
            tracker.expenses.add_category("Books").unwrap();
        }

        let tracker = Tracker::open_at(&paths, &settings);
        assert!(tracker.expenses.find_category("books").is_some());
        assert!(paths.data_dir().join("categories.json").exists());
    }
}
