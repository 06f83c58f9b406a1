//! Storage layer for the expense tracker
//!
//! The stores persist through a small string-keyed key-value interface, the
//! same shape as browser local storage. `FileStore` keeps one JSON file per
//! key with atomic writes; `MemoryStore` is a volatile stand-in for tests.

pub mod file_io;
pub mod file_store;
pub mod init;
pub mod memory;

pub use file_io::{read_text, write_text_atomic};
pub use file_store::FileStore;
pub use init::default_categories;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};

/// Key holding the JSON array of categories (split layout)
pub const CATEGORIES_KEY: &str = "categories";

/// Key holding the JSON array of expenses (split layout)
pub const EXPENSES_KEY: &str = "expenses";

/// Key holding `{categories, expenses}` together (combined layout)
pub const COMBINED_KEY: &str = "expense_tracker_data";

/// Key holding the JSON array of shopping lists
pub const SHOPPING_LISTS_KEY: &str = "shopping-lists";

/// Durable string-keyed storage
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> ExpenseResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> ExpenseResult<()>;

    /// Remove `key`, returning whether it was present
    fn remove(&self, key: &str) -> ExpenseResult<bool>;
}

/// How the expense data is laid out across keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageLayout {
    /// Categories and expenses under separate keys
    #[default]
    Split,
    /// Both under one key, as a `{categories, expenses}` object
    Combined,
}

/// Read and decode a JSON value, `Ok(None)` when the key is absent
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> ExpenseResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| ExpenseError::Json(format!("Failed to parse {}: {}", key, e))),
        None => Ok(None),
    }
}

/// Encode a value as JSON and store it under `key`
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> ExpenseResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        assert_eq!(load_json::<Vec<u32>>(&store, "numbers").unwrap(), None);

        save_json(&store, "numbers", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(
            load_json::<Vec<u32>>(&store, "numbers").unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_load_json_reports_garbage() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();

        let err = load_json::<Vec<u32>>(&store, "numbers").unwrap_err();
        assert!(matches!(err, ExpenseError::Json(_)));
    }

    #[test]
    fn test_layout_serialization() {
        assert_eq!(
            serde_json::to_string(&StorageLayout::Combined).unwrap(),
            "\"combined\""
        );
        assert_eq!(StorageLayout::default(), StorageLayout::Split);
    }
}
