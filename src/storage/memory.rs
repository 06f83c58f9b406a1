//! In-memory key-value store
//!
//! Used by tests and by callers that want a throwaway tracker.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::{ExpenseError, ExpenseResult};

use super::KeyValueStore;

/// Volatile store backed by a `HashMap`
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    read_only: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a storage error
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> ExpenseResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(ExpenseError::Storage("Store is read-only".into()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ExpenseResult<()> {
        self.check_writable()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ExpenseResult<bool> {
        self.check_writable()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("categories", "[]").unwrap();
        assert_eq!(store.get("categories").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let store = MemoryStore::new();
        store.set("expenses", "[]").unwrap();
        store.set_read_only(true);

        assert!(store.set("expenses", "[1]").is_err());
        assert!(store.remove("expenses").is_err());
        assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[]"));

        store.set_read_only(false);
        assert!(store.remove("expenses").unwrap());
    }
}
