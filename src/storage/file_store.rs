//! File-backed key-value store
//!
//! Each key maps to `<dir>/<key>.json`. Writes go through the atomic
//! temp-file-and-rename path so a crash never leaves a half-written value.

use std::fs;
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::{read_text, write_text_atomic};
use super::KeyValueStore;

/// Durable store keeping one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> ExpenseResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ExpenseError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
        read_text(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> ExpenseResult<()> {
        write_text_atomic(self.path_for(key)?, value)
    }

    fn remove(&self, key: &str) -> ExpenseResult<bool> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to remove {}: {}", path.display(), e))
        })?;
        Ok(true)
    }
}
