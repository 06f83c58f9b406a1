//! User settings for the expense tracker
//!
//! Display preferences, the export file prefix and the storage layout.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::storage::{write_text_atomic, StorageLayout};

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Prefix of suggested export file names
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,

    /// How categories and expenses are laid out in storage
    #[serde(default)]
    pub storage_layout: StorageLayout,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_export_prefix() -> String {
    crate::export::DEFAULT_EXPORT_PREFIX.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            export_prefix: default_export_prefix(),
            storage_layout: StorageLayout::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_text_atomic(paths.settings_file(), &contents)
    }

    /// Set one setting by its key name
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ExpenseError> {
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => {
                if value.trim().is_empty() {
                    return Err(ExpenseError::Config("Date format cannot be empty".into()));
                }
                if !is_valid_date_format(value) {
                    return Err(ExpenseError::Config(format!(
                        "Invalid date format '{}'",
                        value
                    )));
                }
                self.date_format = value.to_string();
            }
            "export_prefix" => {
                let prefix = value.trim();
                if prefix.is_empty() {
                    return Err(ExpenseError::Config("Export prefix cannot be empty".into()));
                }
                self.export_prefix = prefix.to_string();
            }
            "storage_layout" => {
                self.storage_layout = match value.trim().to_lowercase().as_str() {
                    "split" => StorageLayout::Split,
                    "combined" => StorageLayout::Combined,
                    other => {
                        return Err(ExpenseError::Config(format!(
                            "Unknown storage layout '{}'. Use split or combined",
                            other
                        )))
                    }
                };
            }
            other => {
                return Err(ExpenseError::Config(format!("Unknown setting '{}'", other)));
            }
        }
        Ok(())
    }

    /// Key/value pairs for display
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let layout = match self.storage_layout {
            StorageLayout::Split => "split",
            StorageLayout::Combined => "combined",
        };
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("date_format", self.date_format.clone()),
            ("export_prefix", self.export_prefix.clone()),
            ("storage_layout", layout.to_string()),
        ]
    }
}

/// Whether chrono can render dates with this strftime format
fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
