//! Export module for the expense tracker
//!
//! Provides data export in multiple formats:
//! - JSON: the exchange document, which import reads back
//! - YAML: the same document for reading
//! - CSV: flat expense rows for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::ExchangeData;
pub use yaml::export_yaml;

use chrono::NaiveDate;

/// Prefix used for export files unless configured otherwise
pub const DEFAULT_EXPORT_PREFIX: &str = "expenses_backup";

/// File name for an export made on `date`: `<prefix>_<YYYY-MM-DD>.<ext>`
pub fn suggested_filename(prefix: &str, date: NaiveDate, extension: &str) -> String {
    let prefix = match prefix.trim() {
        "" => DEFAULT_EXPORT_PREFIX,
        p => p,
    };
    format!(
        "{}_{}.{}",
        prefix,
        date.format("%Y-%m-%d"),
        extension.trim_start_matches('.')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            suggested_filename(DEFAULT_EXPORT_PREFIX, date, "json"),
            "expenses_backup_2024-03-09.json"
        );
        assert_eq!(suggested_filename("", date, ".csv"), "expenses_backup_2024-03-09.csv");
        assert_eq!(suggested_filename("mine", date, "yaml"), "mine_2024-03-09.yaml");
    }
}
