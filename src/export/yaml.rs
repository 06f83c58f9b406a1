//! YAML export
//!
//! The exchange document in YAML form, for reading and diffing. Import
//! only reads the JSON form.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::ExchangeData;

/// Write the exchange document as YAML with a short header comment
pub fn export_yaml<W: Write>(data: &ExchangeData, mut writer: W) -> ExpenseResult<()> {
    let header = format!(
        "# Expense tracker export\n# Categories: {}, expenses: {}\n\n",
        data.categories.len(),
        data.expenses.len()
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, data).map_err(|e| ExpenseError::Export(e.to_string()))
}
