//! CSV export
//!
//! One row per expense with category and subcategory names resolved.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense};

const UNKNOWN: &str = "Unknown";

/// Write every expense as a CSV row
///
/// Columns: `id, date, category, subcategory, amount`. Amounts are plain
/// decimals without a currency symbol.
pub fn export_expenses_csv<W: Write>(
    categories: &[Category],
    expenses: &[Expense],
    writer: W,
) -> ExpenseResult<()> {
    let category_names: HashMap<_, _> = categories.iter().map(|c| (&c.id, &c.name)).collect();
    let subcategory_names: HashMap<_, _> = categories
        .iter()
        .flat_map(|c| c.subcategories.iter())
        .map(|s| (&s.id, &s.name))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["id", "date", "category", "subcategory", "amount"])
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    for expense in expenses {
        let category = category_names
            .get(expense.category_id())
            .map(|n| n.as_str())
            .unwrap_or(UNKNOWN);
        let subcategory = subcategory_names
            .get(&expense.subcategory_id)
            .map(|n| n.as_str())
            .unwrap_or(UNKNOWN);

        let date = expense.date.format("%Y-%m-%d").to_string();
        let amount = expense.amount.to_string();

        csv_writer
            .write_record([
                expense.id.as_str(),
                date.as_str(),
                category,
                subcategory,
                amount.as_str(),
            ])
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}
