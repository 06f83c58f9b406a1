//! Expense display formatting

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_date, truncate};
use crate::models::{Category, Expense};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subcategory")]
    subcategory: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table with category names resolved
pub fn format_expense_table<'a, I>(
    categories: &[Category],
    expenses: I,
    symbol: &str,
    date_format: &str,
) -> String
where
    I: IntoIterator<Item = &'a Expense>,
{
    let names = NameLookup::new(categories);
    let rows: Vec<ExpenseRow> = expenses
        .into_iter()
        .map(|e| ExpenseRow {
            id: e.id.short().to_string(),
            date: format_date(e.date, date_format),
            category: truncate(names.category(e), 20),
            subcategory: truncate(names.subcategory(e), 20),
            amount: e.amount.format_with_symbol(symbol),
        })
        .collect();

    if rows.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a single expense for display
pub fn format_expense_details(categories: &[Category], expense: &Expense, symbol: &str) -> String {
    let names = NameLookup::new(categories);
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "  Amount:      {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Category:    {}\n", names.category(expense)));
    output.push_str(&format!("  Subcategory: {}\n", names.subcategory(expense)));

    output
}

struct NameLookup<'a> {
    categories: HashMap<&'a str, &'a str>,
    subcategories: HashMap<&'a str, &'a str>,
}

impl<'a> NameLookup<'a> {
    fn new(categories: &'a [Category]) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|c| (c.id.as_str(), c.name.as_str()))
                .collect(),
            subcategories: categories
                .iter()
                .flat_map(|c| c.subcategories.iter())
                .map(|s| (s.id.as_str(), s.name.as_str()))
                .collect(),
        }
    }

    fn category(&self, expense: &Expense) -> &'a str {
        self.categories
            .get(expense.category_id().as_str())
            .copied()
            .unwrap_or("(deleted)")
    }

    fn subcategory(&self, expense: &Expense) -> &'a str {
        self.subcategories
            .get(expense.subcategory_id.as_str())
            .copied()
            .unwrap_or("(deleted)")
    }
}
