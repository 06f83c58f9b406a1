//! Report display formatting

use crate::reports::SpendingBreakdown;

const BAR_WIDTH: usize = 20;

/// Format a breakdown with one bar per slice
pub fn format_breakdown(breakdown: &SpendingBreakdown, title: &str, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", title, breakdown.period.label()));
    output.push_str(&"=".repeat(72));
    output.push('\n');

    if breakdown.is_empty() {
        output.push_str("No expenses in this period.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<30} {:>12} {:>6} {:>7}\n",
        "Name", "Amount", "Count", "%"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for slice in &breakdown.slices {
        let name = match &slice.parent {
            Some(parent) => format!("{} / {}", parent, slice.name),
            None => slice.name.clone(),
        };
        let filled = ((slice.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;

        output.push_str(&format!(
            "{:<30} {:>12} {:>6} {:>6.1}% {}\n",
            super::truncate(&name, 30),
            slice.total.format_with_symbol(symbol),
            slice.expense_count,
            slice.percentage,
            "█".repeat(filled.min(BAR_WIDTH))
        ));
    }

    output.push_str(&"-".repeat(72));
    output.push('\n');
    output.push_str(&format!(
        "{:<30} {:>12}\n",
        "TOTAL",
        breakdown.grand_total.format_with_symbol(symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};
    use crate::reports::PeriodFilter;
    use crate::storage::default_categories;
    use chrono::NaiveDate;

    #[test]
    fn test_breakdown_output() {
        let categories = default_categories();
        let expenses = vec![Expense::new(
            Money::from_cents(2500),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            &categories[1].subcategories[0],
        )];
        let breakdown =
            SpendingBreakdown::by_subcategory(&categories, &expenses, PeriodFilter::all(), None);

        let text = format_breakdown(&breakdown, "Spending by subcategory", "$");
        assert!(text.starts_with("Spending by subcategory: All time"));
        assert!(text.contains("Transport / Fuel"));
        assert!(text.contains("100.0%"));
        assert!(text.contains("$25.00"));
    }

    #[test]
    fn test_empty_breakdown() {
        let breakdown =
            SpendingBreakdown::by_category(&default_categories(), &[], PeriodFilter::all());
        assert!(format_breakdown(&breakdown, "Spending", "$").contains("No expenses in this period."));
    }
}
