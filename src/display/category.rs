//! Category display formatting
//!
//! Categories with their subcategories as a tree, plus a detail view.

use crate::models::{Category, Expense, Money};

/// Format categories as a tree with subcategories beneath each
pub fn format_category_tree(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nAdd one with 'expense category add <NAME>'.".to_string();
    }

    let mut output = String::new();

    for (i, category) in categories.iter().enumerate() {
        output.push_str(&format!(
            "{} {} [{}]\n",
            category.name,
            category.color,
            category.id.short()
        ));

        if category.subcategories.is_empty() {
            output.push_str("  (no subcategories)\n");
        } else {
            for (j, sub) in category.subcategories.iter().enumerate() {
                let is_last = j == category.subcategories.len() - 1;
                let prefix = if is_last { "└── " } else { "├── " };
                output.push_str(&format!("  {}{} [{}]\n", prefix, sub.name, sub.id.short()));
            }
        }

        if i < categories.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// Format one category with its spending per subcategory
pub fn format_category_details(category: &Category, expenses: &[Expense], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:            {}\n", category.id));
    output.push_str(&format!("  Color:         {}\n", category.color));
    output.push_str(&format!(
        "  Subcategories: {}\n",
        category.subcategories.len()
    ));

    let mut total = Money::zero();
    for sub in &category.subcategories {
        let spent: Money = expenses
            .iter()
            .filter(|e| e.subcategory_id == sub.id)
            .map(|e| e.amount)
            .sum();
        total += spent;
        output.push_str(&format!(
            "    {:<24} {:>12}\n",
            sub.name,
            spent.format_with_symbol(symbol)
        ));
    }

    output.push_str(&format!("  Total spent:   {}\n", total.format_with_symbol(symbol)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::default_categories;
    use chrono::NaiveDate;

    #[test]
    fn test_tree_lists_subcategories() {
        let tree = format_category_tree(&default_categories());
        assert!(tree.contains("Food #10B981 [1]"));
        assert!(tree.contains("├── Groceries [1-1]"));
        assert!(tree.contains("└── Public Transport [2-3]"));
    }

    #[test]
    fn test_empty_tree() {
        assert!(format_category_tree(&[]).starts_with("No categories found."));
    }

    #[test]
    fn test_details_totals() {
        let categories = default_categories();
        let food = &categories[0];
        let expenses = vec![
            Expense::new(
                Money::from_cents(1250),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                &food.subcategories[0],
            ),
            Expense::new(
                Money::from_cents(750),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                &food.subcategories[1],
            ),
        ];

        let details = format_category_details(food, &expenses, "$");
        assert!(details.contains("Total spent:   $20.00"));
        assert!(details.contains("$12.50"));
    }
}
