//! Shopping list display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::ShoppingList;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit")]
    value: String,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format the saved lists as a summary table
pub fn format_shopping_lists(lists: &[ShoppingList], symbol: &str) -> String {
    if lists.is_empty() {
        return "No shopping lists saved.\n".to_string();
    }

    let rows = lists.iter().map(|l| ListRow {
        id: l.id.short().to_string(),
        title: l.title.clone(),
        created: l.created_at.format("%Y-%m-%d %H:%M").to_string(),
        items: l.items.len(),
        total: l.total().format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format one list with its items and totals
pub fn format_shopping_list(list: &ShoppingList, symbol: &str) -> String {
    let rows = list.items.iter().map(|i| ItemRow {
        name: i.name.clone(),
        quantity: i.quantity,
        value: i.value.format_with_symbol(symbol),
        total: i.line_total().format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    format!(
        "{} ({})\n{}\n{} units, total {}\n",
        list.title,
        list.created_at.format("%Y-%m-%d"),
        table,
        list.unit_count(),
        list.total().format_with_symbol(symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, ShoppingItem};

    fn sample() -> ShoppingList {
        ShoppingList::new(
            "Weekend",
            vec![
                ShoppingItem::new("Coffee", 2, Money::from_cents(1590)).unwrap(),
                ShoppingItem::new("Milk", 3, Money::from_cents(499)).unwrap(),
            ],
        )
    }

    #[test]
    fn test_list_details() {
        let text = format_shopping_list(&sample(), "$");
        assert!(text.starts_with("Weekend ("));
        assert!(text.contains("$31.80"));
        assert!(text.contains("5 units, total $46.77"));
    }

    #[test]
    fn test_summary_table() {
        let text = format_shopping_lists(&[sample()], "$");
        assert!(text.contains("Weekend"));
        assert!(text.contains("$46.77"));
        assert_eq!(format_shopping_lists(&[], "$"), "No shopping lists saved.\n");
    }
}
