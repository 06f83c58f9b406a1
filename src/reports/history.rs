//! Expense history
//!
//! Filtered expense listing, most recent first.

use std::cmp::Reverse;

use super::breakdown::PeriodFilter;
use crate::models::{CategoryId, Expense, Money};

/// Category and period narrowing for the history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    /// Only expenses of this category; all categories when `None`
    pub category: Option<CategoryId>,
    pub period: PeriodFilter,
}

/// Expenses matching a filter, newest first
#[derive(Debug, Clone)]
pub struct ExpenseHistory<'a> {
    pub filter: HistoryFilter,
    pub entries: Vec<&'a Expense>,
}

impl<'a> ExpenseHistory<'a> {
    /// Filter and sort by date descending; equal dates keep insertion order
    pub fn query(expenses: &'a [Expense], filter: HistoryFilter) -> Self {
        let mut entries: Vec<&Expense> = expenses
            .iter()
            .filter(|e| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |id| e.category_id() == id)
                    && filter.period.matches(e)
            })
            .collect();
        entries.sort_by_key(|e| Reverse(e.date));

        Self { filter, entries }
    }

    /// Sum of the listed amounts
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubcategoryId;
    use crate::storage::default_categories;
    use chrono::NaiveDate;

    fn fixture() -> Vec<Expense> {
        let categories = default_categories();
        let sub = |id: &str| {
            categories
                .iter()
                .find_map(|c| c.subcategory(&SubcategoryId::from(id)))
                .unwrap()
                .clone()
        };
        let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();

        vec![
            Expense::new(Money::from_cents(100), day(1, 5), &sub("1-1")),
            Expense::new(Money::from_cents(200), day(3, 1), &sub("2-1")),
            Expense::new(Money::from_cents(300), day(1, 5), &sub("1-3")),
            Expense::new(Money::from_cents(400), day(2, 9), &sub("1-2")),
        ]
    }

    #[test]
    fn test_sorted_newest_first_and_stable() {
        let expenses = fixture();
        let history = ExpenseHistory::query(&expenses, HistoryFilter::default());

        let cents: Vec<_> = history.entries.iter().map(|e| e.amount.cents()).collect();
        assert_eq!(cents, [200, 400, 100, 300]);
        assert_eq!(history.total().cents(), 1000);
    }

    #[test]
    fn test_category_and_month_filter() {
        let expenses = fixture();
        let filter = HistoryFilter {
            category: Some(CategoryId::from("1")),
            period: PeriodFilter {
                month: Some(1),
                year: Some(2024),
            },
        };

        let history = ExpenseHistory::query(&expenses, filter);
        assert_eq!(history.len(), 2);
        assert!(history.entries.iter().all(|e| e.category_id().as_str() == "1"));
    }

    #[test]
    fn test_no_match() {
        let expenses = fixture();
        let filter = HistoryFilter {
            category: None,
            period: PeriodFilter {
                month: None,
                year: Some(1999),
            },
        };
        assert!(ExpenseHistory::query(&expenses, filter).is_empty());
    }
}
