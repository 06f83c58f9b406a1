//! Spending breakdown
//!
//! Totals per category or per subcategory for a month, a year, or all time.

use std::collections::BTreeSet;

use crate::models::{Category, Expense, Money, SubcategoryId};

/// Month and year narrowing; `None` means "all"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    /// Calendar month, 1 through 12
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PeriodFilter {
    /// No narrowing
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether the expense falls inside the period
    pub fn matches(&self, expense: &Expense) -> bool {
        self.month.map_or(true, |m| expense.month() == m)
            && self.year.map_or(true, |y| expense.year() == y)
    }

    /// Human label such as `03/2024`, `2024` or `All time`
    pub fn label(&self) -> String {
        match (self.month, self.year) {
            (Some(m), Some(y)) => format!("{:02}/{}", m, y),
            (Some(m), None) => format!("Month {:02}, all years", m),
            (None, Some(y)) => y.to_string(),
            (None, None) => "All time".to_string(),
        }
    }
}

/// One slice of a breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSlice {
    /// Category or subcategory name
    pub name: String,
    /// Parent category name for subcategory slices
    pub parent: Option<String>,
    /// Display color of the (parent) category
    pub color: String,
    pub total: Money,
    pub expense_count: usize,
    /// Share of the grand total, 0 to 100
    pub percentage: f64,
}

/// Spending grouped into slices
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingBreakdown {
    pub period: PeriodFilter,
    /// Slices with a non-zero total, in category order
    pub slices: Vec<BreakdownSlice>,
    pub grand_total: Money,
}

impl SpendingBreakdown {
    /// One slice per category that has spending in the period
    pub fn by_category(
        categories: &[Category],
        expenses: &[Expense],
        period: PeriodFilter,
    ) -> Self {
        let in_period: Vec<&Expense> = expenses.iter().filter(|e| period.matches(e)).collect();

        let slices = categories
            .iter()
            .filter_map(|category| {
                let (total, count) =
                    sum_where(&in_period, |e| e.category_id() == &category.id);
                (total.is_positive()).then(|| BreakdownSlice {
                    name: category.name.clone(),
                    parent: None,
                    color: category.color.clone(),
                    total,
                    expense_count: count,
                    percentage: 0.0,
                })
            })
            .collect();

        Self::finish(period, slices)
    }

    /// One slice per subcategory that has spending in the period
    ///
    /// With `only` set, the breakdown is narrowed to that one subcategory.
    pub fn by_subcategory(
        categories: &[Category],
        expenses: &[Expense],
        period: PeriodFilter,
        only: Option<&SubcategoryId>,
    ) -> Self {
        let in_period: Vec<&Expense> = expenses.iter().filter(|e| period.matches(e)).collect();

        let slices = categories
            .iter()
            .flat_map(|category| category.subcategories.iter().map(move |s| (category, s)))
            .filter(|(_, sub)| only.map_or(true, |id| &sub.id == id))
            .filter_map(|(category, sub)| {
                let (total, count) = sum_where(&in_period, |e| e.subcategory_id == sub.id);
                (total.is_positive()).then(|| BreakdownSlice {
                    name: sub.name.clone(),
                    parent: Some(category.name.clone()),
                    color: category.color.clone(),
                    total,
                    expense_count: count,
                    percentage: 0.0,
                })
            })
            .collect();

        Self::finish(period, slices)
    }

    /// Whether nothing was spent in the period
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    fn finish(period: PeriodFilter, mut slices: Vec<BreakdownSlice>) -> Self {
        let grand_total: Money = slices.iter().map(|s| s.total).sum();
        if grand_total.is_positive() {
            for slice in &mut slices {
                slice.percentage = slice.total.cents() as f64 / grand_total.cents() as f64 * 100.0;
            }
        }

        Self {
            period,
            slices,
            grand_total,
        }
    }
}

/// Distinct years with expenses, most recent first
pub fn available_years(expenses: &[Expense]) -> Vec<i32> {
    let years: BTreeSet<i32> = expenses.iter().map(Expense::year).collect();
    years.into_iter().rev().collect()
}

fn sum_where(expenses: &[&Expense], pred: impl Fn(&Expense) -> bool) -> (Money, usize) {
    expenses
        .iter()
        .filter(|e| pred(**e))
        .fold((Money::zero(), 0), |(total, count), e| (total + e.amount, count + 1))
}
