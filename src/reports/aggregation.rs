//! Expense aggregation
//!
//! Pure single-pass reductions over an expense snapshot. Degenerate inputs
//! (empty slices, empty ranges) yield zero or empty values, never errors.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{category, Expense, Money, Month};

/// Expenses dated within `start..=end`, in input order
pub fn filter_by_range(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .cloned()
        .collect()
}

/// Sum per category id; categories with no expenses are absent
pub fn totals_by_category(expenses: &[Expense]) -> BTreeMap<String, Money> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals
            .entry(expense.category.clone())
            .or_insert_with(Money::zero) += expense.amount;
    }
    totals
}

/// Category with the largest total
///
/// Ties go to the alphabetically smallest category id.
pub fn top_category(expenses: &[Expense]) -> Option<String> {
    let mut top: Option<(String, Money)> = None;
    for (category, amount) in totals_by_category(expenses) {
        match &top {
            Some((_, best)) if amount <= *best => {}
            _ => top = Some((category, amount)),
        }
    }
    top.map(|(category, _)| category)
}

pub fn total(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Mean amount rounded to the nearest cent; zero when empty
pub fn average(expenses: &[Expense]) -> Money {
    total(expenses).div_round(expenses.len())
}

/// Largest single amount; zero when empty
pub fn maximum(expenses: &[Expense]) -> Money {
    expenses
        .iter()
        .map(|e| e.amount)
        .max()
        .unwrap_or_default()
}

/// Spending total for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTotal {
    pub month: Month,
    pub total: Money,
}

/// Totals for the `months_back` calendar months ending with `today`'s month
///
/// Always exactly `months_back` entries, oldest first, zero-filled.
pub fn monthly_trend(expenses: &[Expense], months_back: usize, today: NaiveDate) -> Vec<MonthTotal> {
    let current = Month::of(today);
    (0..months_back)
        .rev()
        .map(|offset| {
            let month = current.back(offset);
            let total = expenses
                .iter()
                .filter(|e| month.contains(e.date))
                .map(|e| e.amount)
                .sum();
            MonthTotal { month, total }
        })
        .collect()
}

/// Expenses bucketed by calendar date (ascending; iterate `.rev()` for newest first)
pub fn group_by_date(expenses: &[Expense]) -> BTreeMap<NaiveDate, Vec<&Expense>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Expense>> = BTreeMap::new();
    for expense in expenses {
        groups.entry(expense.date).or_default().push(expense);
    }
    groups
}

/// One row of the per-category breakdown
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    pub category_id: String,
    pub category_name: &'static str,
    pub amount: Money,
    pub count: usize,
    /// Share of the overall total, 0-100
    pub percentage: f64,
}

/// Summary statistics over a set of expenses
#[derive(Debug, Clone)]
pub struct SpendingInsights {
    pub total: Money,
    pub count: usize,
    pub average: Money,
    pub maximum: Money,
    pub top_category: Option<String>,
    /// Sorted by amount, largest first
    pub categories: Vec<CategoryBreakdown>,
}

impl SpendingInsights {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let total = total(expenses);

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for expense in expenses {
            *counts.entry(expense.category.as_str()).or_default() += 1;
        }

        let mut categories: Vec<_> = totals_by_category(expenses)
            .into_iter()
            .map(|(category_id, amount)| {
                let percentage = if total.is_zero() {
                    0.0
                } else {
                    amount.cents() as f64 / total.cents() as f64 * 100.0
                };
                CategoryBreakdown {
                    count: counts.get(category_id.as_str()).copied().unwrap_or(0),
                    category_name: category::lookup(&category_id).name,
                    category_id,
                    amount,
                    percentage,
                }
            })
            .collect();
        // Stable sort keeps alphabetical order among equal amounts
        categories.sort_by(|a, b| b.amount.cmp(&a.amount));

        Self {
            total,
            count: expenses.len(),
            average: average(expenses),
            maximum: maximum(expenses),
            top_category: top_category(expenses),
            categories,
        }
    }

    /// Format the insights for terminal display
    pub fn format_terminal(&self, title: &str, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Insights: {}\n", title));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Spent:    {}\n", self.total.format_with_symbol(symbol)));
        output.push_str(&format!("Expenses:       {}\n", self.count));
        output.push_str(&format!("Average:        {}\n", self.average.format_with_symbol(symbol)));
        output.push_str(&format!("Largest:        {}\n", self.maximum.format_with_symbol(symbol)));
        let top = self
            .top_category
            .as_deref()
            .map(|id| category::lookup(id).name)
            .unwrap_or("-");
        output.push_str(&format!("Top Category:   {}\n\n", top));

        if self.categories.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<25} {:>14} {:>7} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<25} {:>14} {:>7} {:>6.1}%\n",
                row.category_name,
                row.amount.format_with_symbol(symbol),
                row.count,
                row.percentage
            ));
        }

        output
    }
}
