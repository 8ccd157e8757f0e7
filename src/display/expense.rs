//! Expense display formatting
//!
//! Tables, day-grouped lists and detail views for expenses, plus the
//! monthly trend chart and the receipt scan preview.

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::category::CATEGORIES;
use crate::models::{Expense, Money, OcrResult};
use crate::reports::{group_by_date, total, MonthTotal};

use super::format::{format_currency, format_date, relative_day_label, truncate};

const NOTES_WIDTH: usize = 30;
const TREND_BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, symbol: &str, date_format: &str) -> Self {
        Self {
            id: expense.id.short(),
            date: format_date(expense.date, date_format),
            category: expense.category_info().name.to_string(),
            amount: format_currency(expense.amount, symbol),
            notes: expense
                .notes
                .as_deref()
                .map(|n| truncate(n, NOTES_WIDTH).trim_end().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Render expenses as a table, in the given order
pub fn format_expense_table(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow::new(e, symbol, date_format))
        .collect();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format!(
        "{} expense(s), total {}\n",
        expenses.len(),
        format_currency(total(expenses), symbol)
    ));
    output
}

/// Render expenses grouped under day headings, newest day first
pub fn format_expense_days(
    expenses: &[Expense],
    today: NaiveDate,
    symbol: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    for (date, day) in group_by_date(expenses).into_iter().rev() {
        let day_total: Money = day.iter().map(|e| e.amount).sum();
        output.push_str(&format!(
            "{}  ({})\n",
            relative_day_label(date, today, date_format),
            format_currency(day_total, symbol)
        ));

        for expense in day {
            let notes = expense.notes.as_deref().unwrap_or("");
            output.push_str(&format!(
                "  {:12} {:16} {:>12}  {}\n",
                expense.id.short(),
                truncate(expense.category_info().name, 16),
                format_currency(expense.amount, symbol),
                truncate(notes, NOTES_WIDTH).trim_end()
            ));
        }
    }

    output
}

/// Full detail view of one expense
pub fn format_expense_details(expense: &Expense, symbol: &str, date_format: &str) -> String {
    let category = expense.category_info();
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", expense.id));
    output.push_str(&format!("Amount:    {}\n", format_currency(expense.amount, symbol)));
    output.push_str(&format!("Category:  {} ({})\n", category.name, category.id));
    output.push_str(&format!("Date:      {}\n", format_date(expense.date, date_format)));

    if let Some(notes) = &expense.notes {
        output.push_str(&format!("Notes:     {}\n", notes));
    }
    if let Some(receipt) = &expense.receipt_url {
        output.push_str(&format!("Receipt:   {}\n", receipt));
    }

    output.push_str(&format!(
        "Created:   {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output
}

/// Horizontal bar chart of monthly totals, scaled to the largest month
pub fn format_trend(trend: &[MonthTotal], symbol: &str) -> String {
    if trend.is_empty() {
        return "No months to show.\n".to_string();
    }

    let peak = trend.iter().map(|m| m.total.cents()).max().unwrap_or(0);
    let mut output = String::from("Monthly Spending\n");
    output.push_str(&"-".repeat(56));
    output.push('\n');

    for entry in trend {
        let filled = if peak > 0 {
            ((entry.total.cents().max(0) as f64 / peak as f64) * TREND_BAR_WIDTH as f64).round()
                as usize
        } else {
            0
        };
        output.push_str(&format!(
            "{} {} {:<width$} {:>12}\n",
            entry.month.short_name(),
            entry.month.year,
            "█".repeat(filled),
            format_currency(entry.total, symbol),
            width = TREND_BAR_WIDTH
        ));
    }

    output
}

/// Category registry listing
pub fn format_categories() -> String {
    let mut output = String::new();
    output.push_str(&format!("{:15} {:16} {}\n", "ID", "Name", "Color"));
    output.push_str(&"-".repeat(40));
    output.push('\n');

    for category in CATEGORIES {
        output.push_str(&format!(
            "{:15} {:16} {}\n",
            category.id, category.name, category.color
        ));
    }

    output
}

/// Preview of a receipt scan before it becomes an expense
pub fn format_ocr_result(result: &OcrResult, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    let amount = result
        .amount
        .map(|a| format_currency(a, symbol))
        .unwrap_or_else(|| "(not found)".to_string());
    let date = result
        .date
        .map(|d| format_date(d, date_format))
        .unwrap_or_else(|| "(not found)".to_string());

    output.push_str(&format!("Amount:    {}\n", amount));
    output.push_str(&format!("Date:      {}\n", date));
    output.push_str(&format!(
        "Merchant:  {}\n",
        result.merchant_name.as_deref().unwrap_or("(not found)")
    ));
    output.push('\n');
    output.push_str(&result.text);
    if !result.text.ends_with('\n') {
        output.push('\n');
    }
    output
}
