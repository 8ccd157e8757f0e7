//! CSV export of expenses
//!
//! `generate_csv` only builds text; `deliver_csv` writes it to disk and
//! reports success as a boolean.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::display::format::format_date;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

pub const CSV_HEADER: &str = "Date,Amount,Category,Notes";

/// Render expenses as CSV, one row per expense in input order
pub fn generate_csv(expenses: &[Expense], date_format: &str) -> String {
    let mut csv = String::with_capacity(32 * (expenses.len() + 1));
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for expense in expenses {
        let notes = expense
            .notes
            .as_deref()
            .map(quote_always)
            .unwrap_or_default();

        csv.push_str(&format!(
            "{},{},{},{}\n",
            escape_csv(&format_date(expense.date, date_format)),
            expense.amount.to_decimal_string(),
            escape_csv(&expense.category),
            notes
        ));
    }

    csv
}

/// `expenses_YYYY-MM-DD.csv`
pub fn export_filename(today: NaiveDate) -> String {
    format!("expenses_{}.csv", today.format("%Y-%m-%d"))
}

/// Write the CSV into `dir`, creating it if needed; returns the file path
pub fn write_csv(
    expenses: &[Expense],
    dir: &Path,
    date_format: &str,
    today: NaiveDate,
) -> ExpenseResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        ExpenseError::Export(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(export_filename(today));
    fs::write(&path, generate_csv(expenses, date_format))
        .map_err(|e| ExpenseError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(path)
}

/// Deliver the export to `dir`; failures are logged, not raised
pub fn deliver_csv(expenses: &[Expense], dir: &Path, date_format: &str, today: NaiveDate) -> bool {
    match write_csv(expenses, dir, date_format, today) {
        Ok(path) => {
            info!(path = %path.display(), rows = expenses.len(), "exported expenses");
            true
        }
        Err(e) => {
            warn!(error = %e, "CSV export failed");
            false
        }
    }
}

/// Quote only when the field contains a separator, quote or newline
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        quote_always(s)
    } else {
        s.to_string()
    }
}

fn quote_always(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
