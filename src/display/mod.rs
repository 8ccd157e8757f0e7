//! Display formatting for terminal output
//!
//! Formats expenses, scan previews and trends as plain text for the CLI.
//! Functions here return strings; printing is left to the caller.

pub mod expense;
pub mod format;

pub use expense::{
    format_categories, format_expense_days, format_expense_details, format_expense_table,
    format_ocr_result, format_trend,
};
pub use format::{
    current_month_bounds, current_month_label, format_currency, format_date, is_valid_date_format,
    relative_day_label, truncate, DEFAULT_DATE_FORMAT,
};
