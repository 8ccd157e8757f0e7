//! Currency and date formatting helpers

use std::fmt::Write;

use chrono::{Duration, NaiveDate};

use crate::models::{Money, Month};

/// Display format used when the configured one cannot render a date
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Amount with currency symbol and thousands separators, e.g. `$1,234.50`
pub fn format_currency(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Render `date` with a strftime format, falling back to
/// [`DEFAULT_DATE_FORMAT`] when the format is invalid for a date
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if !format.is_empty() && write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Whether `format` renders a calendar date without error
pub fn is_valid_date_format(format: &str) -> bool {
    let mut out = String::new();
    !format.is_empty() && write!(out, "{}", NaiveDate::MIN.format(format)).is_ok()
}

/// "Today", "Yesterday" or the formatted date
pub fn relative_day_label(date: NaiveDate, today: NaiveDate, format: &str) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today - Duration::days(1) {
        "Yesterday".to_string()
    } else {
        format_date(date, format)
    }
}

/// e.g. "March 2024"
pub fn current_month_label(today: NaiveDate) -> String {
    Month::of(today).label()
}

/// First and last day of the month containing `today`
pub fn current_month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let month = Month::of(today);
    (month.start_date(), month.end_date())
}

/// Pad or shorten `s` to exactly `max_len` characters
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Money::from_cents(123_450), "$"), "$1,234.50");
        assert_eq!(format_currency(Money::from_cents(-500), "€"), "-€5.00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2024, 3, 1), DEFAULT_DATE_FORMAT), "Mar 1, 2024");
        assert_eq!(format_date(date(2024, 3, 1), "%d/%m/%Y"), "01/03/2024");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        assert_eq!(format_date(date(2024, 3, 1), "%H:%M"), "Mar 1, 2024");
        assert_eq!(format_date(date(2024, 3, 1), ""), "Mar 1, 2024");
        assert!(!is_valid_date_format("%H:%M"));
        assert!(is_valid_date_format("%Y-%m-%d"));
    }

    #[test]
    fn test_relative_day_label() {
        let today = date(2024, 3, 10);
        assert_eq!(relative_day_label(today, today, DEFAULT_DATE_FORMAT), "Today");
        assert_eq!(relative_day_label(date(2024, 3, 9), today, DEFAULT_DATE_FORMAT), "Yesterday");
        assert_eq!(relative_day_label(date(2024, 3, 1), today, DEFAULT_DATE_FORMAT), "Mar 1, 2024");
    }

    #[test]
    fn test_current_month() {
        let today = date(2024, 2, 14);
        assert_eq!(current_month_label(today), "February 2024");
        assert_eq!(current_month_bounds(today), (date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 8), "short   ");
        assert_eq!(truncate("a very long note", 8), "a ver...");
    }
}
