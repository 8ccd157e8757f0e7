//! Field extraction from free receipt text
//!
//! Best effort only: every function returns `None` rather than guessing when
//! nothing plausible is found.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Money;

/// Keyword followed (on the same line) by an amount
static KEYWORD_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:total|amount|sum|due|pay|balance)\b[^\d\n]*(\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:[.,]\d{1,2})?)",
    )
    .expect("valid keyword amount regex")
});

/// Currency symbol followed by an amount
static CURRENCY_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$€£]\s*(\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:[.,]\d{1,2})?)")
        .expect("valid currency amount regex")
});

/// Standalone number with exactly two decimals, not part of a date
static DECIMAL_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d./\-])(\d{1,3}(?:,\d{3})+\.\d{2}|\d+[.,]\d{2})(?:$|[^\d./\-])")
        .expect("valid decimal amount regex")
});

static MONTH_FIRST_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})\b").expect("valid M/D/Y regex")
});

static YEAR_FIRST_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})\b").expect("valid Y-M-D regex")
});

static MONTH_NAME_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b",
    )
    .expect("valid month name regex")
});

/// Lines that head a receipt but never name the merchant
const GENERIC_HEADINGS: &[&str] = &["receipt", "sales receipt", "invoice", "tax invoice", "welcome"];

/// Label prefixes of non-merchant lines
const FIELD_LABELS: &[&str] = &["date", "time", "total", "subtotal", "amount", "tax", "cashier"];

/// First amount after a total-like keyword, else the first bare currency-like token
pub fn extract_amount(text: &str) -> Option<Money> {
    if let Some(amount) = KEYWORD_AMOUNT
        .captures_iter(text)
        .find_map(|caps| parse_amount_token(&caps[1]))
    {
        return Some(amount);
    }

    let currency = CURRENCY_AMOUNT.captures(text).and_then(|c| c.get(1));
    let decimal = DECIMAL_AMOUNT.captures(text).and_then(|c| c.get(1));
    let first = match (currency, decimal) {
        (Some(c), Some(d)) => Some(if c.start() <= d.start() { c } else { d }),
        (c, d) => c.or(d),
    };

    first.and_then(|m| parse_amount_token(m.as_str()))
}

/// Normalize separators and parse; a lone comma is a decimal separator
/// unless exactly three digits follow it
fn parse_amount_token(token: &str) -> Option<Money> {
    let normalized = if token.contains('.') {
        token.replace(',', "")
    } else {
        match token.rsplit_once(',') {
            Some((_, tail)) if tail.len() == 3 => token.replace(',', ""),
            Some(_) => token.replacen(',', ".", 1),
            None => token.to_string(),
        }
    };
    Money::parse(&normalized).ok()
}

/// First date found, trying month-first numeric, year-first numeric, then
/// month-name forms in that order
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let month_first = MONTH_FIRST_DATE.captures_iter(text).find_map(|caps| {
        let month = caps[1].parse().ok()?;
        let day = caps[2].parse().ok()?;
        let year = match &caps[3] {
            y if y.len() == 2 => 2000 + y.parse::<i32>().ok()?,
            y => y.parse().ok()?,
        };
        NaiveDate::from_ymd_opt(year, month, day)
    });
    if month_first.is_some() {
        return month_first;
    }

    let year_first = YEAR_FIRST_DATE.captures_iter(text).find_map(|caps| {
        NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )
    });
    if year_first.is_some() {
        return year_first;
    }

    MONTH_NAME_DATE.captures_iter(text).find_map(|caps| {
        let month = month_number(&caps[1])?;
        NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?)
    })
}

/// Parse an ISO `YYYY-MM-DD` string, falling back to free-text extraction
pub fn parse_date_field(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| extract_date(value))
}

fn month_number(prefix: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let prefix = prefix.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

/// First line that looks like a business name
pub fn extract_merchant(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| {
            let lower = line.to_lowercase();
            line.chars().any(char::is_alphabetic)
                && !GENERIC_HEADINGS.contains(&lower.as_str())
                && !FIELD_LABELS.iter().any(|label| {
                    lower
                        .strip_prefix(label)
                        .is_some_and(|rest| !rest.starts_with(char::is_alphabetic))
                })
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_amount_after_keyword() {
        let text = "Coffee Shop\nLatte 4.50\nTOTAL: $12.50\nThank you";
        assert_eq!(extract_amount(text), Some(Money::from_cents(1250)));

        assert_eq!(
            extract_amount("Amount due 15"),
            Some(Money::from_units(15))
        );
        assert_eq!(
            extract_amount("Balance EUR 7,5"),
            Some(Money::from_cents(750))
        );
    }

    #[test]
    fn test_amount_comma_decimal_normalized() {
        assert_eq!(extract_amount("Summe 23,40"), Some(Money::from_cents(2340)));
        assert_eq!(extract_amount("Total 1,234.56"), Some(Money::from_cents(123_456)));
        assert_eq!(extract_amount("Total 1,234"), Some(Money::from_units(1234)));
    }

    #[test]
    fn test_amount_falls_back_to_bare_token() {
        assert_eq!(
            extract_amount("Bakery\n2 croissants $6.80"),
            Some(Money::from_cents(680))
        );
        assert_eq!(
            extract_amount("Bakery\nCroissant 3.20\nBread 4.00"),
            Some(Money::from_cents(320))
        );
    }

    #[test]
    fn test_amount_keyword_is_whole_word() {
        let text = "Subtotal 10.00\nTax 1.00\nTotal 11.00";
        assert_eq!(extract_amount(text), Some(Money::from_cents(1100)));

        let text = "Payment VISA 1234\nTotal $12.00";
        assert_eq!(extract_amount(text), Some(Money::from_cents(1200)));
    }

    #[test]
    fn test_oversized_amount_is_skipped() {
        assert_eq!(extract_amount("Store\nTOTAL 99999999999999999"), None);
        assert_eq!(
            extract_amount("Total 99999999999999999\nAmount due 4.25"),
            Some(Money::from_cents(425))
        );
    }

    #[test]
    fn test_amount_ignores_dates() {
        assert_eq!(extract_amount("Visited 03.12.2024"), None);
        assert_eq!(extract_amount("Store #42\n2024-03-01"), None);
        assert_eq!(extract_amount(""), None);
    }

    #[test]
    fn test_date_month_first() {
        assert_eq!(extract_date("Date: 3/1/2024"), Some(date(2024, 3, 1)));
        assert_eq!(extract_date("12-31-23 14:05"), Some(date(2023, 12, 31)));
        assert_eq!(extract_date("03.12.2024"), Some(date(2024, 3, 12)));
    }

    #[test]
    fn test_date_year_first() {
        assert_eq!(extract_date("Printed 2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(extract_date("2024/3/5"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_date_month_name() {
        assert_eq!(extract_date("March 1st, 2024"), Some(date(2024, 3, 1)));
        assert_eq!(extract_date("Sept. 9 2023"), Some(date(2023, 9, 9)));
        assert_eq!(extract_date("on jan 31, 2025"), Some(date(2025, 1, 31)));
    }

    #[test]
    fn test_invalid_calendar_date_falls_through() {
        // 13/45 is not a date in any order, so the year-first form wins
        assert_eq!(
            extract_date("Ref 13/45/2024\nDate 2024-02-29"),
            Some(date(2024, 2, 29))
        );
        assert_eq!(extract_date("2023-02-30"), None);
        assert_eq!(extract_date("no dates here"), None);
    }

    #[test]
    fn test_parse_date_field() {
        assert_eq!(parse_date_field("2024-03-01"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_field("03/01/2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_field("yesterday"), None);
    }

    #[test]
    fn test_merchant() {
        assert_eq!(
            extract_merchant("Receipt\n  Grocery Store \nDate: 3/1/2024\nTotal: $12.00"),
            Some("Grocery Store".into())
        );
        assert_eq!(extract_merchant("\n\n1234\nTOTAL 5.00"), None);
        assert_eq!(
            extract_merchant("Taxi Company\nTotal 18.00"),
            Some("Taxi Company".into())
        );
    }
}
