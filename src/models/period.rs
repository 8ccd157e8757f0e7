//! Calendar months and reporting time frames
//!
//! All comparisons are done on `NaiveDate`, so month edges never depend on a
//! time of day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, e.g. "2025-01"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    /// Returns `None` when `month` is outside 1..=12 or the year is outside
    /// the representable date range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Earliest month with representable dates
    pub fn earliest() -> Self {
        Self::of(NaiveDate::MIN)
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
            .unwrap_or_else(|| self.start_date())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Step back `n` months, stopping at [`Month::earliest`]
    pub fn back(&self, n: usize) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        i64::try_from(n)
            .ok()
            .and_then(|n| index.checked_sub(n))
            .and_then(|target| {
                let year = i32::try_from(target.div_euclid(12)).ok()?;
                Self::new(year, target.rem_euclid(12) as u32 + 1)
            })
            .unwrap_or_else(Self::earliest)
    }

    /// Full month name, e.g. "March"
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// Three-letter month name, e.g. "Mar"
    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }

    /// Friendly label, e.g. "March 2024"
    pub fn label(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Self::new(year, month).ok_or(PeriodParseError::YearOutOfRange(year))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Window of expenses to report on or export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    /// Every expense
    #[default]
    All,
    /// The calendar month containing today
    Month,
    /// The calendar year containing today
    Year,
}

impl TimeFrame {
    /// Inclusive date range relative to `today`; `None` means unbounded
    pub fn range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::All => None,
            Self::Month => {
                let month = Month::of(today);
                Some((month.start_date(), month.end_date()))
            }
            Self::Year => Some((
                NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(today.year(), 12, 31)?,
            )),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Month => "This Month",
            Self::Year => "This Year",
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    YearOutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid month format '{}', expected YYYY-MM", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month number: {}", m),
            Self::YearOutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let feb_leap = Month::new(2024, 2).unwrap();
        assert_eq!(feb_leap.start_date(), date(2024, 2, 1));
        assert_eq!(feb_leap.end_date(), date(2024, 2, 29));

        let dec = Month::new(2023, 12).unwrap();
        assert_eq!(dec.end_date(), date(2023, 12, 31));
    }

    #[test]
    fn test_contains_edges() {
        let march = Month::new(2024, 3).unwrap();
        assert!(march.contains(date(2024, 3, 1)));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2024, 2, 29)));
        assert!(!march.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_navigation_across_years() {
        let jan = Month::new(2024, 1).unwrap();
        assert_eq!(jan.prev(), Month::new(2023, 12).unwrap());
        assert_eq!(jan.prev().next(), jan);
        assert_eq!(jan.back(13), Month::new(2022, 12).unwrap());
        assert_eq!(jan.back(0), jan);
    }

    #[test]
    fn test_parse_and_display() {
        let m = Month::parse("2025-01").unwrap();
        assert_eq!(m.to_string(), "2025-01");
        assert_eq!(m.label(), "January 2025");
        assert_eq!(m.short_name(), "Jan");
        assert!(matches!(Month::parse("2025-13"), Err(PeriodParseError::InvalidMonth(13))));
        assert!(Month::parse("January").is_err());
    }

    #[test]
    fn test_out_of_range_year_is_rejected() {
        assert!(matches!(
            Month::parse("300000-01"),
            Err(PeriodParseError::YearOutOfRange(300000))
        ));
        assert!(Month::new(-300000, 6).is_none());
    }

    #[test]
    fn test_bounds_at_range_edges() {
        let last = Month::of(NaiveDate::MAX);
        assert_eq!(last.end_date(), NaiveDate::MAX);

        let first = Month::earliest();
        assert_eq!(first.start_date().month(), NaiveDate::MIN.month());
        assert!(first.end_date() >= first.start_date());
    }

    #[test]
    fn test_back_saturates_at_earliest() {
        let march = Month::new(2024, 3).unwrap();
        assert_eq!(march.back(usize::MAX), Month::earliest());
        assert_eq!(march.back(24 * 12), Month::new(2000, 3).unwrap());
    }

    #[test]
    fn test_time_frame_ranges() {
        let today = date(2024, 3, 15);
        assert_eq!(TimeFrame::All.range(today), None);
        assert_eq!(
            TimeFrame::Month.range(today),
            Some((date(2024, 3, 1), date(2024, 3, 31)))
        );
        assert_eq!(
            TimeFrame::Year.range(today),
            Some((date(2024, 1, 1), date(2024, 12, 31)))
        );
    }
}
