//! Budget evaluation
//!
//! Compares a month's spending total against the configured monthly limit.

use crate::models::{Budget, Expense, Money, Month};

use super::aggregation::{filter_by_range, total};

/// Whether `total` is over `limit`; spending exactly the limit is not exceeded
pub fn is_exceeded(total: Money, limit: Money) -> bool {
    total > limit
}

/// `limit - total`; negative once the budget is exceeded
pub fn remaining(total: Money, limit: Money) -> Money {
    limit - total
}

/// Budget state for one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub month: Month,
    pub spent: Money,
    pub limit: Money,
    pub remaining: Money,
    pub exceeded: bool,
    /// Exceeded and the user asked to be notified
    pub alert: bool,
}

impl BudgetStatus {
    pub fn evaluate(budget: &Budget, expenses: &[Expense], month: Month) -> Self {
        let spent = total(&filter_by_range(
            expenses,
            month.start_date(),
            month.end_date(),
        ));
        let exceeded = is_exceeded(spent, budget.monthly_limit);

        Self {
            month,
            spent,
            limit: budget.monthly_limit,
            remaining: remaining(spent, budget.monthly_limit),
            exceeded,
            alert: exceeded && budget.notify_on_exceed,
        }
    }

    /// Share of the limit spent, capped at 100 for progress display
    pub fn percent_used(&self) -> f64 {
        if !self.limit.is_positive() {
            return 0.0;
        }
        (self.spent.cents() as f64 / self.limit.cents() as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// "Remaining: $x" or "Exceeded by $x"
    pub fn summary_line(&self, symbol: &str) -> String {
        if self.exceeded {
            format!("Exceeded by {}", self.remaining.abs().format_with_symbol(symbol))
        } else {
            format!("Remaining: {}", self.remaining.format_with_symbol(symbol))
        }
    }

    /// Text progress bar of `width` cells
    pub fn progress_bar(&self, width: usize) -> String {
        let filled = ((self.percent_used() / 100.0) * width as f64).round() as usize;
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled.min(width)))
    }

    /// Format the status for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget: {}\n", self.month.label()));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("Spent:    {}\n", self.spent.format_with_symbol(symbol)));
        output.push_str(&format!("Limit:    {}\n", self.limit.format_with_symbol(symbol)));
        output.push_str(&format!(
            "{} {:.0}%\n",
            self.progress_bar(30),
            self.percent_used()
        ));
        output.push_str(&self.summary_line(symbol));
        output.push('\n');

        if self.alert {
            output.push_str("\nWARNING: You have exceeded your monthly budget!\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDraft, UserId};
    use chrono::NaiveDate;

    fn expense(units: i64, category: &str, y: i32, m: u32, d: u32) -> Expense {
        Expense::from_draft(ExpenseDraft::new(
            UserId::for_email("test@example.com"),
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        ))
    }

    #[test]
    fn test_exceeded_is_strict() {
        let limit = Money::from_units(100);
        assert!(!is_exceeded(limit, limit));
        assert!(is_exceeded(limit + Money::from_cents(1), limit));
        assert!(!is_exceeded(Money::zero(), limit));
    }

    #[test]
    fn test_remaining_may_be_negative() {
        let limit = Money::from_units(100);
        assert_eq!(remaining(Money::from_units(40), limit), Money::from_units(60));
        assert_eq!(remaining(Money::from_units(200), limit), Money::from_units(-100));
    }

    #[test]
    fn test_march_scenario() {
        let expenses = vec![
            expense(50, "food", 2024, 3, 1),
            expense(150, "housing", 2024, 3, 15),
            expense(999, "food", 2024, 4, 1),
        ];
        let budget = Budget::new(Money::from_units(100), true);
        let status = BudgetStatus::evaluate(&budget, &expenses, Month::new(2024, 3).unwrap());

        assert_eq!(status.spent, Money::from_units(200));
        assert!(status.exceeded);
        assert_eq!(status.remaining, Money::from_units(-100));
        assert!(status.alert);
        assert_eq!(status.percent_used(), 100.0);
        assert_eq!(status.summary_line("$"), "Exceeded by $100.00");
    }

    #[test]
    fn test_no_alert_when_notifications_off() {
        let expenses = vec![expense(150, "housing", 2024, 3, 15)];
        let budget = Budget::new(Money::from_units(100), false);
        let status = BudgetStatus::evaluate(&budget, &expenses, Month::new(2024, 3).unwrap());

        assert!(status.exceeded);
        assert!(!status.alert);
        assert!(!status.format_terminal("$").contains("WARNING"));
    }

    #[test]
    fn test_within_budget() {
        let expenses = vec![expense(25, "food", 2024, 3, 31)];
        let budget = Budget::new(Money::from_units(100), true);
        let status = BudgetStatus::evaluate(&budget, &expenses, Month::new(2024, 3).unwrap());

        assert!(!status.exceeded);
        assert_eq!(status.percent_used(), 25.0);
        assert_eq!(status.summary_line("€"), "Remaining: €75.00");
        assert_eq!(status.progress_bar(4), "[#---]");
    }

    #[test]
    fn test_limit_exactly_spent() {
        let expenses = vec![expense(100, "food", 2024, 3, 1)];
        let budget = Budget::new(Money::from_units(100), true);
        let status = BudgetStatus::evaluate(&budget, &expenses, Month::new(2024, 3).unwrap());

        assert!(!status.exceeded);
        assert_eq!(status.remaining, Money::zero());
        assert_eq!(status.summary_line("$"), "Remaining: $0.00");
    }
}
