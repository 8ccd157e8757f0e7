//! Budget model
//!
//! A single monthly spending ceiling per user, replaced wholesale.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Monthly budget configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub monthly_limit: Money,

    /// Raise an alert when the month's spending exceeds the limit
    #[serde(default = "default_notify")]
    pub notify_on_exceed: bool,
}

fn default_notify() -> bool {
    true
}

impl Budget {
    pub fn new(monthly_limit: Money, notify_on_exceed: bool) -> Self {
        Self {
            monthly_limit,
            notify_on_exceed,
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.monthly_limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.monthly_limit));
        }
        Ok(())
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            monthly_limit: Money::from_units(2000),
            notify_on_exceed: true,
        }
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Monthly limit must be greater than zero (got {})", limit)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let budget = Budget::default();
        assert_eq!(budget.monthly_limit.cents(), 200_000);
        assert!(budget.notify_on_exceed);
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(Budget::new(Money::zero(), true).validate().is_err());
        assert!(Budget::new(Money::from_cents(-100), false).validate().is_err());
        assert!(Budget::new(Money::from_cents(1), false).validate().is_ok());
    }

    #[test]
    fn test_missing_notify_defaults_to_true() {
        let budget: Budget = serde_json::from_str(r#"{"monthly_limit": 50000}"#).unwrap();
        assert_eq!(budget.monthly_limit.cents(), 50_000);
        assert!(budget.notify_on_exceed);
    }
}
