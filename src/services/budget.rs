//! Budget service
//!
//! Reads and replaces a user's monthly budget and evaluates spending against
//! it for a calendar month.

use tracing::{info, warn};

use crate::audit::{generate_diff, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, Money, Month, UserId};
use crate::reports::BudgetStatus;
use crate::services::expense::{ExpenseFilter, ExpenseService};
use crate::storage::{BudgetStore, Storage};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The user's budget, or the default when none was set
    pub fn get(&self, user_id: UserId) -> ExpenseResult<Budget> {
        self.storage.budget.get_budget(user_id)
    }

    /// Replace the user's budget configuration
    pub fn set(&self, user_id: UserId, budget: Budget) -> ExpenseResult<Budget> {
        budget
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let before = self.get(user_id)?;
        self.storage.budget.set_budget(user_id, budget)?;

        let diff = generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(budget)?);
        self.storage.log_update(
            EntityType::Budget,
            user_id.to_string(),
            Some("Monthly budget".to_string()),
            &before,
            &budget,
            diff,
        )?;

        info!(user = %user_id, limit = %budget.monthly_limit, "budget updated");
        Ok(budget)
    }

    /// Change only the monthly limit, keeping the notification preference
    pub fn set_limit(&self, user_id: UserId, limit: Money) -> ExpenseResult<Budget> {
        let current = self.get(user_id)?;
        self.set(user_id, Budget::new(limit, current.notify_on_exceed))
    }

    /// Spending against the budget for `month`
    pub fn status(&self, user_id: UserId, month: Month) -> ExpenseResult<BudgetStatus> {
        let budget = self.get(user_id)?;
        let expenses = ExpenseService::new(self.storage).list(
            ExpenseFilter::new()
                .user(user_id)
                .date_range(month.start_date(), month.end_date()),
        )?;

        let status = BudgetStatus::evaluate(&budget, &expenses, month);
        if status.alert {
            warn!(user = %user_id, month = %month, spent = %status.spent, "monthly budget exceeded");
        }
        Ok(status)
    }
}
