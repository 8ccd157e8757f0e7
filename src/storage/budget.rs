//! Budget repository for JSON storage
//!
//! Manages loading and saving per-user budgets to budget.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::traits::BudgetStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BudgetRecord {
    user_id: UserId,
    #[serde(flatten)]
    budget: Budget,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<BudgetRecord>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<UserId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for record in file_data.budgets {
            budgets.insert(record.user_id, record.budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> ExpenseResult<()> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut records: Vec<_> = budgets
            .iter()
            .map(|(user_id, budget)| BudgetRecord {
                user_id: *user_id,
                budget: *budget,
            })
            .collect();
        records.sort_by_key(|r| r.user_id);

        write_json_atomic(&self.path, &BudgetData { budgets: records })
    }
}

impl BudgetStore for BudgetRepository {
    fn get_budget(&self, user: UserId) -> ExpenseResult<Budget> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&user).copied().unwrap_or_default())
    }

    fn set_budget(&self, user: UserId, budget: Budget) -> ExpenseResult<()> {
        {
            let mut budgets = self.budgets.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            budgets.insert(user, budget);
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_unset_budget_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budget.json"));
        repo.load().unwrap();

        let budget = repo.get_budget(UserId::for_email("a@b.c")).unwrap();
        assert_eq!(budget, Budget::default());
    }

    #[test]
    fn test_set_replaces_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");
        let user = UserId::for_email("a@b.c");
        let other = UserId::for_email("x@y.z");

        let repo = BudgetRepository::new(path.clone());
        repo.load().unwrap();
        repo.set_budget(user, Budget::new(Money::from_units(100), true))
            .unwrap();
        repo.set_budget(user, Budget::new(Money::from_units(150), false))
            .unwrap();

        let reloaded = BudgetRepository::new(path);
        reloaded.load().unwrap();
        let budget = reloaded.get_budget(user).unwrap();
        assert_eq!(budget.monthly_limit, Money::from_units(150));
        assert!(!budget.notify_on_exceed);
        assert_eq!(reloaded.get_budget(other).unwrap(), Budget::default());
    }
}
