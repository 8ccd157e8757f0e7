//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId, ExpensePatch};

use super::file_io::{read_json, write_json_atomic};
use super::traits::ExpenseStore;

/// Serializable expense collection
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> ExpenseResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = ExpenseData {
            expenses: sorted(data.values().cloned().collect()),
        };
        write_json_atomic(&self.path, &file_data)
    }
}

/// Newest date first, then most recently created
fn sorted(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    expenses
}

impl ExpenseStore for ExpenseRepository {
    fn list_expenses(&self) -> ExpenseResult<Vec<Expense>> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(sorted(data.values().cloned().collect()))
    }

    fn get_expense(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    fn create_expense(&self, draft: ExpenseDraft) -> ExpenseResult<Expense> {
        let expense = Expense::from_draft(draft);
        {
            let mut data = self.data.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            data.insert(expense.id, expense.clone());
        }
        self.save()?;
        Ok(expense)
    }

    fn update_expense(&self, id: ExpenseId, patch: &ExpensePatch) -> ExpenseResult<Expense> {
        let updated = {
            let mut data = self.data.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            let expense = data
                .get_mut(&id)
                .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
            expense.apply(patch);
            expense.clone()
        };
        self.save()?;
        Ok(updated)
    }

    fn delete_expense(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let removed = {
            let mut data = self.data.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            data.remove(&id)
                .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?
        };
        self.save()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UserId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn draft(cents: i64, day: u32) -> ExpenseDraft {
        ExpenseDraft::new(
            UserId::for_email("test@example.com"),
            Money::from_cents(cents),
            "food",
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.list_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_create_assigns_identity_and_persists() {
        let (temp_dir, repo) = create_test_repo();
        let created = repo.create_expense(draft(5000, 1)).unwrap();

        let reloaded = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reloaded.load().unwrap();
        let stored = reloaded.get_expense(created.id).unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[test]
    fn test_list_is_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.create_expense(draft(100, 1)).unwrap();
        repo.create_expense(draft(200, 20)).unwrap();
        repo.create_expense(draft(300, 10)).unwrap();

        let days: Vec<_> = repo
            .list_expenses()
            .unwrap()
            .iter()
            .map(|e| e.amount.cents())
            .collect();
        assert_eq!(days, vec![200, 300, 100]);
    }

    #[test]
    fn test_update_applies_patch() {
        let (_temp_dir, repo) = create_test_repo();
        let created = repo.create_expense(draft(100, 1)).unwrap();

        let patch = ExpensePatch {
            amount: Some(Money::from_cents(250)),
            notes: Some(Some("dinner".into())),
            ..Default::default()
        };
        let updated = repo.update_expense(created.id, &patch).unwrap();

        assert_eq!(updated.amount.cents(), 250);
        assert_eq!(updated.notes.as_deref(), Some("dinner"));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let (_temp_dir, repo) = create_test_repo();
        let id = ExpenseId::new();

        assert!(repo.get_expense(id).unwrap().is_none());
        assert!(repo
            .update_expense(id, &ExpensePatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete_expense(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let created = repo.create_expense(draft(100, 1)).unwrap();

        let removed = repo.delete_expense(created.id).unwrap();
        assert_eq!(removed.id, created.id);
        assert!(repo.list_expenses().unwrap().is_empty());
    }
}
