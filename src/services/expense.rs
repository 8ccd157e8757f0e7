//! Expense service
//!
//! Business logic for expense management: validation before any store
//! mutation, identifier lookup, filtered listing and audit logging.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::{generate_diff, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::category::{self, Category};
use crate::models::{Expense, ExpenseDraft, ExpenseId, ExpenseIntent, ExpensePatch, TimeFrame, UserId};
use crate::storage::{ExpenseStore, Storage};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses owned by this user
    pub user_id: Option<UserId>,
    /// Registry id of the category
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Inclusive date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Restrict to a time frame relative to `today`; `All` leaves the range open
    pub fn time_frame(self, frame: TimeFrame, today: NaiveDate) -> Self {
        match frame.range(today) {
            Some((start, end)) => self.date_range(start, end),
            None => self,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        self.user_id.map_or(true, |u| expense.user_id == u)
            && self
                .category
                .as_deref()
                .map_or(true, |c| expense.category.eq_ignore_ascii_case(c))
            && self.start_date.map_or(true, |s| expense.date >= s)
            && self.end_date.map_or(true, |e| expense.date <= e)
    }
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Resolve user input (id or display name) to a registry category
    pub fn resolve_category(input: &str) -> ExpenseResult<&'static Category> {
        category::resolve(input).ok_or_else(|| ExpenseError::category_not_found(input.trim()))
    }

    /// Record a new expense
    pub fn create(&self, mut draft: ExpenseDraft) -> ExpenseResult<Expense> {
        draft.category = draft.category.trim().to_ascii_lowercase();
        draft.notes = normalize_notes(draft.notes);

        draft
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let expense = self.storage.expenses.create_expense(draft)?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(audit_name(&expense)),
            &expense,
        )?;

        info!(id = %expense.id, amount = %expense.amount, category = %expense.category, "expense created");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get_expense(id)
    }

    /// Find one of the user's expenses by full id or unambiguous id prefix
    pub fn find(&self, user_id: UserId, identifier: &str) -> ExpenseResult<Expense> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self
                .get(id)?
                .filter(|e| e.user_id == user_id)
                .ok_or_else(|| ExpenseError::expense_not_found(identifier));
        }

        let mut candidates: Vec<Expense> = self
            .list(ExpenseFilter::new().user(user_id))?
            .into_iter()
            .filter(|e| e.id.matches_prefix(identifier))
            .collect();

        match candidates.len() {
            0 => Err(ExpenseError::expense_not_found(identifier)),
            1 => Ok(candidates.remove(0)),
            n => Err(ExpenseError::Validation(format!(
                "Identifier '{}' matches {} expenses; use more characters",
                identifier, n
            ))),
        }
    }

    /// List expenses, newest first
    pub fn list(&self, filter: ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .storage
            .expenses
            .list_expenses()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        debug!(count = expenses.len(), "listed expenses");
        Ok(expenses)
    }

    /// Update an expense; the patched result is validated before it is stored
    pub fn update(&self, id: ExpenseId, mut patch: ExpensePatch) -> ExpenseResult<Expense> {
        if patch.is_empty() {
            return Err(ExpenseError::Validation("Nothing to update".into()));
        }

        let before = self
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        if let Some(category) = patch.category.as_mut() {
            *category = category.trim().to_ascii_lowercase();
        }
        if let Some(notes) = patch.notes.take() {
            patch.notes = Some(normalize_notes(notes));
        }

        let mut preview = before.clone();
        preview.apply(&patch);
        preview
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let after = self.storage.expenses.update_expense(id, &patch)?;

        let diff = generate_diff(&serde_json::to_value(&before)?, &serde_json::to_value(&after)?);
        self.storage.log_update(
            EntityType::Expense,
            after.id.to_string(),
            Some(audit_name(&after)),
            &before,
            &after,
            diff,
        )?;

        info!(id = %after.id, "expense updated");
        Ok(after)
    }

    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let removed = self.storage.expenses.delete_expense(id)?;

        self.storage.log_delete(
            EntityType::Expense,
            removed.id.to_string(),
            Some(audit_name(&removed)),
            &removed,
        )?;

        info!(id = %removed.id, "expense deleted");
        Ok(removed)
    }

    /// Apply a mutation request; returns the created, updated or removed expense
    pub fn apply(&self, intent: ExpenseIntent) -> ExpenseResult<Expense> {
        match intent {
            ExpenseIntent::Create(draft) => self.create(draft),
            ExpenseIntent::Update { id, patch } => self.update(id, patch),
            ExpenseIntent::Delete(id) => self.delete(id),
        }
    }

    /// Number of expenses owned by the user
    pub fn count(&self, user_id: UserId) -> ExpenseResult<usize> {
        Ok(self.list(ExpenseFilter::new().user(user_id))?.len())
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

fn audit_name(expense: &Expense) -> String {
    format!("{} {}", expense.date, expense.category_info().name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn user() -> UserId {
        UserId::for_email("alex@example.com")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(cents: i64, category: &str, day: NaiveDate) -> ExpenseDraft {
        ExpenseDraft::new(user(), Money::from_cents(cents), category, day)
    }

    #[test]
    fn test_create_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(draft(1250, " Food ", date(2024, 3, 1)).with_notes("  lunch  "))
            .unwrap();

        assert_eq!(expense.category, "food");
        assert_eq!(expense.notes.as_deref(), Some("lunch"));
        assert_eq!(service.count(user()).unwrap(), 1);
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_before_storing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service.create(draft(0, "food", date(2024, 3, 1))).unwrap_err();
        assert!(err.is_validation());

        let err = service.create(draft(100, "  ", date(2024, 3, 1))).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(service.count(user()).unwrap(), 0);
        assert_eq!(storage.audit().entry_count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        service.create(draft(5000, "food", date(2024, 3, 1))).unwrap();
        service.create(draft(2000, "transport", date(2024, 3, 15))).unwrap();
        service.create(draft(3000, "food", date(2024, 2, 28))).unwrap();
        service
            .create(ExpenseDraft::new(
                UserId::for_email("other@example.com"),
                Money::from_cents(999),
                "food",
                date(2024, 3, 2),
            ))
            .unwrap();

        let mine = service.list(ExpenseFilter::new().user(user())).unwrap();
        assert_eq!(mine.len(), 3);
        assert_eq!(mine[0].date, date(2024, 3, 15));

        let march = service
            .list(
                ExpenseFilter::new()
                    .user(user())
                    .time_frame(TimeFrame::Month, date(2024, 3, 20)),
            )
            .unwrap();
        assert_eq!(march.len(), 2);

        let food = service
            .list(ExpenseFilter::new().user(user()).category("food").limit(1))
            .unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].amount, Money::from_cents(5000));
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.create(draft(1000, "food", date(2024, 3, 1))).unwrap();

        let found = service.find(user(), &expense.id.short()).unwrap();
        assert_eq!(found.id, expense.id);

        let found = service.find(user(), &expense.id.as_uuid().to_string()).unwrap();
        assert_eq!(found.id, expense.id);

        let other = UserId::for_email("other@example.com");
        assert!(service.find(other, &expense.id.short()).unwrap_err().is_not_found());
        assert!(service.find(user(), "zzzz").unwrap_err().is_not_found());
        assert!(service.find(user(), "---").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(draft(1000, "food", date(2024, 3, 1)).with_notes("coffee"))
            .unwrap();

        let patch = ExpensePatch {
            amount: Some(Money::from_cents(1500)),
            notes: Some(None),
            ..Default::default()
        };
        let updated = service.update(expense.id, patch).unwrap();

        assert_eq!(updated.amount, Money::from_cents(1500));
        assert!(updated.notes.is_none());
        assert_eq!(updated.created_at, expense.created_at);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].diff_summary.is_some());
    }

    #[test]
    fn test_update_validates_before_storing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.create(draft(1000, "food", date(2024, 3, 1))).unwrap();

        let patch = ExpensePatch {
            amount: Some(Money::from_cents(-5)),
            ..Default::default()
        };
        assert!(service.update(expense.id, patch).unwrap_err().is_validation());
        assert!(service
            .update(expense.id, ExpensePatch::default())
            .unwrap_err()
            .is_validation());

        let stored = service.get(expense.id).unwrap().unwrap();
        assert_eq!(stored.amount, Money::from_cents(1000));
    }

    #[test]
    fn test_apply_intents() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let created = service
            .apply(ExpenseIntent::Create(draft(700, "health", date(2024, 3, 3))))
            .unwrap();
        let updated = service
            .apply(ExpenseIntent::Update {
                id: created.id,
                patch: ExpensePatch {
                    category: Some("shopping".into()),
                    ..Default::default()
                },
            })
            .unwrap();
        assert_eq!(updated.category, "shopping");

        let removed = service.apply(ExpenseIntent::Delete(created.id)).unwrap();
        assert_eq!(removed.id, created.id);
        assert!(service.get(created.id).unwrap().is_none());
        assert!(service
            .apply(ExpenseIntent::Delete(created.id))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_resolve_category() {
        assert_eq!(ExpenseService::resolve_category("Transport").unwrap().id, "transport");
        assert!(ExpenseService::resolve_category("vacation")
            .unwrap_err()
            .is_not_found());
    }
}
