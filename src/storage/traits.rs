//! Entity store contracts
//!
//! The JSON repositories implement these; services reach persistence only
//! through the trait methods.

use crate::error::ExpenseResult;
use crate::models::{Budget, Expense, ExpenseDraft, ExpenseId, ExpensePatch, User, UserId};

/// Ordered expense collection with CRUD
pub trait ExpenseStore {
    /// Snapshot of every stored expense, newest date first
    fn list_expenses(&self) -> ExpenseResult<Vec<Expense>>;

    fn get_expense(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>>;

    /// Persist a draft, assigning `id` and `created_at`
    fn create_expense(&self, draft: ExpenseDraft) -> ExpenseResult<Expense>;

    /// Apply a patch and return the updated expense
    fn update_expense(&self, id: ExpenseId, patch: &ExpensePatch) -> ExpenseResult<Expense>;

    /// Remove an expense and return it
    fn delete_expense(&self, id: ExpenseId) -> ExpenseResult<Expense>;
}

/// One budget configuration per user, replaced wholesale
pub trait BudgetStore {
    /// The user's budget, or the default configuration if none was saved
    fn get_budget(&self, user: UserId) -> ExpenseResult<Budget>;

    fn set_budget(&self, user: UserId, budget: Budget) -> ExpenseResult<()>;
}

/// The logged-in user, if any
pub trait SessionStore {
    fn current_user(&self) -> ExpenseResult<Option<User>>;

    fn set_user(&self, user: User) -> ExpenseResult<()>;

    fn clear(&self) -> ExpenseResult<()>;
}
