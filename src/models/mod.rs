//! Core data models for expense-cli
//!
//! This module contains the data structures of the expense domain: expenses,
//! the category registry, the monthly budget, the session user and receipt
//! scan results.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod receipt;
pub mod user;

pub use budget::Budget;
pub use category::Category;
pub use expense::{Expense, ExpenseDraft, ExpenseIntent, ExpensePatch};
pub use ids::{ExpenseId, UserId};
pub use money::Money;
pub use period::{Month, TimeFrame};
pub use receipt::OcrResult;
pub use user::User;
