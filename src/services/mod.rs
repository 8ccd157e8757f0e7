//! Service layer for expense-cli
//!
//! Services sit between the CLI and the stores: they validate input before
//! any mutation, write the audit trail and emit diagnostics.

pub mod budget;
pub mod expense;
pub mod session;

pub use budget::BudgetService;
pub use expense::{ExpenseFilter, ExpenseService};
pub use session::SessionService;
