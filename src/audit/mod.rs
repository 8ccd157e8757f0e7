//! Audit logging for expense-cli
//!
//! Every create, update and delete performed by the services is appended to
//! `audit.log` as one JSON object per line, with before/after snapshots and
//! a field diff for updates.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_cli::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Expense,
//!     expense.id.to_string(),
//!     Some(expense.to_string()),
//!     &expense,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
