//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod config;
pub mod expense;
pub mod export;
pub mod history;
pub mod receipt;
pub mod report;
pub mod session;

pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, handle_init_command, ConfigArgs};
pub use expense::{
    handle_add_command, handle_delete_command, handle_edit_command, handle_list_command,
    handle_show_command, AddArgs, EditArgs, ListArgs,
};
pub use export::{handle_export_command, ExportArgs};
pub use history::handle_history_command;
pub use receipt::{handle_scan_command, ScanArgs};
pub use report::{handle_stats_command, handle_trend_command};
pub use session::{
    handle_login_command, handle_logout_command, handle_register_command, handle_whoami_command,
};

use chrono::{Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, User};
use crate::services::SessionService;
use crate::storage::Storage;

/// Local calendar date used as "today" by every command
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an amount typed by the user (`12.50`, `$12.50`, `12`)
pub(crate) fn parse_amount(input: &str) -> ExpenseResult<Money> {
    Money::parse(input).map_err(|e| ExpenseError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date, or the words `today` / `yesterday`
pub(crate) fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    let today = today();
    match input.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - chrono::Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            ExpenseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input))
        }),
    }
}

pub(crate) fn require_user(storage: &Storage) -> ExpenseResult<User> {
    SessionService::new(storage).require_user()
}
