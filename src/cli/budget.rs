//! Budget CLI commands
//!
//! Shows spending against the monthly budget and replaces the budget
//! configuration.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, Month};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{parse_amount, require_user, today};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show spending against the budget for a month
    Show {
        /// Month to evaluate (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set the monthly budget limit
    Set {
        /// Monthly limit (e.g., "2000" or "1500.50")
        amount: String,

        /// Alert when spending exceeds the limit
        #[arg(long, conflicts_with = "no_notify")]
        notify: bool,

        /// Do not alert when spending exceeds the limit
        #[arg(long)]
        no_notify: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let service = BudgetService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        BudgetCommands::Show { month } => {
            let month = match month.as_deref() {
                Some(m) => Month::parse(m).map_err(|e| ExpenseError::Validation(e.to_string()))?,
                None => Month::of(today()),
            };

            let status = service.status(user.id, month)?;
            print!("{}", status.format_terminal(symbol));
        }

        BudgetCommands::Set {
            amount,
            notify,
            no_notify,
        } => {
            let limit = parse_amount(&amount)?;
            let budget = match (notify, no_notify) {
                (true, _) => service.set(user.id, Budget::new(limit, true))?,
                (_, true) => service.set(user.id, Budget::new(limit, false))?,
                _ => service.set_limit(user.id, limit)?,
            };

            println!(
                "Monthly budget set to {}",
                budget.monthly_limit.format_with_symbol(symbol)
            );
            println!(
                "Alerts: {}",
                if budget.notify_on_exceed { "on" } else { "off" }
            );
        }
    }

    Ok(())
}
