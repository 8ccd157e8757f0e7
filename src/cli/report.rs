//! Statistics and trend CLI commands

use crate::config::settings::{Settings, MAX_TREND_MONTHS};
use crate::display::format_trend;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::TimeFrame;
use crate::reports::{monthly_trend, SpendingInsights};
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{require_user, today};

/// Spending insights for a time frame
pub fn handle_stats_command(storage: &Storage, settings: &Settings, period: TimeFrame) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let expenses = ExpenseService::new(storage)
        .list(ExpenseFilter::new().user(user.id).time_frame(period, today()))?;

    let insights = SpendingInsights::from_expenses(&expenses);
    print!(
        "{}",
        insights.format_terminal(period.label(), &settings.currency_symbol)
    );
    Ok(())
}

/// Monthly totals ending with the current month
pub fn handle_trend_command(
    storage: &Storage,
    settings: &Settings,
    months: Option<usize>,
) -> ExpenseResult<()> {
    let months = months.unwrap_or(settings.trend_months);
    if !(1..=MAX_TREND_MONTHS).contains(&months) {
        return Err(ExpenseError::Validation(format!(
            "Number of months must be between 1 and {}",
            MAX_TREND_MONTHS
        )));
    }

    let user = require_user(storage)?;
    let expenses = ExpenseService::new(storage).list(ExpenseFilter::new().user(user.id))?;

    let trend = monthly_trend(&expenses, months, today());
    print!("{}", format_trend(&trend, &settings.currency_symbol));
    Ok(())
}
