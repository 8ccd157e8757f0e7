//! Reports module for expense-cli
//!
//! Pure computations over expense snapshots: aggregation (totals, top
//! category, trend) and budget evaluation.

pub mod aggregation;
pub mod budget_status;

pub use aggregation::{
    average, filter_by_range, group_by_date, maximum, monthly_trend, top_category, total,
    totals_by_category, CategoryBreakdown, MonthTotal, SpendingInsights,
};
pub use budget_status::{is_exceeded, remaining, BudgetStatus};
