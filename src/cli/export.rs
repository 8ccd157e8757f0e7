//! CLI command for CSV export

use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{deliver_csv, export_filename};
use crate::models::TimeFrame;
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{require_user, today};

/// Arguments for `expense export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Time frame to export
    #[arg(short, long, value_enum, default_value_t = TimeFrame::All)]
    pub period: TimeFrame,

    /// Output directory (defaults to the exports directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Handle export command
pub fn handle_export_command(storage: &Storage, settings: &Settings, args: ExportArgs) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let today = today();

    let expenses = ExpenseService::new(storage)
        .list(ExpenseFilter::new().user(user.id).time_frame(args.period, today))?;

    let dir = args.dir.unwrap_or_else(|| storage.paths().export_dir());

    if !deliver_csv(&expenses, &dir, &settings.date_format, today) {
        return Err(ExpenseError::Export(format!(
            "Failed to export expenses to {}",
            dir.display()
        )));
    }

    println!(
        "Exported {} expenses ({}) to: {}",
        expenses.len(),
        args.period.label(),
        dir.join(export_filename(today)).display()
    );
    Ok(())
}
