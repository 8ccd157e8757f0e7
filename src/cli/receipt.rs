//! Receipt scanning CLI command

use clap::Args;
use tracing::debug;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_ocr_result};
use crate::error::ExpenseResult;
use crate::models::ExpenseDraft;
use crate::receipts::{build_scanner, ReceiptImage};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::{parse_amount, require_user, today};

/// Arguments for `expense scan`
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path or file:// URI of the receipt photo
    pub image: String,

    /// Record the scanned receipt as an expense
    #[arg(short, long)]
    pub save: bool,

    /// Category for the saved expense (defaults to "other")
    #[arg(short, long, requires = "save")]
    pub category: Option<String>,

    /// Override the scanned amount
    #[arg(short, long, requires = "save")]
    pub amount: Option<String>,
}

pub fn handle_scan_command(storage: &Storage, settings: &Settings, args: ScanArgs) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let scanner = build_scanner(&settings.receipt);
    let image = ReceiptImage::new(args.image);

    debug!(scanner = scanner.name(), reference = image.reference(), "scanning receipt");
    let result = scanner.scan(&image);

    println!("Receipt scan ({})", scanner.name());
    println!("{}", "-".repeat(40));
    print!(
        "{}",
        format_ocr_result(&result, &settings.currency_symbol, &settings.date_format)
    );

    if !args.save {
        return Ok(());
    }

    let mut draft = ExpenseDraft::from_ocr(&result, user.id, image.reference(), today());
    if let Some(input) = &args.category {
        draft.category = ExpenseService::resolve_category(input)?.id.to_string();
    }
    if let Some(amount) = &args.amount {
        draft.amount = parse_amount(amount)?;
    }

    let expense = ExpenseService::new(storage).create(draft)?;

    println!();
    println!("Saved {}", expense.id);
    print!(
        "{}",
        format_expense_details(&expense, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}
