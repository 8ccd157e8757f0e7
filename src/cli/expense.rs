//! Expense CLI commands
//!
//! Add, list, show, edit and delete expenses for the logged-in user.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::{format_expense_days, format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseDraft, ExpensePatch, TimeFrame};
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, require_user, today};

/// Arguments for `expense add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount (e.g., "12.50" or "$12.50")
    pub amount: String,

    /// Category id or name (see `expense categories`)
    pub category: String,

    /// Date spent (YYYY-MM-DD, "today" or "yesterday"); defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Free-form note
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Path or URI of the receipt image
    #[arg(short, long)]
    pub receipt: Option<String>,
}

/// Arguments for `expense list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Time frame to show
    #[arg(short, long, value_enum, default_value_t = TimeFrame::All)]
    pub period: TimeFrame,

    /// Only this category (id or name)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Number of expenses to show
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Group under day headings instead of a table
    #[arg(long)]
    pub by_day: bool,
}

/// Arguments for `expense edit`
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Expense ID or ID prefix
    pub id: String,

    #[arg(short, long)]
    pub amount: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub date: Option<String>,

    #[arg(short, long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    /// Remove the note
    #[arg(long)]
    pub clear_notes: bool,

    #[arg(short, long, conflicts_with = "clear_receipt")]
    pub receipt: Option<String>,

    /// Detach the receipt image
    #[arg(long)]
    pub clear_receipt: bool,
}

pub fn handle_add_command(storage: &Storage, settings: &Settings, args: AddArgs) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let category = ExpenseService::resolve_category(&args.category)?;
    let amount = parse_amount(&args.amount)?;
    let date = match args.date.as_deref() {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let mut draft = ExpenseDraft::new(user.id, amount, category.id, date);
    if let Some(notes) = args.notes {
        draft = draft.with_notes(notes);
    }
    if let Some(receipt) = args.receipt {
        draft = draft.with_receipt(receipt);
    }

    let expense = ExpenseService::new(storage).create(draft)?;

    println!(
        "Added {}: {} for {}",
        expense.id,
        expense.amount.format_with_symbol(&settings.currency_symbol),
        category.name
    );
    Ok(())
}

pub fn handle_list_command(storage: &Storage, settings: &Settings, args: ListArgs) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let today = today();

    let mut filter = ExpenseFilter::new().user(user.id).time_frame(args.period, today);
    if let Some(input) = &args.category {
        filter = filter.category(ExpenseService::resolve_category(input)?.id);
    }
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    }

    let expenses = ExpenseService::new(storage).list(filter)?;

    println!("Expenses: {}", args.period.label());
    if args.by_day {
        print!(
            "{}",
            format_expense_days(&expenses, today, &settings.currency_symbol, &settings.date_format)
        );
    } else {
        print!(
            "{}",
            format_expense_table(&expenses, &settings.currency_symbol, &settings.date_format)
        );
    }
    Ok(())
}

pub fn handle_show_command(storage: &Storage, settings: &Settings, id: &str) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let expense = ExpenseService::new(storage).find(user.id, id)?;

    print!(
        "{}",
        format_expense_details(&expense, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

pub fn handle_edit_command(storage: &Storage, settings: &Settings, args: EditArgs) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let service = ExpenseService::new(storage);
    let expense = service.find(user.id, &args.id)?;

    let patch = ExpensePatch {
        amount: args.amount.as_deref().map(parse_amount).transpose()?,
        category: args
            .category
            .as_deref()
            .map(|c| ExpenseService::resolve_category(c).map(|c| c.id.to_string()))
            .transpose()?,
        date: args.date.as_deref().map(parse_date).transpose()?,
        notes: if args.clear_notes {
            Some(None)
        } else {
            args.notes.map(Some)
        },
        receipt_url: if args.clear_receipt {
            Some(None)
        } else {
            args.receipt.map(Some)
        },
    };

    if patch.is_empty() {
        return Err(ExpenseError::Validation(
            "Nothing to update. Pass at least one field to change.".into(),
        ));
    }

    let updated = service.update(expense.id, patch)?;

    println!("Updated {}", updated.id);
    print!(
        "{}",
        format_expense_details(&updated, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

pub fn handle_delete_command(storage: &Storage, settings: &Settings, id: &str) -> ExpenseResult<()> {
    let user = require_user(storage)?;
    let service = ExpenseService::new(storage);
    let expense = service.find(user.id, id)?;
    let removed = service.delete(expense.id)?;

    println!(
        "Deleted {} ({} {})",
        removed.id,
        removed.category_info().name,
        removed.amount.format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}
