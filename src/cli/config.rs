//! Configuration CLI commands
//!
//! `config` prints (and optionally changes) the settings; `init` writes the
//! settings file and data directories.

use clap::Args;

use crate::config::paths::ExpensePaths;
use crate::config::settings::{ScannerStrategy, Settings, MAX_TREND_MONTHS};
use crate::display::is_valid_date_format;
use crate::error::{ExpenseError, ExpenseResult};

/// Arguments for `expense config`
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Currency symbol used for display
    #[arg(long)]
    pub currency: Option<String>,

    /// Display date format (strftime, e.g. "%Y-%m-%d")
    #[arg(long)]
    pub date_format: Option<String>,

    /// Number of months in the trend view
    #[arg(long)]
    pub trend_months: Option<usize>,

    /// Receipt scanner to use
    #[arg(long, value_enum)]
    pub scanner: Option<ScannerStrategy>,

    /// Text-extraction endpoint for the remote scanner
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Remote scanner timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ConfigArgs {
    fn has_changes(&self) -> bool {
        self.currency.is_some()
            || self.date_format.is_some()
            || self.trend_months.is_some()
            || self.scanner.is_some()
            || self.endpoint.is_some()
            || self.timeout.is_some()
    }

    /// Apply the requested changes, validating each before touching `settings`
    fn apply(self, settings: &mut Settings) -> ExpenseResult<()> {
        if let Some(format) = &self.date_format {
            if !is_valid_date_format(format) {
                return Err(ExpenseError::Validation(format!(
                    "'{}' is not a valid date format",
                    format
                )));
            }
        }
        if let Some(months) = self.trend_months {
            if !(1..=MAX_TREND_MONTHS).contains(&months) {
                return Err(ExpenseError::Validation(format!(
                    "Trend months must be between 1 and {}",
                    MAX_TREND_MONTHS
                )));
            }
        }
        if self.timeout == Some(0) {
            return Err(ExpenseError::Validation(
                "Timeout must be at least 1 second".into(),
            ));
        }

        if let Some(currency) = self.currency {
            settings.currency_symbol = currency.trim().to_string();
        }
        if let Some(format) = self.date_format {
            settings.date_format = format;
        }
        if let Some(months) = self.trend_months {
            settings.trend_months = months;
        }
        if let Some(strategy) = self.scanner {
            settings.receipt.strategy = strategy;
        }
        if let Some(endpoint) = self.endpoint {
            let endpoint = endpoint.trim().to_string();
            settings.receipt.endpoint = if endpoint.is_empty() { None } else { Some(endpoint) };
        }
        if let Some(timeout) = self.timeout {
            settings.receipt.timeout_secs = timeout;
        }
        Ok(())
    }
}

pub fn handle_config_command(
    paths: &ExpensePaths,
    settings: &mut Settings,
    args: ConfigArgs,
) -> ExpenseResult<()> {
    if args.has_changes() {
        args.apply(settings)?;
        settings.save(paths)?;
        println!("Settings saved.");
        println!();
    }

    println!("expense-cli Configuration");
    println!("=========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Export directory: {}", paths.export_dir().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Trend months:    {}", settings.trend_months);
    println!("  Scanner:         {:?}", settings.receipt.strategy);
    println!(
        "  Endpoint:        {}",
        settings.receipt.endpoint.as_deref().unwrap_or("(none)")
    );
    println!("  Timeout:         {}s", settings.receipt.timeout_secs);
    Ok(())
}

pub fn handle_init_command(paths: &ExpensePaths, settings: &Settings) -> ExpenseResult<()> {
    let already = paths.is_initialized();

    paths.ensure_directories()?;
    settings.save(paths)?;

    if already {
        println!("Already initialized at: {}", paths.base_dir().display());
    } else {
        println!("Initialized expense-cli at: {}", paths.base_dir().display());
    }
    println!();
    println!("Run 'expense register <email> --name <name>' to create a profile,");
    println!("then 'expense add <amount> <category>' to record spending.");
    Ok(())
}
