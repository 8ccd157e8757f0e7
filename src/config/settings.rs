//! User settings for expense-cli
//!
//! Manages display preferences and receipt scanner configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Which receipt scanner to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScannerStrategy {
    /// Deterministic offline simulation
    #[default]
    Simulated,
    /// Single call to a remote text-extraction endpoint
    Remote,
}

/// Receipt scanner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptSettings {
    #[serde(default)]
    pub strategy: ScannerStrategy,

    /// URL of the text-extraction endpoint (remote strategy only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Instruction sent along with the image
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_prompt() -> String {
    "Extract the total amount, the purchase date (YYYY-MM-DD) and the merchant name \
     from this receipt. Respond with JSON: {\"amount\": number, \"date\": string, \
     \"merchantName\": string, \"text\": string}."
        .to_string()
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            strategy: ScannerStrategy::default(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            prompt: default_prompt(),
        }
    }
}

/// User settings for expense-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Display date format (strftime), also used in CSV exports
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of months shown in trend views
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,

    #[serde(default)]
    pub receipt: ReceiptSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%b %-d, %Y".to_string()
}

fn default_trend_months() -> usize {
    6
}

/// Longest trend window accepted from the command line or settings
pub const MAX_TREND_MONTHS: usize = 120;

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            trend_months: default_trend_months(),
            receipt: ReceiptSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
