//! expense-cli - Terminal expense tracker
//!
//! This library provides the core functionality for the `expense` binary:
//! recording expenses (optionally prefilled from a receipt photo), checking
//! spending against a monthly budget, statistics and trends, and CSV export.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, budget, periods)
//! - `storage`: JSON file storage behind the entity store traits
//! - `services`: Business logic layer
//! - `reports`: Aggregation and budget evaluation
//! - `receipts`: Receipt scanning and text extraction
//! - `export`: CSV export
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_cli::config::{paths::ExpensePaths, settings::Settings};
//! use expense_cli::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod receipts;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr tracing subscriber
///
/// `RUST_LOG` overrides the default `expense_cli=warn` filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_cli=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
