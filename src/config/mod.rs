//! Configuration module for expense-cli
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Receipt scanner selection

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::{ReceiptSettings, ScannerStrategy, Settings};
