//! Export module for expense-cli
//!
//! Spreadsheet-compatible CSV export of an already filtered expense list.

pub mod csv;

pub use csv::{deliver_csv, export_filename, generate_csv, write_csv, CSV_HEADER};
