//! Receipt scan result
//!
//! Produced once per scan, used to prefill an expense draft, then discarded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Best-effort fields extracted from a receipt image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,

    /// Raw extracted text, or a failure note
    pub text: String,
}

impl OcrResult {
    /// Text-only result describing why the scan failed
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            amount: None,
            date: None,
            merchant_name: None,
            text: format!("Failed to process receipt: {}", reason),
        }
    }

    /// Whether no structured field could be extracted
    pub fn is_text_only(&self) -> bool {
        self.amount.is_none() && self.date.is_none() && self.merchant_name.is_none()
    }
}
