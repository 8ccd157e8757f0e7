//! Receipt scanner backed by a remote text-extraction endpoint
//!
//! One POST per scan, no retry. Every failure degrades to a text-only
//! [`OcrResult`] describing what went wrong.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::Client;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, OcrResult};

use super::extract::{extract_amount, extract_date, extract_merchant, parse_date_field};
use super::{ReceiptImage, ReceiptScanner};

pub struct RemoteScanner {
    client: Client,
    endpoint: String,
    prompt: String,
}

impl RemoteScanner {
    pub fn new(
        endpoint: impl Into<String>,
        prompt: impl Into<String>,
        timeout: Duration,
    ) -> ExpenseResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExpenseError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            prompt: prompt.into(),
        })
    }

    fn request(&self, image: &ReceiptImage) -> ExpenseResult<OcrResult> {
        let bytes = image.read_bytes()?;
        let body = json!({
            "prompt": self.prompt,
            "image": STANDARD.encode(&bytes),
            "mimeType": image.mime_type(),
        });

        debug!(endpoint = %self.endpoint, bytes = bytes.len(), "submitting receipt");
        let response = self.client.post(&self.endpoint).json(&body).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExpenseError::Receipt(format!("endpoint returned {}", status)));
        }

        let text = response.text()?;
        if text.trim().is_empty() {
            return Err(ExpenseError::Receipt("empty response".into()));
        }

        Ok(parse_response(&text))
    }
}

impl ReceiptScanner for RemoteScanner {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn scan(&self, image: &ReceiptImage) -> OcrResult {
        match self.request(image) {
            Ok(result) => result,
            Err(e) => {
                warn!(reference = image.reference(), error = %e, "receipt scan failed");
                OcrResult::failed(e)
            }
        }
    }
}

/// Interpret an endpoint response body
///
/// A JSON object carrying any known field is used directly, with missing
/// amount or date recovered from its `text`. Anything else is free text.
pub fn parse_response(body: &str) -> OcrResult {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) if has_known_field(&map) => from_json(&map, body),
        Ok(Value::String(text)) => from_text(&text),
        _ => from_text(body),
    }
}

const AMOUNT_KEYS: [&str; 2] = ["amount", "total"];
const MERCHANT_KEYS: [&str; 2] = ["merchantName", "merchant"];

fn has_known_field(map: &Map<String, Value>) -> bool {
    AMOUNT_KEYS
        .iter()
        .chain(MERCHANT_KEYS.iter())
        .chain(["date", "text"].iter())
        .any(|key| map.contains_key(*key))
}

fn from_json(map: &Map<String, Value>, body: &str) -> OcrResult {
    let text = map
        .get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());

    let amount = AMOUNT_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(money_from_value))
        .or_else(|| extract_amount(&text));

    let date = map
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_date_field)
        .or_else(|| extract_date(&text));

    let merchant_name = MERCHANT_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    OcrResult {
        amount,
        date,
        merchant_name,
        text,
    }
}

fn from_text(text: &str) -> OcrResult {
    OcrResult {
        amount: extract_amount(text),
        date: extract_date(text),
        merchant_name: extract_merchant(text),
        text: text.to_string(),
    }
}

fn money_from_value(value: &Value) -> Option<Money> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(|f| (f * 100.0).round())
            .filter(|cents| cents.is_finite() && cents.abs() < i64::MAX as f64)
            .map(|cents| Money::from_cents(cents as i64)),
        Value::String(s) => Money::parse(s).ok().or_else(|| extract_amount(s)),
        _ => None,
    }
}
