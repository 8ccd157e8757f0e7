//! Receipt ingest
//!
//! Turns a captured receipt image into a best-effort [`OcrResult`] used to
//! prefill an expense draft. Scanning never fails: problems are reported in
//! the result's text.
//!
//! The scanner variant is chosen once, by [`build_scanner`], from the
//! receipt settings.

pub mod extract;
pub mod remote;
pub mod simulated;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

pub use remote::RemoteScanner;
pub use simulated::SimulatedScanner;

use crate::config::{ReceiptSettings, ScannerStrategy};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::OcrResult;

/// Reference to a captured receipt image (a path or `file://` URI)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptImage {
    reference: String,
}

impl ReceiptImage {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// The reference exactly as captured
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Local filesystem path behind the reference
    pub fn path(&self) -> PathBuf {
        PathBuf::from(
            self.reference
                .strip_prefix("file://")
                .unwrap_or(&self.reference),
        )
    }

    pub fn read_bytes(&self) -> ExpenseResult<Vec<u8>> {
        let path = self.path();
        std::fs::read(&path).map_err(|e| {
            ExpenseError::Receipt(format!("Cannot read image {}: {}", path.display(), e))
        })
    }

    /// MIME type guessed from the file extension
    pub fn mime_type(&self) -> &'static str {
        let ext = Path::new(&self.reference)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("heic") => "image/heic",
            Some("gif") => "image/gif",
            _ => "image/jpeg",
        }
    }
}

/// Produces a structured guess from a receipt image
pub trait ReceiptScanner {
    /// Short name shown to the user
    fn name(&self) -> &'static str;

    fn scan(&self, image: &ReceiptImage) -> OcrResult;
}

/// Build the scanner selected by the settings
///
/// The remote strategy falls back to simulation when no endpoint is
/// configured or the HTTP client cannot be built.
pub fn build_scanner(settings: &ReceiptSettings) -> Box<dyn ReceiptScanner> {
    match (settings.strategy, settings.endpoint.as_deref()) {
        (ScannerStrategy::Simulated, _) => Box::new(SimulatedScanner::new()),
        (ScannerStrategy::Remote, Some(endpoint)) if !endpoint.trim().is_empty() => {
            match RemoteScanner::new(
                endpoint.trim(),
                settings.prompt.clone(),
                Duration::from_secs(settings.timeout_secs),
            ) {
                Ok(scanner) => Box::new(scanner),
                Err(e) => {
                    warn!(error = %e, "remote scanner unavailable, using simulation");
                    Box::new(SimulatedScanner::new())
                }
            }
        }
        (ScannerStrategy::Remote, _) => {
            warn!("remote scanner selected without an endpoint, using simulation");
            Box::new(SimulatedScanner::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path_and_mime() {
        let image = ReceiptImage::new("file:///tmp/photos/IMG_1.PNG");
        assert_eq!(image.path(), PathBuf::from("/tmp/photos/IMG_1.PNG"));
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(ReceiptImage::new("scan").mime_type(), "image/jpeg");
    }

    #[test]
    fn test_read_missing_image_is_receipt_error() {
        let err = ReceiptImage::new("/no/such/receipt.jpg")
            .read_bytes()
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Receipt(_)));
    }

    #[test]
    fn test_build_scanner_selection() {
        let mut settings = ReceiptSettings::default();
        assert_eq!(build_scanner(&settings).name(), "simulated");

        settings.strategy = ScannerStrategy::Remote;
        assert_eq!(build_scanner(&settings).name(), "simulated");

        settings.endpoint = Some("http://127.0.0.1:9/extract".into());
        assert_eq!(build_scanner(&settings).name(), "remote");
    }
}
