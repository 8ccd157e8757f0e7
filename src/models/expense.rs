//! Expense model
//!
//! An expense is a single recorded spending event owned by a user. Identity
//! fields (`id`, `user_id`, `created_at`) never change after creation; the
//! remaining fields are edited through [`ExpensePatch`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{self, Category};
use super::ids::{ExpenseId, UserId};
use super::money::Money;
use super::receipt::OcrResult;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Always positive
    pub amount: Money,

    /// Category registry id
    pub category: String,

    /// Day the money was spent
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Reference to the stored receipt image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,

    pub created_at: DateTime<Utc>,

    pub user_id: UserId,
}

impl Expense {
    /// Materialize a draft, assigning identity fields
    pub fn from_draft(draft: ExpenseDraft) -> Self {
        Self {
            id: ExpenseId::new(),
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            notes: draft.notes,
            receipt_url: draft.receipt_url,
            created_at: Utc::now(),
            user_id: draft.user_id,
        }
    }

    /// Registry entry for display (falls back to "Other")
    pub fn category_info(&self) -> &'static Category {
        category::lookup(&self.category)
    }

    /// Apply a patch; identity fields are untouched
    pub fn apply(&mut self, patch: &ExpensePatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        if let Some(receipt_url) = &patch.receipt_url {
            self.receipt_url = receipt_url.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(self.amount, &self.category)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date,
            self.category_info().name,
            self.amount
        )
    }
}

/// Input for creating an expense; identity fields are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
    pub user_id: UserId,
}

impl ExpenseDraft {
    pub fn new(user_id: UserId, amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
            notes: None,
            receipt_url: None,
            user_id,
        }
    }

    /// Prefill a draft from a scanned receipt
    ///
    /// A missing amount is left at zero so validation rejects the draft until
    /// the user supplies one; a missing date defaults to `today`; the merchant
    /// name becomes the note.
    pub fn from_ocr(
        result: &OcrResult,
        user_id: UserId,
        receipt_url: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            amount: result.amount.unwrap_or_default(),
            category: category::OTHER_ID.to_string(),
            date: result.date.unwrap_or(today),
            notes: result.merchant_name.clone(),
            receipt_url: Some(receipt_url.into()),
            user_id,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_receipt(mut self, receipt_url: impl Into<String>) -> Self {
        self.receipt_url = Some(receipt_url.into());
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(self.amount, &self.category)
    }
}

/// Partial update of an expense's mutable fields
///
/// `notes` and `receipt_url` are double options: `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
    pub receipt_url: Option<Option<String>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A mutation request produced by the core and applied by the expense service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseIntent {
    Create(ExpenseDraft),
    Update { id: ExpenseId, patch: ExpensePatch },
    Delete(ExpenseId),
}

fn validate_fields(amount: Money, category: &str) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    if category.trim().is_empty() {
        return Err(ExpenseValidationError::MissingCategory);
    }
    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    MissingCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::MissingCategory => write!(f, "Category is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> ExpenseDraft {
        ExpenseDraft::new(
            UserId::for_email("a@b.c"),
            Money::from_cents(1250),
            "food",
            date(2024, 3, 1),
        )
    }

    #[test]
    fn test_from_draft_assigns_identity() {
        let expense = Expense::from_draft(draft().with_notes("lunch"));
        assert_eq!(expense.amount.cents(), 1250);
        assert_eq!(expense.category, "food");
        assert_eq!(expense.notes.as_deref(), Some("lunch"));
        assert_eq!(expense.user_id, UserId::for_email("a@b.c"));
    }

    #[test]
    fn test_validation() {
        assert!(draft().validate().is_ok());

        let mut zero = draft();
        zero.amount = Money::zero();
        assert!(matches!(
            zero.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));

        let mut negative = draft();
        negative.amount = Money::from_cents(-1);
        assert!(negative.validate().is_err());

        let mut blank = draft();
        blank.category = "  ".into();
        assert_eq!(blank.validate(), Err(ExpenseValidationError::MissingCategory));
    }

    #[test]
    fn test_apply_patch_keeps_identity() {
        let mut expense = Expense::from_draft(draft().with_notes("old"));
        let before = expense.clone();

        expense.apply(&ExpensePatch {
            amount: Some(Money::from_cents(999)),
            category: Some("transport".into()),
            notes: Some(None),
            ..Default::default()
        });

        assert_eq!(expense.id, before.id);
        assert_eq!(expense.created_at, before.created_at);
        assert_eq!(expense.user_id, before.user_id);
        assert_eq!(expense.amount.cents(), 999);
        assert_eq!(expense.category, "transport");
        assert_eq!(expense.date, before.date);
        assert!(expense.notes.is_none());
    }

    #[test]
    fn test_unknown_category_displays_as_other() {
        let mut d = draft();
        d.category = "groceries".into();
        let expense = Expense::from_draft(d);
        assert_eq!(expense.category_info().name, "Other");
    }

    #[test]
    fn test_from_ocr_prefill() {
        let result = OcrResult {
            amount: Some(Money::from_cents(4200)),
            date: None,
            merchant_name: Some("Coffee Shop".into()),
            text: "Coffee Shop\nTotal: 42.00".into(),
        };
        let today = date(2024, 5, 10);
        let d = ExpenseDraft::from_ocr(&result, UserId::for_email("a@b.c"), "r.jpg", today);

        assert_eq!(d.amount.cents(), 4200);
        assert_eq!(d.date, today);
        assert_eq!(d.notes.as_deref(), Some("Coffee Shop"));
        assert_eq!(d.receipt_url.as_deref(), Some("r.jpg"));
        assert_eq!(d.category, "other");
    }

    #[test]
    fn test_from_ocr_failure_is_invalid_draft() {
        let d = ExpenseDraft::from_ocr(
            &OcrResult::failed("timeout"),
            UserId::for_email("a@b.c"),
            "r.jpg",
            date(2024, 5, 10),
        );
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ExpensePatch::default().is_empty());
        let patch = ExpensePatch {
            date: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_serialization_omits_empty_optionals() {
        let expense = Expense::from_draft(draft());
        let json = serde_json::to_string(&expense).unwrap();
        assert!(!json.contains("notes"));
        assert!(!json.contains("receipt_url"));

        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }
}
