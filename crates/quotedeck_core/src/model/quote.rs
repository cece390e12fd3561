//! Quote domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record `{id, text, category, updatedAt}`.
//! - Provide constructors for fresh and externally-identified records.
//!
//! # Invariants
//! - `id` is stable and never reused for another quote.
//! - `text` must be non-empty after trimming; enforced by `validate` at every
//!   write boundary (add, replace, import, remote ingestion).
//! - `updated_at_ms` is set at last write and only moves forward through
//!   `touch`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a quote record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type QuoteId = Uuid;

/// Category assigned when the caller provides none.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Validation failure for quote boundary input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
    /// `text` is empty or whitespace-only.
    EmptyText,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text must not be empty"),
        }
    }
}

impl Error for QuoteValidationError {}

/// Canonical quote record.
///
/// Field names in the serialized form match the persisted browser format
/// (`updatedAt` in particular), so exported files stay interchangeable with
/// the original storage payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Stable global ID used for lookup and the optional strong merge key.
    pub id: QuoteId,
    /// The quote body. Non-empty after validation.
    pub text: String,
    /// Free-form category label; defaults to [`DEFAULT_CATEGORY`].
    pub category: String,
    /// Unix epoch milliseconds of the last write to this record.
    #[serde(rename = "updatedAt")]
    pub updated_at_ms: i64,
}

impl Quote {
    /// Creates a new quote with a generated stable ID and a fresh timestamp.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text, category, now_ms())
    }

    /// Creates a quote with caller-provided identity and timestamp.
    ///
    /// Used by import/sync paths where identity or write time already exists
    /// externally.
    pub fn with_id(
        id: QuoteId,
        text: impl Into<String>,
        category: impl Into<String>,
        updated_at_ms: i64,
    ) -> Self {
        let category = category.into();
        Self {
            id,
            text: text.into(),
            category: if category.trim().is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category
            },
            updated_at_ms,
        }
    }

    /// Checks boundary invariants before the record may enter the store.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.text.trim().is_empty() {
            return Err(QuoteValidationError::EmptyText);
        }
        Ok(())
    }

    /// Bumps `updated_at_ms` to the current wall clock.
    pub fn touch(&mut self) {
        self.updated_at_ms = now_ms();
    }
}

/// Current wall clock as Unix epoch milliseconds.
///
/// Clamps to zero for clocks set before the epoch rather than failing; a
/// zero timestamp only makes the record lose last-writer-wins ties.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{now_ms, Quote, QuoteValidationError, DEFAULT_CATEGORY};
    use uuid::Uuid;

    #[test]
    fn new_quote_gets_id_category_and_timestamp() {
        let quote = Quote::new("stay hungry", "motivation");
        assert!(!quote.text.is_empty());
        assert_eq!(quote.category, "motivation");
        assert!(quote.updated_at_ms > 0);
    }

    #[test]
    fn blank_category_falls_back_to_default() {
        let quote = Quote::with_id(Uuid::new_v4(), "text", "   ", 1);
        assert_eq!(quote.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn validate_rejects_whitespace_only_text() {
        let quote = Quote::with_id(Uuid::new_v4(), "  \t ", "any", 1);
        assert_eq!(quote.validate(), Err(QuoteValidationError::EmptyText));
    }

    #[test]
    fn serde_uses_updated_at_wire_name() {
        let quote = Quote::with_id(Uuid::new_v4(), "wire", "fmt", 42);
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["updatedAt"], 42);
        assert!(json.get("updated_at_ms").is_none());
    }

    #[test]
    fn touch_moves_timestamp_forward() {
        let mut quote = Quote::with_id(Uuid::new_v4(), "t", "c", 0);
        quote.touch();
        assert!(quote.updated_at_ms >= now_ms() - 1_000);
    }
}
