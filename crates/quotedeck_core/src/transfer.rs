//! JSON import and export of the quote list.
//!
//! # Responsibility
//! - Serialize the full list as pretty-printed JSON for file export.
//! - Parse imported payloads, rejecting anything that is not an array and
//!   sanitizing each element into a valid quote.
//!
//! # Invariants
//! - A rejected import changes no state; the caller reports the error.
//! - Sanitized records always satisfy `Quote::validate()`.

use crate::model::quote::{now_ms, Quote};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type TransferResult<T> = Result<T, TransferError>;

/// Import/export failure.
#[derive(Debug)]
pub enum TransferError {
    /// Payload is not parseable JSON.
    InvalidJson(serde_json::Error),
    /// Payload parsed but is not a JSON array.
    NotAnArray,
    /// Payload held no element that survived sanitization.
    NoValidQuotes,
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "payload is not valid JSON: {err}"),
            Self::NotAnArray => write!(f, "payload must be a JSON array of quotes"),
            Self::NoValidQuotes => write!(f, "no valid quotes in payload"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::NotAnArray | Self::NoValidQuotes => None,
        }
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// Serializes the full quote list as pretty-printed JSON.
pub fn export_json(quotes: &[Quote]) -> TransferResult<String> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Parses an imported payload into sanitized quotes.
///
/// Elements missing `id`, `category` or `updatedAt` get those fields
/// synthesized; elements without a usable non-empty `text` are skipped.
///
/// # Errors
/// - `InvalidJson` / `NotAnArray` for malformed payloads.
/// - `NoValidQuotes` when every element was skipped (including the empty
///   array).
pub fn import_json(payload: &str) -> TransferResult<Vec<Quote>> {
    let parsed: Value = serde_json::from_str(payload)?;
    let entries = match parsed {
        Value::Array(entries) => entries,
        _ => return Err(TransferError::NotAnArray),
    };

    let quotes: Vec<Quote> = entries.into_iter().filter_map(sanitize_entry).collect();
    if quotes.is_empty() {
        return Err(TransferError::NoValidQuotes);
    }
    Ok(quotes)
}

/// Appends imported quotes to `local`, skipping entries whose text is
/// already present. Returns how many records were added.
pub fn append_deduplicated(local: &mut Vec<Quote>, imported: Vec<Quote>) -> usize {
    let mut added = 0;
    for quote in imported {
        if local.iter().any(|existing| existing.text == quote.text) {
            continue;
        }
        local.push(quote);
        added += 1;
    }
    added
}

fn sanitize_entry(entry: Value) -> Option<Quote> {
    let object = entry.as_object()?;

    let text = object.get("text")?.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    let id = object
        .get("id")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(Uuid::new_v4);
    let category = object
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let updated_at_ms = object
        .get("updatedAt")
        .and_then(Value::as_i64)
        .unwrap_or_else(now_ms);

    Some(Quote::with_id(id, text, category, updated_at_ms))
}
