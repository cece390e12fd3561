//! Domain model for quote records.
//!
//! # Responsibility
//! - Define the canonical record shared by store, selector and reconciler.
//! - Keep boundary validation of user-supplied input in one place.
//!
//! # Invariants
//! - Every quote is identified by a stable `QuoteId`.
//! - `text` is never empty once a record passed `Quote::validate`.

pub mod quote;
