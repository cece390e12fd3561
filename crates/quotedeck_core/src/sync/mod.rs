//! Local/remote reconciliation.
//!
//! # Responsibility
//! - Merge a remotely fetched quote list into the local list with a
//!   deterministic precedence rule and persist the result.
//! - Keep the remote collaborator behind a trait seam.
//!
//! # Invariants
//! - A failed fetch skips the cycle; local state is left untouched.
//! - Only one reconcile cycle runs at a time; overlapping triggers are
//!   reported as skipped, not raced.

pub mod reconcile;
pub mod remote;
pub mod service;
