//! Core domain logic for quotedeck: a local-first quote store with category
//! filtering, random selection, JSON import/export and merge-on-sync
//! reconciliation against a remote source.
//!
//! This crate is the single source of truth for business invariants; UI
//! shells talk to [`QuoteService`] command handlers only.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod select;
pub mod service;
pub mod sync;
pub mod transfer;

pub use logging::{init_logging, logging_status, LoggingError};
pub use model::quote::{now_ms, Quote, QuoteId, QuoteValidationError, DEFAULT_CATEGORY};
pub use repo::kv_repo::{KvStore, MemoryKvStore, SqliteKvStore};
pub use repo::quote_store::{
    seed_quotes, QuoteStore, StoreError, StoreResult, FILTER_KEY, LAST_QUOTE_KEY, QUOTES_KEY,
};
pub use select::{filtered, list_categories, pick_random, ALL_CATEGORIES};
pub use service::quote_service::{AddQuoteRequest, QuoteService, ServiceError, ServiceResult};
pub use sync::reconcile::{merge, IdentityKey};
pub use sync::remote::{
    MockRemoteSource, RemoteError, RemoteItem, RemoteResult, RemoteSource, REMOTE_CATEGORY,
};
pub use sync::service::{SyncError, SyncOutcome, SyncReport, SyncResult, SyncService};
pub use transfer::{append_deduplicated, export_json, import_json, TransferError, TransferResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
