//! Sync cycle orchestration.
//!
//! # Responsibility
//! - Drive one reconcile cycle: fetch remote items, map them into quotes,
//!   merge into the store, persist.
//! - Guard against overlapping auto-triggered cycles (single-flight).
//!
//! # Invariants
//! - A fetch failure skips the whole cycle; the local list is untouched.
//! - Remote items with blank titles never reach the store.

use crate::model::quote::Quote;
use crate::repo::kv_repo::KvStore;
use crate::repo::quote_store::{QuoteStore, StoreError};
use crate::sync::reconcile::{merge, IdentityKey};
use crate::sync::remote::{RemoteError, RemoteSource};
use log::{debug, info, warn};
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SyncResult<T> = Result<T, SyncError>;

/// Failure of one sync cycle. Local state is untouched in every case.
#[derive(Debug)]
pub enum SyncError {
    Remote(RemoteError),
    Store(StoreError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Remote(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RemoteError> for SyncError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

impl From<StoreError> for SyncError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Counters describing one completed reconcile cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Items returned by the remote fetch.
    pub fetched: usize,
    /// Local records replaced by a newer remote version.
    pub updated: usize,
    /// Remote records appended with no local counterpart.
    pub appended: usize,
}

/// Result of a sync trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed(SyncReport),
    /// Another cycle was already in flight; this trigger did nothing.
    Skipped,
}

/// Reconciler driving merge-on-sync against one remote source.
pub struct SyncService<R: RemoteSource> {
    remote: R,
    identity: IdentityKey,
    in_flight: Cell<bool>,
}

impl<R: RemoteSource> SyncService<R> {
    /// Creates a service using the historical text-equality identity key.
    pub fn new(remote: R) -> Self {
        Self::with_identity(remote, IdentityKey::default())
    }

    /// Creates a service with an explicit identity key.
    pub fn with_identity(remote: R, identity: IdentityKey) -> Self {
        Self {
            remote,
            identity,
            in_flight: Cell::new(false),
        }
    }

    /// Identity key used for merging.
    pub fn identity(&self) -> IdentityKey {
        self.identity
    }

    /// Runs one reconcile cycle against the given store.
    ///
    /// Returns `SyncOutcome::Skipped` when a cycle is already in flight,
    /// which is how periodic auto-triggers avoid racing on the same list.
    /// A remote failure skips the cycle and leaves local state untouched;
    /// there is no retry.
    pub fn sync_once<S: KvStore>(&self, store: &mut QuoteStore<S>) -> SyncResult<SyncOutcome> {
        if self.in_flight.replace(true) {
            info!("event=sync_cycle module=sync status=skipped reason=in_flight");
            return Ok(SyncOutcome::Skipped);
        }

        let result = self.run_cycle(store);
        self.in_flight.set(false);
        result
    }

    /// Echoes a newly added quote to the remote source, best-effort.
    ///
    /// The response is not interpreted; failures are logged and swallowed.
    pub fn push_best_effort(&self, quote: &Quote) {
        if let Err(err) = self.remote.push(quote) {
            warn!("event=sync_push module=sync status=warn error={err}");
        }
    }

    fn run_cycle<S: KvStore>(&self, store: &mut QuoteStore<S>) -> SyncResult<SyncOutcome> {
        let items = match self.remote.fetch() {
            Ok(items) => items,
            Err(err) => {
                warn!("event=sync_cycle module=sync status=error stage=fetch error={err}");
                return Err(err.into());
            }
        };

        let fetched = items.len();
        let remote_quotes: Vec<Quote> = items
            .into_iter()
            .filter(|item| {
                let usable = !item.title.trim().is_empty();
                if !usable {
                    debug!("event=sync_cycle module=sync status=drop reason=blank_title");
                }
                usable
            })
            .map(|item| item.into_quote())
            .collect();

        let local = store.quotes();
        let local_len = local.len();
        let merged = merge(local, &remote_quotes, self.identity);

        let updated = local
            .iter()
            .zip(merged.iter())
            .filter(|(before, after)| before != after)
            .count();
        let appended = merged.len() - local_len;

        store.replace_all(merged)?;

        let report = SyncReport {
            fetched,
            updated,
            appended,
        };
        info!(
            "event=sync_cycle module=sync status=ok fetched={} updated={} appended={}",
            report.fetched, report.updated, report.appended
        );
        Ok(SyncOutcome::Completed(report))
    }
}
