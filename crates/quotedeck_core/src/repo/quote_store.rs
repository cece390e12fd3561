//! Quote store: exclusive owner of the canonical in-memory quote list.
//!
//! # Responsibility
//! - Load and persist the full quote list through a key-value backend.
//! - Guard every mutation behind `Quote::validate()`.
//! - Track the persisted category filter and the session-scoped last-shown id.
//!
//! # Invariants
//! - `id` is unique within the owned list.
//! - Missing or malformed persisted data is recovered by falling back to the
//!   seed list and immediately re-persisting it; never fatal.
//! - Persistence failures on mutation paths are logged as warnings; the
//!   in-memory list stays authoritative for the rest of the session.

use crate::db::DbError;
use crate::model::quote::{now_ms, Quote, QuoteId, QuoteValidationError};
use crate::repo::kv_repo::{KvStore, MemoryKvStore};
use crate::select::ALL_CATEGORIES;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Storage key holding the serialized quote list.
pub const QUOTES_KEY: &str = "quotes";
/// Storage key holding the last selected category filter.
pub const FILTER_KEY: &str = "last_filter";
/// Session key holding the last displayed quote id. Never persisted.
pub const LAST_QUOTE_KEY: &str = "last_quote";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store mutation and persistence errors.
#[derive(Debug)]
pub enum StoreError {
    Validation(QuoteValidationError),
    Db(DbError),
    NotFound(QuoteId),
    DuplicateId(QuoteId),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quote not found: {id}"),
            Self::DuplicateId(id) => write!(f, "quote id already present: {id}"),
            Self::Serialize(err) => write!(f, "failed to serialize quote list: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<QuoteValidationError> for StoreError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Fixed default quote list used when no persisted data exists or the
/// persisted payload is unreadable.
pub fn seed_quotes() -> Vec<Quote> {
    let now = now_ms();
    [
        ("The only limit is your mind.", "motivation"),
        ("Simplicity is the soul of efficiency.", "work"),
        ("What we think, we become.", "life"),
        ("Make it work, make it right, make it fast.", "work"),
        ("A day without laughter is a day wasted.", "humor"),
    ]
    .into_iter()
    .map(|(text, category)| Quote::with_id(Uuid::new_v4(), text, category, now))
    .collect()
}

/// Owner of the canonical quote list, backed by an injected key-value store.
///
/// All other components receive read views or submit whole-record writes
/// through this type; no second mutable copy of the list exists.
pub struct QuoteStore<S: KvStore> {
    kv: S,
    session: MemoryKvStore,
    quotes: Vec<Quote>,
}

impl<S: KvStore> QuoteStore<S> {
    /// Creates an empty store over the given backend. Call [`load`] before
    /// reading; `QuoteStore::open` does both.
    ///
    /// [`load`]: QuoteStore::load
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            session: MemoryKvStore::new(),
            quotes: Vec::new(),
        }
    }

    /// Creates a store and loads the persisted list.
    pub fn open(kv: S) -> StoreResult<Self> {
        let mut store = Self::new(kv);
        store.load()?;
        Ok(store)
    }

    /// Loads the persisted quote list into memory.
    ///
    /// Missing or malformed payloads fall back to the seed list, which is
    /// immediately re-persisted. Only backend read failures are returned as
    /// errors.
    pub fn load(&mut self) -> StoreResult<()> {
        match self.kv.get(QUOTES_KEY)? {
            Some(payload) => match serde_json::from_str::<Vec<Quote>>(&payload) {
                Ok(quotes) => {
                    info!(
                        "event=store_load module=store status=ok count={}",
                        quotes.len()
                    );
                    self.quotes = quotes;
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=fallback_seed reason=malformed error={err}"
                    );
                    self.reset_to_seed();
                }
            },
            None => {
                info!("event=store_load module=store status=fallback_seed reason=missing");
                self.reset_to_seed();
            }
        }
        Ok(())
    }

    /// Serializes the full list and persists it under [`QUOTES_KEY`].
    ///
    /// Callers on mutation paths treat a failure as a warning: the in-memory
    /// list remains authoritative.
    pub fn save(&self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.quotes)?;
        self.kv.put(QUOTES_KEY, &payload)?;
        Ok(())
    }

    /// Read view over the owned list.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Looks up one quote by stable id.
    pub fn get(&self, id: QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    /// Validates and appends one quote, then persists best-effort.
    ///
    /// # Errors
    /// - `Validation` when `text` is empty.
    /// - `DuplicateId` when the id is already present in the list.
    pub fn append(&mut self, quote: Quote) -> StoreResult<QuoteId> {
        quote.validate()?;
        if self.get(quote.id).is_some() {
            return Err(StoreError::DuplicateId(quote.id));
        }

        let id = quote.id;
        self.quotes.push(quote);
        self.persist_best_effort("store_append");
        Ok(id)
    }

    /// Validates and replaces the quote with the given id, then persists
    /// best-effort. The stored record keeps `id` regardless of the id carried
    /// by `quote`.
    pub fn replace(&mut self, id: QuoteId, mut quote: Quote) -> StoreResult<()> {
        quote.validate()?;
        quote.id = id;

        let slot = self
            .quotes
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = quote;
        self.persist_best_effort("store_replace");
        Ok(())
    }

    /// Whole-list write used by the reconciler and by import application.
    ///
    /// Every record must pass validation; the list is replaced atomically in
    /// memory and persisted best-effort.
    pub fn replace_all(&mut self, quotes: Vec<Quote>) -> StoreResult<()> {
        for quote in &quotes {
            quote.validate()?;
        }
        self.quotes = quotes;
        self.persist_best_effort("store_replace_all");
        Ok(())
    }

    /// Replaces the whole list with the fixed seed data and persists it.
    pub fn reset_to_seed(&mut self) {
        self.quotes = seed_quotes();
        self.persist_best_effort("store_reset_seed");
    }

    /// Persists the last selected category filter.
    pub fn set_filter(&mut self, category: &str) {
        if let Err(err) = self.kv.put(FILTER_KEY, category) {
            warn!("event=store_filter module=store status=warn error={err}");
        }
    }

    /// Returns the persisted category filter, defaulting to the
    /// all-categories sentinel.
    pub fn filter(&self) -> String {
        match self.kv.get(FILTER_KEY) {
            Ok(Some(category)) => category,
            Ok(None) => ALL_CATEGORIES.to_string(),
            Err(err) => {
                warn!("event=store_filter module=store status=warn error={err}");
                ALL_CATEGORIES.to_string()
            }
        }
    }

    /// Records the last displayed quote id for this session only.
    pub fn remember_last_shown(&self, id: QuoteId) {
        // MemoryKvStore::put cannot fail, but the trait contract can.
        if let Err(err) = self.session.put(LAST_QUOTE_KEY, &id.to_string()) {
            warn!("event=store_session module=store status=warn error={err}");
        }
    }

    /// Returns the last displayed quote id for this session, if any.
    pub fn last_shown(&self) -> Option<QuoteId> {
        let raw = self.session.get(LAST_QUOTE_KEY).ok().flatten()?;
        Uuid::parse_str(&raw).ok()
    }

    fn persist_best_effort(&self, event: &str) {
        if let Err(err) = self.save() {
            warn!("event={event} module=store status=warn error_code=persist_failed error={err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{seed_quotes, QuoteStore, StoreError};
    use crate::model::quote::Quote;
    use crate::repo::kv_repo::MemoryKvStore;
    use uuid::Uuid;

    #[test]
    fn append_rejects_duplicate_id() {
        let mut store = QuoteStore::open(MemoryKvStore::new()).unwrap();
        let quote = Quote::new("once", "test");
        let copy = quote.clone();

        store.append(quote).unwrap();
        let err = store.append(copy).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
    }

    #[test]
    fn replace_keeps_target_id() {
        let mut store = QuoteStore::open(MemoryKvStore::new()).unwrap();
        let id = store.append(Quote::new("before", "test")).unwrap();

        let replacement = Quote::new("after", "test");
        store.replace(id, replacement).unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.text, "after");
    }

    #[test]
    fn replace_unknown_id_is_not_found() {
        let mut store = QuoteStore::open(MemoryKvStore::new()).unwrap();
        let err = store
            .replace(Uuid::new_v4(), Quote::new("ghost", "test"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn seed_list_is_valid_and_non_empty() {
        let seed = seed_quotes();
        assert!(!seed.is_empty());
        for quote in &seed {
            quote.validate().unwrap();
        }
    }

    #[test]
    fn last_shown_is_session_scoped() {
        let store = QuoteStore::new(MemoryKvStore::new());
        assert_eq!(store.last_shown(), None);

        let id = Uuid::new_v4();
        store.remember_last_shown(id);
        assert_eq!(store.last_shown(), Some(id));

        let fresh = QuoteStore::new(MemoryKvStore::new());
        assert_eq!(fresh.last_shown(), None);
    }
}
