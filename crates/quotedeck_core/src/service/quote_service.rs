//! Quote use-case service.
//!
//! # Responsibility
//! - Provide command handlers taking validated input structs, independent of
//!   any UI surface.
//! - Delegate list ownership to the store and merging to the sync service.
//!
//! # Invariants
//! - Handlers never bypass store validation/persistence contracts.
//! - Every failure degrades to "keep prior in-memory state and inform the
//!   caller"; nothing here is fatal.

use crate::model::quote::{Quote, QuoteId};
use crate::repo::kv_repo::KvStore;
use crate::repo::quote_store::{QuoteStore, StoreError};
use crate::select::{filtered, list_categories, pick_random};
use crate::sync::remote::RemoteSource;
use crate::sync::service::{SyncError, SyncOutcome, SyncService};
use crate::transfer::{append_deduplicated, export_json, import_json, TransferError};
use log::info;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of one command handler.
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Transfer(TransferError),
    Sync(SyncError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
            Self::Sync(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Transfer(err) => Some(err),
            Self::Sync(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<TransferError> for ServiceError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

impl From<SyncError> for ServiceError {
    fn from(value: SyncError) -> Self {
        Self::Sync(value)
    }
}

/// Input for the add-quote command. Category may be blank; the record then
/// gets the default category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddQuoteRequest {
    pub text: String,
    pub category: String,
}

/// Command-handler facade over the store and the sync service.
pub struct QuoteService<S: KvStore, R: RemoteSource> {
    store: QuoteStore<S>,
    sync: SyncService<R>,
}

impl<S: KvStore, R: RemoteSource> QuoteService<S, R> {
    pub fn new(store: QuoteStore<S>, sync: SyncService<R>) -> Self {
        Self { store, sync }
    }

    /// Read view over the owned quote list.
    pub fn quotes(&self) -> &[Quote] {
        self.store.quotes()
    }

    /// Validates and appends a new quote, then echoes it to the remote
    /// source best-effort.
    pub fn add_quote(&mut self, request: AddQuoteRequest) -> ServiceResult<QuoteId> {
        let quote = Quote::new(request.text, request.category);
        let id = self.store.append(quote)?;
        // Push is fire-and-forget; the added quote is already durable locally.
        if let Some(added) = self.store.get(id) {
            self.sync.push_best_effort(added);
        }
        info!("event=quote_add module=service status=ok id={id}");
        Ok(id)
    }

    /// Replaces an existing quote wholesale, bumping its write timestamp.
    pub fn replace_quote(&mut self, id: QuoteId, mut quote: Quote) -> ServiceResult<()> {
        quote.touch();
        self.store.replace(id, quote)?;
        Ok(())
    }

    /// Picks one quote uniformly from the given category and remembers both
    /// the selection and the filter.
    ///
    /// Returns `None` when the filtered subset is empty; that is the explicit
    /// "no quote available" outcome.
    pub fn random_quote_with<G: Rng>(&mut self, category: &str, rng: &mut G) -> Option<Quote> {
        self.store.set_filter(category);
        let subset = filtered(self.store.quotes(), category);
        let picked = pick_random(&subset, rng).cloned()?;
        self.store.remember_last_shown(picked.id);
        Some(picked)
    }

    /// [`random_quote_with`] using the thread-local RNG.
    ///
    /// [`random_quote_with`]: QuoteService::random_quote_with
    pub fn random_quote(&mut self, category: &str) -> Option<Quote> {
        self.random_quote_with(category, &mut rand::thread_rng())
    }

    /// Sorted category labels currently present in the list.
    pub fn categories(&self) -> Vec<String> {
        list_categories(self.store.quotes()).into_iter().collect()
    }

    /// The persisted category filter (all-categories sentinel by default).
    pub fn current_filter(&self) -> String {
        self.store.filter()
    }

    /// Persists the selected category filter without picking a quote.
    pub fn set_filter(&mut self, category: &str) {
        self.store.set_filter(category);
    }

    /// The quote last shown in this session, if it still exists.
    pub fn last_shown(&self) -> Option<Quote> {
        let id = self.store.last_shown()?;
        self.store.get(id).cloned()
    }

    /// Serializes the full list as pretty-printed JSON for file export.
    pub fn export_quotes(&self) -> ServiceResult<String> {
        Ok(export_json(self.store.quotes())?)
    }

    /// Imports a JSON payload, appending sanitized records with same-text
    /// de-duplication. Returns how many records were added.
    ///
    /// A rejected payload (not JSON, not an array, no valid quotes) changes
    /// no state.
    pub fn import_quotes(&mut self, payload: &str) -> ServiceResult<usize> {
        let imported = import_json(payload)?;

        let mut quotes = self.store.quotes().to_vec();
        let added = append_deduplicated(&mut quotes, imported);
        if added > 0 {
            self.store.replace_all(quotes)?;
        }
        info!("event=quote_import module=service status=ok added={added}");
        Ok(added)
    }

    /// Runs one reconcile cycle against the remote source.
    pub fn sync_now(&mut self) -> ServiceResult<SyncOutcome> {
        Ok(self.sync.sync_once(&mut self.store)?)
    }

    /// Replaces the whole list with the fixed seed data.
    pub fn reset_to_seed(&mut self) {
        self.store.reset_to_seed();
    }
}

#[cfg(test)]
mod tests {
    use super::{AddQuoteRequest, QuoteService, ServiceError};
    use crate::repo::kv_repo::MemoryKvStore;
    use crate::repo::quote_store::{QuoteStore, StoreError};
    use crate::select::ALL_CATEGORIES;
    use crate::sync::remote::MockRemoteSource;
    use crate::sync::service::SyncService;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn service() -> QuoteService<MemoryKvStore, MockRemoteSource> {
        let mut store = QuoteStore::new(MemoryKvStore::new());
        store.replace_all(Vec::new()).unwrap();
        QuoteService::new(store, SyncService::new(MockRemoteSource::default()))
    }

    #[test]
    fn add_quote_rejects_empty_text_without_state_change() {
        let mut svc = service();
        let err = svc
            .add_quote(AddQuoteRequest {
                text: "   ".to_string(),
                category: "x".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(StoreError::Validation(_))
        ));
        assert!(svc.quotes().is_empty());
    }

    #[test]
    fn random_quote_on_empty_category_is_none_and_persists_filter() {
        let mut svc = service();
        svc.add_quote(AddQuoteRequest {
            text: "only one".to_string(),
            category: "life".to_string(),
        })
        .unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        assert!(svc.random_quote_with("nope", &mut rng).is_none());
        assert_eq!(svc.current_filter(), "nope");
    }

    #[test]
    fn random_quote_remembers_last_shown() {
        let mut svc = service();
        svc.add_quote(AddQuoteRequest {
            text: "pickable".to_string(),
            category: "life".to_string(),
        })
        .unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        let picked = svc.random_quote_with(ALL_CATEGORIES, &mut rng).unwrap();
        assert_eq!(svc.last_shown().unwrap().id, picked.id);
    }

    #[test]
    fn default_filter_is_the_all_sentinel() {
        let svc = service();
        assert_eq!(svc.current_filter(), ALL_CATEGORIES);
    }
}
