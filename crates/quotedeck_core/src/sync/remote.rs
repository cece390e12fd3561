//! Remote source seam and in-memory mock implementation.
//!
//! # Responsibility
//! - Define the contract for fetching remote items and echoing new quotes
//!   outward.
//! - Ship a deterministic mock standing in for the HTTP collaborator.
//!
//! # Invariants
//! - `push` responses are not interpreted; a push is fire-and-forget.
//! - Fetch failures are recoverable; callers skip the cycle.

use crate::model::quote::{now_ms, Quote};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category label assigned to every quote ingested from the remote source.
pub const REMOTE_CATEGORY: &str = "server";

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote collaborator failure. Always recoverable at the sync layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Fetch or push did not complete; carries a human-readable cause.
    Unavailable(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(cause) => write!(f, "remote source unavailable: {cause}"),
        }
    }
}

impl Error for RemoteError {}

/// One item as returned by the remote endpoint.
///
/// The endpoint returns arbitrary items; only a title-like field is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteItem {
    pub title: String,
}

impl RemoteItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Maps this item into a quote: title becomes `text`, the category is the
    /// fixed remote label, and `updatedAt` is freshly generated.
    pub fn into_quote(self) -> Quote {
        Quote::new(self.title, REMOTE_CATEGORY)
    }
}

/// Remote quote endpoint contract.
pub trait RemoteSource {
    /// Fetches the current remote item list.
    fn fetch(&self) -> RemoteResult<Vec<RemoteItem>>;

    /// Echoes a newly added quote outward. The response is discarded.
    fn push(&self, quote: &Quote) -> RemoteResult<()>;
}

/// In-memory mock server, mirroring the simulated database the original
/// variants sync against. Pushed quotes become fetchable items.
#[derive(Default)]
pub struct MockRemoteSource {
    items: RefCell<Vec<RemoteItem>>,
    unavailable: RefCell<bool>,
}

impl MockRemoteSource {
    pub fn new(items: Vec<RemoteItem>) -> Self {
        Self {
            items: RefCell::new(items),
            unavailable: RefCell::new(false),
        }
    }

    /// Makes every subsequent call fail until re-enabled. Test hook for the
    /// skip-cycle-on-network-error path.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.borrow_mut() = unavailable;
    }

    /// Current number of items held by the mock server.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl RemoteSource for MockRemoteSource {
    fn fetch(&self) -> RemoteResult<Vec<RemoteItem>> {
        if *self.unavailable.borrow() {
            return Err(RemoteError::Unavailable("mock offline".to_string()));
        }
        Ok(self.items.borrow().clone())
    }

    fn push(&self, quote: &Quote) -> RemoteResult<()> {
        if *self.unavailable.borrow() {
            return Err(RemoteError::Unavailable("mock offline".to_string()));
        }
        self.items
            .borrow_mut()
            .push(RemoteItem::new(quote.text.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MockRemoteSource, RemoteError, RemoteItem, RemoteSource, REMOTE_CATEGORY};
    use crate::model::quote::Quote;

    #[test]
    fn remote_item_maps_into_server_quote() {
        let quote = RemoteItem::new("fetched title").into_quote();
        assert_eq!(quote.text, "fetched title");
        assert_eq!(quote.category, REMOTE_CATEGORY);
        assert!(quote.updated_at_ms > 0);
    }

    #[test]
    fn pushed_quotes_become_fetchable() {
        let remote = MockRemoteSource::default();
        remote.push(&Quote::new("echoed", "any")).unwrap();

        let items = remote.fetch().unwrap();
        assert_eq!(items, vec![RemoteItem::new("echoed")]);
        assert_eq!(remote.len(), 1);
        assert!(!remote.is_empty());
    }

    #[test]
    fn unavailable_mock_fails_both_directions() {
        let remote = MockRemoteSource::default();
        remote.set_unavailable(true);

        assert!(matches!(
            remote.fetch().unwrap_err(),
            RemoteError::Unavailable(_)
        ));
        assert!(remote.push(&Quote::new("x", "y")).is_err());
    }
}
