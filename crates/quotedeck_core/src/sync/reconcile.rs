//! Last-writer-wins merge of local and remote quote lists.
//!
//! This is a single-timestamp merge, not a distributed-systems algorithm:
//! there is no vector clock, no causal ordering, and no detection of
//! divergent concurrent edits beyond comparing `updatedAt`.

use crate::model::quote::Quote;

/// Field(s) deciding when two records denote "the same" quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityKey {
    /// Text equality. The historical default, and deliberately weak: two
    /// distinct quotes sharing text collapse into one.
    #[default]
    Text,
    /// Stable id equality. The stronger opt-in key.
    Id,
}

impl IdentityKey {
    fn matches(self, left: &Quote, right: &Quote) -> bool {
        match self {
            Self::Text => left.text == right.text,
            Self::Id => left.id == right.id,
        }
    }
}

/// Merges `remote` into `local` under the given identity key.
///
/// Precedence:
/// - same-identity pair: the record with the greater `updatedAt` survives;
///   an exact tie keeps local;
/// - remote-only records are appended in remote order;
/// - local-only records are always kept.
///
/// Every surviving record appears exactly once; local order comes first.
/// The operation is idempotent: merging the same remote list again changes
/// nothing.
pub fn merge(local: &[Quote], remote: &[Quote], identity: IdentityKey) -> Vec<Quote> {
    let mut merged: Vec<Quote> = local.to_vec();

    for remote_quote in remote {
        match merged
            .iter_mut()
            .find(|candidate| identity.matches(candidate, remote_quote))
        {
            Some(existing) => {
                if remote_quote.updated_at_ms > existing.updated_at_ms {
                    *existing = remote_quote.clone();
                }
            }
            None => merged.push(remote_quote.clone()),
        }
    }

    merged
}
