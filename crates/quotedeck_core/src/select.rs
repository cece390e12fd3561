//! Category projection and random quote selection.
//!
//! # Responsibility
//! - Derive the category set from a read view of the quote list.
//! - Compute exact-match category subsets, with `"all"` as the no-filter
//!   sentinel.
//! - Pick one quote uniformly at random, never from an empty set.

use crate::model::quote::Quote;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Sentinel category meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Returns the set of category strings present in `quotes`.
///
/// Sorted as a convenience; consumers may re-sort however they like.
pub fn list_categories(quotes: &[Quote]) -> BTreeSet<String> {
    quotes
        .iter()
        .map(|quote| quote.category.clone())
        .collect()
}

/// Returns the subset of `quotes` matching `category`, preserving the
/// original order.
///
/// The [`ALL_CATEGORIES`] sentinel returns every record; any other value is
/// an exact match and may yield an empty subset.
pub fn filtered<'a>(quotes: &'a [Quote], category: &str) -> Vec<&'a Quote> {
    if category == ALL_CATEGORIES {
        return quotes.iter().collect();
    }
    quotes
        .iter()
        .filter(|quote| quote.category == category)
        .collect()
}

/// Picks one quote uniformly at random from `list`.
///
/// Returns `None` for an empty list; an empty filter result is an explicit
/// "no quote available" outcome, never a panic.
pub fn pick_random<'a, R: Rng>(list: &[&'a Quote], rng: &mut R) -> Option<&'a Quote> {
    list.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::{filtered, list_categories, pick_random, ALL_CATEGORIES};
    use crate::model::quote::Quote;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Vec<Quote> {
        vec![
            Quote::new("a", "life"),
            Quote::new("b", "work"),
            Quote::new("c", "life"),
        ]
    }

    #[test]
    fn categories_are_projected_without_duplicates() {
        let quotes = sample();
        let categories = list_categories(&quotes);
        assert_eq!(
            categories.into_iter().collect::<Vec<_>>(),
            vec!["life".to_string(), "work".to_string()]
        );
    }

    #[test]
    fn all_sentinel_returns_every_record_in_order() {
        let quotes = sample();
        let view = filtered(&quotes, ALL_CATEGORIES);
        assert_eq!(view.len(), quotes.len());
        for (selected, original) in view.iter().zip(quotes.iter()) {
            assert_eq!(selected.id, original.id);
        }
    }

    #[test]
    fn exact_match_subset_may_be_empty() {
        let quotes = sample();
        assert_eq!(filtered(&quotes, "life").len(), 2);
        assert!(filtered(&quotes, "unknown").is_empty());
    }

    #[test]
    fn pick_random_on_empty_list_is_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_random(&[], &mut rng).is_none());
    }

    #[test]
    fn pick_random_selects_from_the_given_list() {
        let quotes = sample();
        let view = filtered(&quotes, "life");
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_random(&view, &mut rng).unwrap();
        assert_eq!(picked.category, "life");
    }
}
