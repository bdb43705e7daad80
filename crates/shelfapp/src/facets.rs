//! Facets: the values offered as filter buttons, and the rules that keep the
//! active selection consistent with them.
//!
//! The tag facet is derived from tools passing the price, admin and favorites
//! filters only. It ignores the search text, and it ignores the tag filter
//! itself so the user can always switch to another tag.

use crate::model::{Choice, Tool};
use crate::pipeline::{base_matches, FavoriteLookup};
use crate::state::FilterState;
use std::collections::BTreeSet;

/// Tags present among the tools matching the non-tag, non-search filters.
/// Sorted, deduplicated.
pub fn available_tags<F>(records: &[Tool], state: &FilterState, favorites: &F) -> Vec<String>
where
    F: FavoriteLookup + ?Sized,
{
    records
        .iter()
        .filter(|t| base_matches(t, state, favorites))
        .flat_map(|t| t.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Falls back to `All` when the active tag vanished from the facet.
pub fn reconcile_active_tag(state: &FilterState, available: &[String]) -> FilterState {
    match &state.active_tag {
        Choice::Only(tag) if !available.iter().any(|t| t == tag) => {
            let mut next = state.clone();
            next.active_tag = Choice::All;
            next.current_page = 1;
            next
        }
        _ => state.clone(),
    }
}

/// Distinct price tiers in the catalog, sorted. Tools without a price get no button.
pub fn price_tiers(records: &[Tool]) -> Vec<String> {
    records
        .iter()
        .filter(|t| !t.price.trim().is_empty())
        .map(|t| t.price.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether the "clear filters" control should be shown. Sort order does not count.
pub fn is_any_filter_active(state: &FilterState) -> bool {
    !state.normalized_search().is_empty()
        || !state.active_tag.is_all()
        || !state.active_price.is_all()
        || state.admin_only
        || state.favorites_only
}
