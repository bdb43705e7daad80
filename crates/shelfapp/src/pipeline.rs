//! # Filter Pipeline
//!
//! The heart of shelf: a pure function from the full catalog plus a
//! [`FilterState`] to the page of tools to display.
//!
//! ## Stages
//!
//! Applied in this exact order, each one narrowing the previous output:
//!
//! 1. **Price**: keep tools whose tier equals the active one (skipped for `All`).
//! 2. **Admin**: with `admin_only`, keep tools with a non-blank admin comment.
//! 3. **Favorites**: with `favorites_only`, keep tools whose name is a favorite.
//! 4. **Tag**: keep tools carrying the active tag, exact and case-sensitive
//!    (skipped for `All`).
//! 5. **Search**: keep tools whose lowercased name, intro, description or any
//!    tag contains the trimmed, lowercased term (skipped when the term is empty).
//! 6. **Sort**: by name, or by price tier weight with ties broken by name.
//! 7. **Paginate**: fixed pages of [`PAGE_SIZE`].
//!
//! Stages 1-3 are also what the tag facet is derived from (see
//! [`crate::facets`]), which is why they are exposed separately as
//! [`base_matches`].
//!
//! ## Totality
//!
//! Nothing here fails. Missing optional fields were already normalized to
//! empty values when the catalog was parsed, and a page past the end simply
//! yields no items. The page is never clamped: that is left to the caller,
//! which can use [`PageView::total_pages`].

use crate::model::{SortKey, Tool};
use crate::state::FilterState;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Number of cards per page.
pub const PAGE_SIZE: usize = 9;

/// Membership test for favorite tool names.
pub trait FavoriteLookup {
    fn is_favorite(&self, name: &str) -> bool;
}

impl FavoriteLookup for HashSet<String> {
    fn is_favorite(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl FavoriteLookup for [String] {
    fn is_favorite(&self, name: &str) -> bool {
        self.iter().any(|n| n == name)
    }
}

impl FavoriteLookup for Vec<String> {
    fn is_favorite(&self, name: &str) -> bool {
        self.as_slice().is_favorite(name)
    }
}

/// One page of the filtered, sorted catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub items: Vec<Tool>,
    /// Matches across all pages.
    pub total_matching: usize,
    pub page: usize,
    pub page_size: usize,
}

impl PageView {
    pub fn total_pages(&self) -> usize {
        self.total_matching.div_ceil(self.page_size)
    }

    /// Pagination controls are only worth showing with more than one page.
    pub fn has_controls(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Stages 1-3: price, admin annotation, favorites.
pub fn base_matches<F>(tool: &Tool, state: &FilterState, favorites: &F) -> bool
where
    F: FavoriteLookup + ?Sized,
{
    if !state.active_price.accepts(&tool.price) {
        return false;
    }
    if state.admin_only && !tool.is_annotated() {
        return false;
    }
    if state.favorites_only && !favorites.is_favorite(&tool.name) {
        return false;
    }
    true
}

/// Stage 5. `term` must already be normalized; an empty term matches everything.
pub fn search_matches(tool: &Tool, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    tool.name.to_lowercase().contains(term)
        || tool.intro.to_lowercase().contains(term)
        || tool.description.to_lowercase().contains(term)
        || tool.tags.iter().any(|t| t.to_lowercase().contains(term))
}

/// Stages 1-5 for a single tool.
pub fn matches<F>(tool: &Tool, state: &FilterState, favorites: &F, term: &str) -> bool
where
    F: FavoriteLookup + ?Sized,
{
    base_matches(tool, state, favorites)
        && state.active_tag.as_only().map_or(true, |tag| tool.has_tag(tag))
        && search_matches(tool, term)
}

/// Stages 1-6: every matching tool, in display order.
pub fn filter_and_sort<'a, F>(
    records: &'a [Tool],
    state: &FilterState,
    favorites: &F,
) -> Vec<&'a Tool>
where
    F: FavoriteLookup + ?Sized,
{
    let term = state.normalized_search();
    let mut matched: Vec<&Tool> = records
        .iter()
        .filter(|t| matches(t, state, favorites, &term))
        .collect();
    sort_tools(&mut matched, state.sort_key);
    matched
}

/// The full pipeline.
pub fn compute_visible<F>(records: &[Tool], state: &FilterState, favorites: &F) -> PageView
where
    F: FavoriteLookup + ?Sized,
{
    let sorted = filter_and_sort(records, state, favorites);
    let total_matching = sorted.len();
    let page = state.current_page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE);

    let items = sorted
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    PageView {
        items,
        total_matching,
        page,
        page_size: PAGE_SIZE,
    }
}

/// Stable sort by the given key.
pub fn sort_tools(tools: &mut [&Tool], key: SortKey) {
    match key {
        SortKey::ByName => tools.sort_by_cached_key(|t| CollationKey::new(&t.name)),
        SortKey::ByPrice => {
            tools.sort_by_cached_key(|t| (t.tier().weight(), CollationKey::new(&t.name)))
        }
    }
}

/// Locale-aware name comparison.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Sort key approximating natural-language collation.
///
/// Levels, compared in order: base letters (accents and case folded away),
/// accents, case with lowercase first, and finally the raw string so that the
/// order is total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    base: String,
    accented: String,
    uppercase: Vec<bool>,
    raw: String,
}

impl CollationKey {
    fn new(s: &str) -> Self {
        let accented: String = s.nfd().flat_map(char::to_lowercase).collect();
        let base = accented.chars().filter(|c| !is_combining_mark(*c)).collect();
        let uppercase = s.chars().map(char::is_uppercase).collect();
        Self {
            base,
            accented,
            uppercase,
            raw: s.to_string(),
        }
    }
}
