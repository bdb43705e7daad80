//! # Filter State
//!
//! [`FilterState`] is the complete description of what the user is looking at:
//! which facets are selected, the search text, the sort order and the page.
//! It is plain data. The only way to change it is [`FilterState::apply`], a pure
//! reducer from `(state, event)` to the next state.
//!
//! ## Page Reset Rule
//!
//! Any change to a filter or to the sort order sends the user back to page 1.
//! [`FilterEvent::GoToPage`] is the only transition that moves the page
//! elsewhere. Re-selecting the tag or tier that is already active changes
//! nothing, so it does not reset the page either.

use crate::model::{Choice, SortKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub active_tag: Choice,
    pub active_price: Choice,
    pub admin_only: bool,
    pub favorites_only: bool,
    /// Raw user input; normalized only when matching.
    pub search_term: String,
    pub sort_key: SortKey,
    /// 1-based. Never clamped against the result size.
    pub current_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_tag: Choice::All,
            active_price: Choice::All,
            admin_only: false,
            favorites_only: false,
            search_term: String::new(),
            sort_key: SortKey::ByName,
            current_page: 1,
        }
    }
}

/// A user intent that changes [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    SelectTag(Choice),
    SelectPrice(Choice),
    SetAdminOnly(bool),
    SetFavoritesOnly(bool),
    SetSearch(String),
    SetSort(SortKey),
    GoToPage(usize),
    ClearFilters,
}

impl FilterState {
    /// Returns the state after `event`. `self` is left untouched.
    pub fn apply(&self, event: FilterEvent) -> FilterState {
        let mut next = self.clone();
        match event {
            FilterEvent::SelectTag(tag) => {
                if tag == self.active_tag {
                    return next;
                }
                next.active_tag = tag;
            }
            FilterEvent::SelectPrice(price) => {
                if price == self.active_price {
                    return next;
                }
                next.active_price = price;
            }
            FilterEvent::SetAdminOnly(on) => next.admin_only = on,
            FilterEvent::SetFavoritesOnly(on) => next.favorites_only = on,
            FilterEvent::SetSearch(term) => next.search_term = term,
            FilterEvent::SetSort(key) => next.sort_key = key,
            FilterEvent::GoToPage(page) => {
                next.current_page = page.max(1);
                return next;
            }
            FilterEvent::ClearFilters => return FilterState::default(),
        }
        next.current_page = 1;
        next
    }

    /// Trimmed, lowercased search term. Empty means "no search".
    pub fn normalized_search(&self) -> String {
        normalize_search(&self.search_term)
    }
}

pub fn normalize_search(raw: &str) -> String {
    raw.trim().to_lowercase()
}
