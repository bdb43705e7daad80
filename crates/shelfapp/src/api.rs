//! # API Facade
//!
//! [`ShelfApi`] is the single entry point for clients. It owns the catalog, the
//! current [`FilterState`], the [`Favorites`] set and the search [`Debouncer`],
//! and turns user intents into fresh [`Snapshot`]s.
//!
//! Clients never touch the state directly. They send an [`Event`] and render
//! what comes back, the same way every time:
//!
//! 1. the event is applied to the state (or to favorites),
//! 2. the tag facet is re-derived and a tag that disappeared is dropped,
//! 3. the visible page is recomputed.
//!
//! ## Search Input
//!
//! Search text arrives in two ways. [`ShelfApi::search_input`] is typing: the
//! term is held back until input has been quiet for the debounce delay and
//! only then applied, from [`ShelfApi::poll`] or [`ShelfApi::flush`].
//! [`Event::SearchSubmit`] is an explicit submit: it applies at once and drops
//! whatever was pending.
//!
//! Time is always passed in, so a session can be replayed deterministically.

use crate::debounce::{Debouncer, DEFAULT_DELAY};
use crate::error::Result;
use crate::facets::{available_tags, is_any_filter_active, price_tiers, reconcile_active_tag};
use crate::favorites::Favorites;
use crate::model::Tool;
use crate::pipeline::{compute_visible, PageView};
use crate::state::{FilterEvent, FilterState};
use crate::store::KeyValueStore;
use crate::theme::Theme;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Filter(FilterEvent),
    ToggleFavorite(String),
    /// Apply a search term now, skipping the debounce.
    SearchSubmit(String),
}

impl From<FilterEvent> for Event {
    fn from(event: FilterEvent) -> Self {
        Event::Filter(event)
    }
}

/// Everything a client needs to draw the catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub state: FilterState,
    pub view: PageView,
    pub available_tags: Vec<String>,
    pub price_tiers: Vec<String>,
    pub filters_active: bool,
    pub favorites: Vec<String>,
}

impl Snapshot {
    pub fn total_pages(&self) -> usize {
        self.view.total_pages()
    }
}

pub struct ShelfApi<S: KeyValueStore> {
    records: Vec<Tool>,
    tiers: Vec<String>,
    state: FilterState,
    favorites: Favorites<S>,
    search: Debouncer<String>,
}

impl<S: KeyValueStore> ShelfApi<S> {
    pub fn new(records: Vec<Tool>, store: S) -> Self {
        Self::with_debounce(records, store, DEFAULT_DELAY)
    }

    pub fn with_debounce(records: Vec<Tool>, store: S, delay: Duration) -> Self {
        let tiers = price_tiers(&records);
        let favorites = Favorites::load(store);
        debug!(
            tools = records.len(),
            favorites = favorites.len(),
            "catalog session started"
        );
        Self {
            records,
            tiers,
            state: FilterState::default(),
            favorites,
            search: Debouncer::new(delay),
        }
    }

    /// Start from `state` instead of the defaults. The tag is reconciled as usual.
    pub fn with_state(mut self, state: FilterState) -> Self {
        self.state = state;
        self.reconcile();
        self
    }

    pub fn dispatch(&mut self, event: Event) -> Result<Snapshot> {
        debug!(?event, "dispatch");
        match event {
            Event::Filter(FilterEvent::ClearFilters) => {
                self.search.cancel();
                self.state = self.state.apply(FilterEvent::ClearFilters);
            }
            Event::Filter(filter) => self.state = self.state.apply(filter),
            Event::ToggleFavorite(name) => {
                self.favorites.toggle(&name)?;
            }
            Event::SearchSubmit(term) => {
                self.search.cancel();
                self.state = self.state.apply(FilterEvent::SetSearch(term));
            }
        }
        self.reconcile();
        Ok(self.snapshot())
    }

    /// Record typed search text. Nothing is recomputed until the input settles.
    pub fn search_input(&mut self, term: impl Into<String>, now: Instant) {
        self.search.schedule(term.into(), now);
    }

    /// Apply the pending search term if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<Snapshot> {
        let term = self.search.poll(now)?;
        Some(self.apply_search(term))
    }

    /// Apply the pending search term regardless of the delay.
    pub fn flush(&mut self) -> Option<Snapshot> {
        let term = self.search.flush()?;
        Some(self.apply_search(term))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    pub fn snapshot(&self) -> Snapshot {
        let view = compute_visible(&self.records, &self.state, &self.favorites);
        debug!(
            matching = view.total_matching,
            page = view.page,
            shown = view.items.len(),
            "recomputed"
        );
        Snapshot {
            state: self.state.clone(),
            available_tags: available_tags(&self.records, &self.state, &self.favorites),
            price_tiers: self.tiers.clone(),
            filters_active: is_any_filter_active(&self.state),
            favorites: self.favorites.names().to_vec(),
            view,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn records(&self) -> &[Tool] {
        &self.records
    }

    pub fn favorites(&self) -> &Favorites<S> {
        &self.favorites
    }

    pub fn theme(&self) -> Result<Option<Theme>> {
        Theme::load(self.favorites.store())
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        theme.save(self.favorites.store())
    }

    fn apply_search(&mut self, term: String) -> Snapshot {
        debug!(term = %term, "applying settled search input");
        self.state = self.state.apply(FilterEvent::SetSearch(term));
        self.reconcile();
        self.snapshot()
    }

    fn reconcile(&mut self) {
        let tags = available_tags(&self.records, &self.state, &self.favorites);
        let next = reconcile_active_tag(&self.state, &tags);
        if next != self.state {
            debug!(tag = %self.state.active_tag, "active tag no longer available, resetting");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Choice, SortKey};
    use crate::store::mem_backend::MemBackend;
    use crate::store::FAVORITES_KEY;

    fn catalog() -> Vec<Tool> {
        vec![
            Tool::new("A", "Gratuito").with_tags(["x"]),
            Tool::new("B", "Pago").with_tags(["y"]),
            Tool::new("C", "Pago").with_tags(["x", "y"]).with_text("chat", ""),
        ]
    }

    fn api(store: &MemBackend) -> ShelfApi<&MemBackend> {
        ShelfApi::new(catalog(), store)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn initial_snapshot() {
        let store = MemBackend::new();
        let snap = api(&store).snapshot();
        assert_eq!(snap.view.names(), vec!["A", "B", "C"]);
        assert_eq!(snap.available_tags, vec!["x", "y"]);
        assert_eq!(snap.price_tiers, vec!["Gratuito", "Pago"]);
        assert!(!snap.filters_active);
        assert!(snap.favorites.is_empty());
    }

    #[test]
    fn price_filter_scenario() {
        let store = MemBackend::new();
        let mut api = api(&store);
        let snap = api
            .dispatch(FilterEvent::SelectPrice(Choice::only("Gratuito")).into())
            .unwrap();
        assert_eq!(snap.view.names(), vec!["A"]);
        assert_eq!(snap.view.total_matching, 1);
        assert_eq!(snap.available_tags, vec!["x"]);
        assert!(snap.filters_active);
    }

    #[test]
    fn vanished_tag_falls_back_to_all() {
        let store = MemBackend::new();
        let mut api = api(&store);
        api.dispatch(FilterEvent::SelectTag(Choice::only("y")).into())
            .unwrap();
        let snap = api
            .dispatch(FilterEvent::SelectPrice(Choice::only("Gratuito")).into())
            .unwrap();
        assert!(snap.state.active_tag.is_all());
        assert_eq!(snap.view.names(), vec!["A"]);
    }

    #[test]
    fn toggle_favorite_persists_and_narrows() {
        let store = MemBackend::new();
        let mut api = api(&store);
        api.dispatch(FilterEvent::SetFavoritesOnly(true).into())
            .unwrap();
        let snap = api.dispatch(Event::ToggleFavorite("B".into())).unwrap();
        assert_eq!(snap.view.names(), vec!["B"]);
        assert_eq!(snap.favorites, vec!["B"]);
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["B"]"#));
    }

    #[test]
    fn unfavoriting_under_favorites_only_drops_the_tag() {
        let store = MemBackend::new().with_entry(FAVORITES_KEY, r#"["A"]"#);
        let mut api = api(&store);
        api.dispatch(FilterEvent::SetFavoritesOnly(true).into())
            .unwrap();
        api.dispatch(FilterEvent::SelectTag(Choice::only("x")).into())
            .unwrap();
        let snap = api.dispatch(Event::ToggleFavorite("A".into())).unwrap();
        assert!(snap.state.active_tag.is_all());
        assert!(snap.view.is_empty());
    }

    #[test]
    fn failed_favorite_write_is_reported() {
        let store = MemBackend::new();
        let mut api = api(&store);
        store.set_simulate_write_error(true);
        assert!(api.dispatch(Event::ToggleFavorite("A".into())).is_err());
        assert!(!api.favorites().is_favorite("A"));
    }

    #[test]
    fn typed_search_waits_for_quiet() {
        let store = MemBackend::new();
        let mut api = ShelfApi::with_debounce(catalog(), &store, ms(300));
        let t0 = Instant::now();

        let mut recomputes = Vec::new();
        for (i, term) in ["c", "ch", "cha"].iter().enumerate() {
            let now = t0 + ms(50 * i as u64);
            recomputes.extend(api.poll(now));
            api.search_input(*term, now);
        }
        assert_eq!(api.state().search_term, "");
        assert_eq!(api.next_deadline(), Some(t0 + ms(400)));

        recomputes.extend(api.poll(t0 + ms(399)));
        recomputes.extend(api.poll(t0 + ms(400)));
        recomputes.extend(api.poll(t0 + ms(900)));

        assert_eq!(recomputes.len(), 1);
        assert_eq!(recomputes[0].state.search_term, "cha");
        assert_eq!(recomputes[0].view.names(), vec!["C"]);
    }

    #[test]
    fn submit_cancels_pending_input() {
        let store = MemBackend::new();
        let mut api = api(&store);
        let t0 = Instant::now();
        api.search_input("zz", t0);
        let snap = api.dispatch(Event::SearchSubmit("chat".into())).unwrap();
        assert_eq!(snap.view.names(), vec!["C"]);
        assert!(!api.has_pending_search());
        assert!(api.poll(t0 + ms(10_000)).is_none());
    }

    #[test]
    fn flush_applies_pending_input() {
        let store = MemBackend::new();
        let mut api = api(&store);
        api.search_input("zz", Instant::now());
        let snap = api.flush().unwrap();
        assert!(snap.view.is_empty());
        assert_eq!(snap.view.total_matching, 0);
        assert!(api.flush().is_none());
    }

    #[test]
    fn clear_drops_pending_search_and_resets() {
        let store = MemBackend::new();
        let mut api = api(&store);
        api.dispatch(FilterEvent::SetSort(SortKey::ByPrice).into())
            .unwrap();
        api.search_input("zz", Instant::now());
        let snap = api.dispatch(FilterEvent::ClearFilters.into()).unwrap();
        assert_eq!(snap.state, FilterState::default());
        assert!(!api.has_pending_search());
    }

    #[test]
    fn theme_shares_the_store() {
        let store = MemBackend::new();
        let api = api(&store);
        assert_eq!(api.theme().unwrap(), None);
        api.save_theme(Theme::Dark).unwrap();
        assert_eq!(api.theme().unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn with_state_reconciles() {
        let store = MemBackend::new();
        let state = FilterState::default().apply(FilterEvent::SelectTag(Choice::only("nope")));
        let api = api(&store).with_state(state);
        assert!(api.state().active_tag.is_all());
    }
}
