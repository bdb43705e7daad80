//! # Favorites
//!
//! The set of tools the user marked, keyed by tool name. It is the only catalog
//! state that outlives a session.
//!
//! ## Persistence
//!
//! Stored under [`FAVORITES_KEY`] as a JSON array of names, in the order they
//! were added. The array is rewritten on every toggle, with no batching.
//!
//! ## Degrading on Load
//!
//! A missing key, unparsable JSON, or a JSON value that is not an array of
//! strings all load as an empty set. That is logged at debug level and never
//! reported to the user. Duplicate names in storage are collapsed.
//!
//! ## Identity
//!
//! Tools are keyed by `name`. Two tools with the same name are the same
//! favorite: marking one marks both.

use crate::error::{Result, ShelfError};
use crate::pipeline::FavoriteLookup;
use crate::store::{KeyValueStore, FAVORITES_KEY};
use tracing::debug;

pub struct Favorites<S: KeyValueStore> {
    store: S,
    names: Vec<String>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Load favorites from `store`. Never fails: unreadable data is an empty set.
    pub fn load(store: S) -> Self {
        let names = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "could not read favorites, starting empty");
                Vec::new()
            }
        };
        Self { store, names }
    }

    /// Flip membership of `name` and persist. Returns the new membership.
    ///
    /// The in-memory set only changes once storage accepted the write.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let mut next = self.names.clone();
        let now_favorite = if let Some(pos) = next.iter().position(|n| n == name) {
            next.remove(pos);
            false
        } else {
            next.push(name.to_string());
            true
        };

        let encoded = serde_json::to_string(&next).map_err(ShelfError::Serialization)?;
        self.store.set(FAVORITES_KEY, &encoded)?;
        self.names = next;
        debug!(name, favorite = now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> FavoriteLookup for Favorites<S> {
    fn is_favorite(&self, name: &str) -> bool {
        Favorites::is_favorite(self, name)
    }
}

fn decode(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => {
            let mut names: Vec<String> = Vec::with_capacity(list.len());
            for name in list {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            names
        }
        Err(e) => {
            debug!(error = %e, "stored favorites are corrupt, starting empty");
            Vec::new()
        }
    }
}
