//! # Storage Layer
//!
//! shelf persists very little: the set of favorite tools and the theme
//! preference. Both live in a flat string key-value store, the same shape a
//! browser's local storage has. The [`KeyValueStore`] trait is that capability,
//! injected wherever persistence is needed so the core never touches the
//! filesystem directly.
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | [`FAVORITES_KEY`] (`favoritos`) | JSON array of tool names |
//! | [`THEME_KEY`] (`theme`) | `"dark"` or `"light"` |
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production store, one `storage.json` per directory.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <store_dir>/
//! └── storage.json        # {"favoritos": "[\"Canva\"]", "theme": "dark"}
//! ```
//!
//! Values are stored as opaque strings: the store does not know that
//! `favoritos` holds JSON. Decoding, and degrading on garbage, is the caller's job.

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;

pub const FAVORITES_KEY: &str = "favoritos";
pub const THEME_KEY: &str = "theme";

/// Abstract interface for string-valued persistent storage.
///
/// All methods take `&self`: shelf is single-threaded and backends use
/// interior mutability where they need it.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one. Must be durable on return.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
