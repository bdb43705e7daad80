//! # Shelf Architecture
//!
//! Shelf is a **UI-agnostic catalog browsing library**. Given a list of tools
//! it answers one question over and over: with these filters, this search and
//! this sort order, which cards are on the current page? The `shelf` binary
//! is just one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (shelf crate)                                          │
//! │  - Parses arguments and stdin commands, renders cards       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns state, favorites and the search debouncer           │
//! │  - Turns events into snapshots                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (state.rs, pipeline.rs, facets.rs)                    │
//! │  - Pure functions over plain data                           │
//! │  - Total: nothing here can fail                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract KeyValueStore trait                             │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process, and never reads the clock. Time comes in as an `Instant` argument,
//! storage comes in as a [`store::KeyValueStore`]. The same core could sit
//! behind a web page, a TUI or a test harness.
//!
//! ## Testing Strategy
//!
//! 1. **Core** (`state`, `pipeline`, `facets`): Thorough unit tests. This is
//!    where the lion's share of testing lives.
//! 2. **API** (`api.rs`): Event sequences against a `MemBackend`, checking the
//!    resulting snapshots and what was persisted.
//! 3. **Properties** (`tests/`): proptest laws for the pipeline over generated
//!    catalogs, and filesystem tests for `FsBackend`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`state`]: `FilterState` and its transitions
//! - [`pipeline`]: Filter, sort and paginate
//! - [`facets`]: Tag facet, price tiers, clear-filters visibility
//! - [`favorites`]: Persisted favorite names
//! - [`theme`]: Persisted light/dark preference
//! - [`debounce`]: Settling of typed search input
//! - [`catalog`]: Loading tool records
//! - [`model`]: Core data types (`Tool`, `Choice`, `SortKey`, `PriceTier`)
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod facets;
pub mod favorites;
pub mod model;
pub mod pipeline;
pub mod state;
pub mod store;
pub mod theme;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
