//! # CLI Behavior
//!
//! This is **one possible UI client** for shelf, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ### Naked Execution (`shelf`)
//!
//! Running `shelf` with no arguments defaults to `shelf list`: the first page of
//! the whole catalog, sorted by name.
//!
//! ### One-shot vs. Interactive
//!
//! Every one-shot command starts from a fresh filter state built from its
//! flags. Only favorites and the theme persist between runs. `shelf browse`
//! keeps one state alive and reads commands from stdin, so typed search goes
//! through the same debounce a search box would.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `browse`: The interactive session
//! - `render`: Template rendering with styles
//! - `setup`: Argument parsing via clap, logging
//! - `styles`: Light and dark palettes
//! - `templates`: Embedded template sources

mod browse;
mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
