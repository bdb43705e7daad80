//! # Shelf CLI Architecture
//!
//! Shelf ships with a terminal client, but the binary is intentionally thin:
//! the CLI lives in `src/cli/`, while this file only invokes `cli::run()` and
//! handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/shelfapp/`: Core library with UI-agnostic filtering, facets and favorites
//! - `crates/shelf/`: This CLI tool, depends on `shelfapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/shelf/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + one-shot commands (commands.rs)         │
//! │  - Interactive session over stdin (browse.rs)               │
//! │  - Terminal rendering via minijinja templates (render.rs)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/shelfapp/src/api.rs)                     │
//! │  - Applies events, reconciles facets, recomputes the page   │
//! │  - Returns serializable `Snapshot` values                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer is therefore
//! responsible for **all** user-facing concerns: argument parsing, context
//! initialization, logging setup, error reporting and rendering.
//!
//! ## Rendering
//!
//! Templates live in `src/cli/templates/` and are embedded at compile time via
//! `include_str!()`. `render.rs` turns snapshots into template data and applies
//! named styles through a `style` filter, so layout changes stay in template
//! files. `--output json` skips templates and prints the snapshot itself.
//!
//! ## Testing Approach
//!
//! - **Library**: the filtering logic is unit tested in `shelfapp`.
//! - **CLI units**: argument and stdin-command parsing, template rendering
//!   from canned snapshots.
//! - **End to end** (`tests/`): the real binary against temp catalogs and
//!   store directories.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
