//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as standalone
//! files in `templates/`, which are easier to edit and diff than string
//! literals. They are embedded here at compile time.
//!
//! Conventions:
//!
//! 1. Line breaks are explicit. Templates are rendered with the trailing
//!    newline kept, and block tags sit at line ends so they never leave blank
//!    lines behind.
//! 2. Styles are chosen in Rust. When a style depends on data (an active
//!    facet, say), the template data carries the style name and the template
//!    just applies it.
//! 3. Layout math (rule widths, joining tags) happens in `render.rs`.

pub const CATALOG_TEMPLATE: &str = include_str!("templates/catalog.jinja");
pub const CARD_TEMPLATE: &str = include_str!("templates/card.jinja");
pub const LINES_TEMPLATE: &str = include_str!("templates/lines.jinja");
pub const MESSAGE_TEMPLATE: &str = include_str!("templates/message.jinja");
