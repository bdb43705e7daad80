//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs the logging subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve config, open the store, pick the theme
//! 3. **API Dispatch**: Build a `ShelfApi` and send it events
//! 4. **Output Formatting**: Render snapshots as text or JSON
//!
//! Commands that only touch persisted preferences (`favorites`, `theme`) never
//! read the catalog, so they keep working when the catalog is missing.

use super::browse;
use super::render::{MessageLevel, Renderer};
use super::setup::{init_logging, Cli, Commands, FilterArgs, OutputFormat, ThemeAction};
use super::styles::{names, palette_for, system_prefers_dark};
use clap::Parser;
use serde::Serialize;
use shelfapp::api::{Event, ShelfApi, Snapshot};
use shelfapp::catalog;
use shelfapp::config::ShelfConfig;
use shelfapp::error::{Result, ShelfError};
use shelfapp::favorites::Favorites;
use shelfapp::state::FilterState;
use shelfapp::store::fs_backend::FsBackend;
use shelfapp::theme::Theme;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

pub(super) struct AppContext {
    pub config: ShelfConfig,
    pub store: FsBackend,
    pub renderer: Renderer,
    pub output: OutputFormat,
}

impl AppContext {
    /// Loads the catalog and opens a session starting at `state`.
    pub fn open_api(&self, state: FilterState) -> Result<ShelfApi<&FsBackend>> {
        let records = catalog::load(&self.config.catalog)?;
        Ok(
            ShelfApi::with_debounce(records, &self.store, self.config.search_debounce())
                .with_state(state),
        )
    }

    /// Prints `data` as pretty JSON, or the text produced by `text`.
    pub fn emit<T, F>(&self, data: &T, text: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&Renderer) -> Result<String>,
    {
        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(data)?);
            }
            OutputFormat::Text => print!("{}", text(&self.renderer)?),
        }
        Ok(())
    }

    pub fn print_message(&self, text: &str, level: MessageLevel) -> Result<()> {
        if self.output == OutputFormat::Text {
            print!("{}", self.renderer.message(text, level)?);
        }
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        None => handle_list(&ctx, &FilterArgs::default()),
        Some(Commands::List { filters }) => handle_list(&ctx, &filters),
        Some(Commands::Tags { filters }) => handle_tags(&ctx, &filters),
        Some(Commands::Prices) => handle_prices(&ctx),
        Some(Commands::Fav { name }) => handle_fav(&ctx, &name.join(" ")),
        Some(Commands::Favorites) => handle_favorites(&ctx),
        Some(Commands::Theme { action }) => handle_theme(&ctx, action),
        Some(Commands::Browse) => browse::run(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = ShelfConfig::load(&cwd)?;
    init_logging(&config.log_level, cli.verbose);

    if let Some(catalog) = &cli.catalog {
        config.catalog = catalog.clone();
    }
    if let Some(store) = &cli.store {
        config.store_dir = Some(store.clone());
    }
    debug!(?config, "configuration resolved");

    let store = FsBackend::new(config.store_dir());
    let theme = Theme::resolve(saved_theme(&store), system_prefers_dark());
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let renderer = Renderer::new(palette_for(theme), use_color)?;

    Ok(AppContext {
        config,
        store,
        renderer,
        output: cli.output,
    })
}

fn handle_list(ctx: &AppContext, filters: &FilterArgs) -> Result<()> {
    let api = ctx.open_api(filters.to_state())?;
    let snapshot = api.snapshot();
    ctx.emit(&snapshot, |r| {
        r.catalog(&snapshot, "Filters active: run `shelf list` without flags to clear them")
    })
}

fn handle_tags(ctx: &AppContext, filters: &FilterArgs) -> Result<()> {
    let api = ctx.open_api(filters.to_state())?;
    let Snapshot { available_tags, .. } = api.snapshot();
    ctx.emit(&available_tags, |r| {
        r.lines(&available_tags, names::TAG, "No tags for these filters.")
    })
}

fn handle_prices(ctx: &AppContext) -> Result<()> {
    let api = ctx.open_api(FilterState::default())?;
    let tiers = api.snapshot().price_tiers;
    ctx.emit(&tiers, |r| r.lines(&tiers, names::PRICE, "The catalog is empty."))
}

fn handle_fav(ctx: &AppContext, name: &str) -> Result<()> {
    let mut api = ctx.open_api(FilterState::default())?;
    if !api.records().iter().any(|t| t.name == name) {
        return Err(ShelfError::Api(format!("No tool named '{}' in the catalog", name)));
    }
    let snapshot = api.dispatch(Event::ToggleFavorite(name.to_string()))?;
    let added = snapshot.favorites.iter().any(|n| n == name);
    ctx.emit(&snapshot.favorites, |r| {
        let text = if added {
            format!("Added {} to favorites", name)
        } else {
            format!("Removed {} from favorites", name)
        };
        r.message(&text, MessageLevel::Success)
    })
}

fn handle_favorites(ctx: &AppContext) -> Result<()> {
    let favorites = Favorites::load(&ctx.store);
    let list = favorites.names();
    ctx.emit(&list, |r| {
        r.lines(list, names::FAVORITE, "No favorites yet. Add one with `shelf fav <name>`.")
    })
}

/// The saved theme. An unreadable store counts as no preference.
fn saved_theme(store: &FsBackend) -> Option<Theme> {
    Theme::load(store).unwrap_or_else(|e| {
        debug!(error = %e, "could not read the saved theme");
        None
    })
}

#[derive(Serialize)]
struct ThemeReport {
    theme: Theme,
    saved: bool,
}

fn handle_theme(ctx: &AppContext, action: Option<ThemeAction>) -> Result<()> {
    let saved = saved_theme(&ctx.store);
    let current = Theme::resolve(saved, system_prefers_dark());

    let report = match action {
        None => ThemeReport {
            theme: current,
            saved: saved.is_some(),
        },
        Some(action) => {
            let next = match action {
                ThemeAction::Dark => Theme::Dark,
                ThemeAction::Light => Theme::Light,
                ThemeAction::Toggle => current.toggle(),
            };
            next.save(&ctx.store)?;
            ThemeReport {
                theme: next,
                saved: true,
            }
        }
    };

    ctx.emit(&report, |r| {
        let source = if report.saved { "saved" } else { "from system" };
        r.message(&format!("Theme: {} ({})", report.theme, source), MessageLevel::Info)
    })
}
