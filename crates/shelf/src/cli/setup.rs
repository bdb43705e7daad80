use clap::{Args, Parser, Subcommand, ValueEnum};
use shelfapp::model::{Choice, SortKey};
use shelfapp::state::{FilterEvent, FilterState};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    bin_name = "shelf",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Browse, filter and bookmark a catalog of tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog JSON file (overrides config)
    #[arg(long, global = true, help_heading = "Options")]
    pub catalog: Option<PathBuf>,

    /// Directory for favorites and theme (overrides config)
    #[arg(long, global = true, help_heading = "Options")]
    pub store: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text, help_heading = "Options")]
    pub output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Dark,
    Light,
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a page of the catalog (default)
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the tags offered for the current filters
    #[command(display_order = 2)]
    Tags {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the distinct price tiers in the catalog
    #[command(display_order = 3)]
    Prices,

    /// Toggle a tool in or out of favorites
    #[command(display_order = 10)]
    Fav {
        /// Tool name, exactly as in the catalog
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List favorite tools
    #[command(display_order = 11)]
    Favorites,

    /// Show or change the color theme
    #[command(display_order = 20)]
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Interactive session: one command per line on stdin
    #[command(display_order = 30)]
    Browse,
}

/// Filter flags shared by `list` and `tags`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Only tools with this tag ("All" for no tag filter)
    #[arg(long)]
    pub tag: Option<String>,

    /// Only tools with this price tier
    #[arg(long)]
    pub price: Option<String>,

    /// Only tools with an admin comment
    #[arg(long)]
    pub admin: bool,

    /// Only favorite tools
    #[arg(long)]
    pub favorites: bool,

    /// Search names, descriptions and tags
    #[arg(long, short)]
    pub search: Option<String>,

    /// Sort order: name or price
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Page number, starting at 1
    #[arg(long, short)]
    pub page: Option<usize>,
}

impl FilterArgs {
    /// The state these flags describe. The page is applied last since every
    /// other change resets it.
    pub fn to_state(&self) -> FilterState {
        let mut events = Vec::new();
        if let Some(tag) = &self.tag {
            events.push(FilterEvent::SelectTag(Choice::from(tag.as_str())));
        }
        if let Some(price) = &self.price {
            events.push(FilterEvent::SelectPrice(Choice::from(price.as_str())));
        }
        if self.admin {
            events.push(FilterEvent::SetAdminOnly(true));
        }
        if self.favorites {
            events.push(FilterEvent::SetFavoritesOnly(true));
        }
        if let Some(search) = &self.search {
            events.push(FilterEvent::SetSearch(search.clone()));
        }
        if let Some(sort) = self.sort {
            events.push(FilterEvent::SetSort(sort));
        }
        if let Some(page) = self.page {
            events.push(FilterEvent::GoToPage(page));
        }
        events
            .into_iter()
            .fold(FilterState::default(), |state, event| state.apply(event))
    }
}

/// Installs the tracing subscriber on stderr. A non-empty `RUST_LOG` replaces
/// `level`; `verbose` always adds a debug directive on top.
pub fn init_logging(level: &str, verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    // A second init (tests) is harmless
    let _ = fmt()
        .with_env_filter(log_filter(level, verbose, &rust_log))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn log_filter(level: &str, verbose: bool, rust_log: &str) -> EnvFilter {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(rust_log);
    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}
