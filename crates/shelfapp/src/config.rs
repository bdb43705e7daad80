//! # Configuration
//!
//! Shelf configuration is managed by [`confique`], which handles layered loading
//! from TOML files and environment variables.
//!
//! ## Resolution Order
//!
//! Highest priority first:
//! 1. **Command line flags**: applied by the binary on top of the loaded config.
//! 2. **Environment variables**: `SHELF_CATALOG`, `SHELF_STORE_DIR`,
//!    `SHELF_DEBOUNCE_MS`, `SHELF_LOG_LEVEL`.
//! 3. **Local Config**: `shelf.toml` in the working directory.
//! 4. **Global Config**: `shelf.toml` in the OS config directory (via `directories`).
//! 5. **Compiled Defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `catalog` | `data.json` | Path to the catalog JSON file |
//! | `store_dir` | OS data dir | Where favorites and theme are persisted |
//! | `search_debounce_ms` | `300` | Quiet period before typed search applies |
//! | `log_level` | `warn` | Default tracing level when `RUST_LOG` is unset |

use crate::error::{Result, ShelfError};
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "shelf.toml";

/// Configuration for shelf, stored in `shelf.toml`.
#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Catalog file to browse.
    #[config(default = "data.json", env = "SHELF_CATALOG")]
    pub catalog: PathBuf,

    /// Directory holding `storage.json`. Defaults to the OS data directory.
    #[config(env = "SHELF_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    #[config(default = 300, env = "SHELF_DEBOUNCE_MS")]
    pub search_debounce_ms: u64,

    #[config(default = "warn", env = "SHELF_LOG_LEVEL")]
    pub log_level: String,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("data.json"),
            store_dir: None,
            search_debounce_ms: 300,
            log_level: "warn".to_string(),
        }
    }
}

impl ShelfConfig {
    /// Load from the environment, `cwd/shelf.toml`, then the global `shelf.toml`.
    pub fn load(cwd: &Path) -> Result<Self> {
        let mut files = vec![cwd.join(CONFIG_FILE)];
        if let Some(dirs) = project_dirs() {
            files.push(dirs.config_dir().join(CONFIG_FILE));
        }
        let mut builder = Self::builder().env();
        for file in files {
            builder = builder.file(file);
        }
        builder.load().map_err(|e| ShelfError::Config(e.to_string()))
    }

    /// Load from the given files only, earlier files winning. Missing files are skipped.
    pub fn from_files<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        let mut builder = Self::builder();
        for file in files {
            builder = builder.file(file.as_ref());
        }
        builder.load().map_err(|e| ShelfError::Config(e.to_string()))
    }

    /// The configured store directory, or the OS data directory for shelf.
    pub fn store_dir(&self) -> PathBuf {
        self.store_dir
            .clone()
            .unwrap_or_else(default_store_dir)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "shelf", "shelf")
}

fn default_store_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".shelf"))
}
