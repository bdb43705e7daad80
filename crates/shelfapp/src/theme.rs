//! Light/dark display preference, persisted in the same store as favorites.
//!
//! A saved preference wins; without one the caller falls back to whatever the
//! system prefers.

use crate::error::Result;
use crate::store::{KeyValueStore, THEME_KEY};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The saved preference, if any. Unknown values count as no preference.
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Option<Theme>> {
        let Some(raw) = store.get(THEME_KEY)? else {
            return Ok(None);
        };
        match raw.parse() {
            Ok(theme) => Ok(Some(theme)),
            Err(_) => {
                warn!(value = %raw, "ignoring unknown theme preference");
                Ok(None)
            }
        }
    }

    pub fn save<S: KeyValueStore>(self, store: &S) -> Result<()> {
        store.set(THEME_KEY, self.as_str())
    }

    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn resolve(saved: Option<Theme>, system_prefers_dark: bool) -> Theme {
        match saved {
            Some(theme) => theme,
            None if system_prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}': use dark or light", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn no_preference_by_default() {
        assert_eq!(Theme::load(&MemBackend::new()).unwrap(), None);
    }

    #[test]
    fn save_and_load() {
        let store = MemBackend::new();
        Theme::Dark.save(&store).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(Theme::load(&store).unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn garbage_is_no_preference() {
        let store = MemBackend::new().with_entry(THEME_KEY, "sepia");
        assert_eq!(Theme::load(&store).unwrap(), None);
    }

    #[test]
    fn saved_preference_beats_system() {
        assert_eq!(Theme::resolve(Some(Theme::Light), true), Theme::Light);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }
}
