//! # Interactive Session
//!
//! `shelf browse` keeps one [`ShelfApi`] alive and reads one command per line
//! from stdin, re-rendering the catalog after each change. It is the terminal
//! stand-in for clicking facet buttons and typing in a search box.
//!
//! ## Commands
//!
//! | Line | Effect |
//! |------|--------|
//! | `tag <t>` / `tag` | Select a tag (`tag` alone or `tag All` clears it) |
//! | `price <p>` / `price` | Select a price tier |
//! | `admin on\|off` | Only tools with an admin comment |
//! | `favorites on\|off` | Only favorite tools |
//! | `sort name\|price` | Sort order |
//! | `search <text>` | Typed search, debounced |
//! | `find <text>` | Submitted search, immediate |
//! | `page <n>` | Go to page `n` |
//! | `fav <name>` | Toggle a favorite |
//! | `clear` | Reset every filter |
//! | `help` | List commands |
//! | `quit` | Leave, dropping any pending search |
//!
//! ## Timing
//!
//! Stdin is read on a helper thread and lines arrive over a channel. While a
//! search is pending, the loop waits only until its deadline, so a burst of
//! `search` lines collapses into a single recompute with the last term. End of
//! input flushes a pending search before exiting.

use super::commands::AppContext;
use super::render::MessageLevel;
use super::setup::OutputFormat;
use shelfapp::api::{Event, ShelfApi, Snapshot};
use shelfapp::error::{Result, ShelfError};
use shelfapp::model::{Choice, SortKey};
use shelfapp::state::{FilterEvent, FilterState};
use shelfapp::store::KeyValueStore;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing::debug;

const CLEAR_HINT: &str = "Filters active: type `clear` to reset them";

const HELP: &str = "Commands: tag <t>, price <p>, admin on|off, favorites on|off, \
sort name|price, search <text>, find <text>, page <n>, fav <name>, clear, help, quit";

/// A parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Filter(FilterEvent),
    Search(String),
    Find(String),
    Fav(String),
    Help,
    Quit,
}

/// Parses one line. `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> std::result::Result<Option<BrowseCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "tag" => BrowseCommand::Filter(FilterEvent::SelectTag(choice(rest))),
        "price" => BrowseCommand::Filter(FilterEvent::SelectPrice(choice(rest))),
        "admin" => BrowseCommand::Filter(FilterEvent::SetAdminOnly(switch(rest)?)),
        "favorites" | "favs" => BrowseCommand::Filter(FilterEvent::SetFavoritesOnly(switch(rest)?)),
        "sort" => BrowseCommand::Filter(FilterEvent::SetSort(rest.parse::<SortKey>()?)),
        "page" => {
            let page = rest
                .parse::<usize>()
                .map_err(|_| format!("Invalid page '{}': expected a number", rest))?;
            BrowseCommand::Filter(FilterEvent::GoToPage(page))
        }
        "clear" => BrowseCommand::Filter(FilterEvent::ClearFilters),
        "search" => BrowseCommand::Search(rest.to_string()),
        "find" => BrowseCommand::Find(rest.to_string()),
        "fav" if rest.is_empty() => return Err("Usage: fav <name>".to_string()),
        "fav" => BrowseCommand::Fav(rest.to_string()),
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type `help` for a list.", other)),
    };
    Ok(Some(command))
}

fn choice(rest: &str) -> Choice {
    if rest.is_empty() {
        Choice::All
    } else {
        Choice::from(rest)
    }
}

fn switch(rest: &str) -> std::result::Result<bool, String> {
    match rest.to_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        other => Err(format!("Expected on or off, got '{}'", other)),
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub(super) fn run(ctx: &AppContext) -> Result<()> {
    let mut api = ctx.open_api(FilterState::default())?;
    let lines = spawn_stdin_reader();
    let mut session = Session { ctx, renders: 0 };
    session.show(&api.snapshot())?;

    loop {
        let next = match api.next_deadline() {
            Some(deadline) => {
                lines.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match next {
            Ok(line) => match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(BrowseCommand::Quit)) => break,
                Ok(Some(command)) => session.handle(&mut api, command)?,
                Err(message) => session.error(&message)?,
            },
            Err(RecvTimeoutError::Timeout) => {
                if let Some(snapshot) = api.poll(Instant::now()) {
                    session.show(&snapshot)?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(snapshot) = api.flush() {
                    session.show(&snapshot)?;
                }
                break;
            }
        }
    }

    debug!(renders = session.renders, "browse session ended");
    Ok(())
}

struct Session<'a> {
    ctx: &'a AppContext,
    renders: usize,
}

impl Session<'_> {
    fn handle<S: KeyValueStore>(&mut self, api: &mut ShelfApi<S>, command: BrowseCommand) -> Result<()> {
        match command {
            BrowseCommand::Filter(event) => {
                let snapshot = api.dispatch(Event::Filter(event))?;
                self.show(&snapshot)
            }
            BrowseCommand::Search(term) => {
                api.search_input(term, Instant::now());
                Ok(())
            }
            BrowseCommand::Find(term) => {
                let snapshot = api.dispatch(Event::SearchSubmit(term))?;
                self.show(&snapshot)
            }
            BrowseCommand::Fav(name) => {
                if !api.records().iter().any(|t| t.name == name) {
                    return self.error(&format!("No tool named '{}' in the catalog", name));
                }
                match api.dispatch(Event::ToggleFavorite(name)) {
                    Ok(snapshot) => self.show(&snapshot),
                    // The session goes on; the set is unchanged
                    Err(ShelfError::Io(e)) => self.error(&format!("Could not save favorites: {}", e)),
                    Err(e) => Err(e),
                }
            }
            BrowseCommand::Help => self.ctx.print_message(HELP, MessageLevel::Info),
            BrowseCommand::Quit => Ok(()),
        }
    }

    fn show(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.renders += 1;
        match self.ctx.output {
            OutputFormat::Json => println!("{}", serde_json::to_string(snapshot)?),
            OutputFormat::Text => print!("{}", self.ctx.renderer.catalog(snapshot, CLEAR_HINT)?),
        }
        Ok(())
    }

    fn error(&self, message: &str) -> Result<()> {
        eprint!("{}", self.ctx.renderer.message(message, MessageLevel::Error)?);
        Ok(())
    }
}
