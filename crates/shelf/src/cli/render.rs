//! # Rendering Module
//!
//! Turns library values into terminal text through the embedded templates.
//!
//! Layout work that needs Unicode awareness (the rule under a card title)
//! stays in Rust, as do decisions about which style a piece of data gets.
//! Templates only place text and apply the style names they are handed.

use super::styles::{names, Palette};
use super::templates::{CARD_TEMPLATE, CATALOG_TEMPLATE, LINES_TEMPLATE, MESSAGE_TEMPLATE};
use minijinja::{Environment, Value};
use serde::Serialize;
use shelfapp::api::Snapshot;
use shelfapp::error::{Result, ShelfError};
use shelfapp::model::{Choice, Tool, ALL};
use unicode_width::UnicodeWidthStr;

const RULE_CHAR: &str = "─";

#[derive(Serialize)]
struct CatalogData {
    summary: String,
    tags: Vec<FacetData>,
    prices: Vec<FacetData>,
    sort: String,
    empty: bool,
    cards: Vec<CardData>,
    pagination: Option<String>,
    clear_hint: Option<String>,
}

#[derive(Serialize)]
struct FacetData {
    label: String,
    style: &'static str,
}

#[derive(Serialize)]
struct CardData {
    name: String,
    rule: String,
    price: String,
    is_favorite: bool,
    tags: String,
    intro: String,
    description: String,
    admin_comment: Option<String>,
    link: String,
}

#[derive(Serialize)]
struct LinesData<'a> {
    items: &'a [String],
    item_style: &'static str,
    empty_message: &'a str,
}

#[derive(Serialize)]
struct MessageData<'a> {
    text: &'a str,
    level: &'static str,
}

/// Severity of a one-line message; picks its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Error,
}

impl MessageLevel {
    fn style(self) -> &'static str {
        match self {
            MessageLevel::Info => names::MUTED,
            MessageLevel::Success => names::SUCCESS,
            MessageLevel::Error => names::ERROR,
        }
    }
}

/// A template environment bound to one palette and color mode.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(palette: &'static Palette, use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            palette.apply(&name, &value.to_string(), use_color)
        });
        for (name, source) in [
            ("catalog.jinja", CATALOG_TEMPLATE),
            ("card.jinja", CARD_TEMPLATE),
            ("lines.jinja", LINES_TEMPLATE),
            ("message.jinja", MESSAGE_TEMPLATE),
        ] {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(data))
            .map_err(template_error)
    }

    /// The full catalog view: facets, cards, pagination, clear hint.
    pub fn catalog(&self, snapshot: &Snapshot, clear_hint: &str) -> Result<String> {
        let view = &snapshot.view;
        let mut summary = format!(
            "{} {}",
            view.total_matching,
            if view.total_matching == 1 { "tool" } else { "tools" }
        );
        if view.has_controls() {
            summary.push_str(&format!(", page {} of {}", view.page, view.total_pages()));
        }

        let pagination = view.has_controls().then(|| {
            let pages: Vec<String> = (1..=view.total_pages())
                .map(|n| {
                    if n == view.page {
                        format!("[{}]", n)
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            format!("Pages: {}", pages.join(" "))
        });

        let data = CatalogData {
            summary,
            tags: facets(&snapshot.available_tags, &snapshot.state.active_tag),
            prices: facets(&snapshot.price_tiers, &snapshot.state.active_price),
            sort: snapshot.state.sort_key.to_string(),
            empty: view.is_empty(),
            cards: view
                .items
                .iter()
                .map(|tool| card(tool, snapshot.favorites.contains(&tool.name)))
                .collect(),
            pagination,
            clear_hint: snapshot.filters_active.then(|| clear_hint.to_string()),
        };
        self.render("catalog.jinja", &data)
    }

    /// One item per line, or `empty_message` when there are none.
    pub fn lines(&self, items: &[String], item_style: &'static str, empty_message: &str) -> Result<String> {
        self.render(
            "lines.jinja",
            &LinesData {
                items,
                item_style,
                empty_message,
            },
        )
    }

    pub fn message(&self, text: &str, level: MessageLevel) -> Result<String> {
        self.render(
            "message.jinja",
            &MessageData {
                text,
                level: level.style(),
            },
        )
    }
}

/// The "All" button followed by one button per value; the active one highlighted.
fn facets(values: &[String], active: &Choice) -> Vec<FacetData> {
    let style = |on: bool| if on { names::FACET_ACTIVE } else { names::FACET };
    std::iter::once(FacetData {
        label: ALL.to_string(),
        style: style(active.is_all()),
    })
    .chain(values.iter().map(|v| FacetData {
        label: v.clone(),
        style: style(active.as_only() == Some(v.as_str())),
    }))
    .collect()
}

fn card(tool: &Tool, is_favorite: bool) -> CardData {
    CardData {
        name: tool.name.clone(),
        rule: RULE_CHAR.repeat(tool.name.width().max(1)),
        price: tool.price.clone(),
        is_favorite,
        tags: tool
            .tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" "),
        intro: tool.intro.clone(),
        description: tool.description.clone(),
        admin_comment: tool
            .admin_comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        link: tool.link.clone(),
    }
}

fn template_error(e: minijinja::Error) -> ShelfError {
    ShelfError::Api(format!("template error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::styles::palette_for;
    use shelfapp::api::{Event, ShelfApi};
    use shelfapp::state::FilterEvent;
    use shelfapp::store::mem_backend::MemBackend;
    use shelfapp::test_utils::{numbered_catalog, sample_catalog};
    use shelfapp::theme::Theme;

    fn plain() -> Renderer {
        Renderer::new(palette_for(Theme::Light), false).unwrap()
    }

    #[test]
    fn renders_cards_in_order_with_facets() {
        let store = MemBackend::new();
        let api = ShelfApi::new(sample_catalog(), &store);
        let out = plain().catalog(&api.snapshot(), "clear").unwrap();

        assert!(out.starts_with("Catalog 5 tools\n"));
        assert!(out.contains("Tags: All design ia imagem produtividade texto\n"));
        assert!(out.contains("Prices: All Assinatura Freemium Gratuito Pago\n"));
        assert!(out.contains("Sort: name\n"));
        let canva = out.find("Canva  Freemium").unwrap();
        let notion = out.find("Notion  Gratuito").unwrap();
        assert!(canva < notion);
        assert!(out.contains("#design #imagem\n"));
        assert!(out.contains("Admin: Uso todo dia\n"));
        assert!(!out.contains("clear"));
        assert!(!out.contains("(!?)"));
    }

    #[test]
    fn blank_admin_comment_is_not_shown() {
        let store = MemBackend::new();
        let mut api = ShelfApi::new(sample_catalog(), &store);
        let snap = api
            .dispatch(Event::SearchSubmit("midjourney".into()))
            .unwrap();
        let out = plain().catalog(&snap, "clear").unwrap();
        assert!(out.contains("Midjourney  Assinatura\n"));
        assert!(!out.contains("Admin:"));
        assert!(out.contains("clear\n"));
    }

    #[test]
    fn favorite_gets_a_star() {
        let store = MemBackend::new();
        let mut api = ShelfApi::new(sample_catalog(), &store);
        let snap = api.dispatch(Event::ToggleFavorite("Notion".into())).unwrap();
        let out = plain().catalog(&snap, "").unwrap();
        assert!(out.contains("Notion ★  Gratuito\n"));
    }

    #[test]
    fn empty_result() {
        let store = MemBackend::new();
        let mut api = ShelfApi::new(sample_catalog(), &store);
        let snap = api.dispatch(Event::SearchSubmit("zz".into())).unwrap();
        let out = plain().catalog(&snap, "type clear").unwrap();
        assert!(out.starts_with("Catalog 0 tools\n"));
        assert!(out.contains("No tools found.\n"));
        assert!(out.contains("type clear\n"));
        assert!(!out.contains("Pages:"));
    }

    #[test]
    fn pagination_marks_current_page() {
        let store = MemBackend::new();
        let mut api = ShelfApi::new(numbered_catalog(20), &store);
        let snap = api.dispatch(FilterEvent::GoToPage(2).into()).unwrap();
        let out = plain().catalog(&snap, "").unwrap();
        assert!(out.starts_with("Catalog 20 tools, page 2 of 3\n"));
        assert!(out.contains("Pages: 1 [2] 3\n"));
        assert!(out.contains("Tool 09  Pago"));
        assert!(!out.contains("Tool 08  Pago"));
    }

    #[test]
    fn rule_matches_display_width() {
        let data = card(&Tool::new("Ação", "Pago"), false);
        assert_eq!(data.rule, "────");
    }

    #[test]
    fn lines_and_empty_message() {
        let r = plain();
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(r.lines(&items, names::TAG, "none").unwrap(), "a\nb\n");
        assert_eq!(r.lines(&[], names::TAG, "none").unwrap(), "none\n");
    }

    #[test]
    fn message_line() {
        let out = plain().message("saved", MessageLevel::Success).unwrap();
        assert_eq!(out, "saved\n");
    }

    #[test]
    fn every_message_level_has_a_style() {
        let r = plain();
        for level in [MessageLevel::Info, MessageLevel::Success, MessageLevel::Error] {
            assert_eq!(r.message("x", level).unwrap(), "x\n");
        }
    }

    #[test]
    fn unpriced_tools_add_no_price_button() {
        let store = MemBackend::new();
        let api = ShelfApi::new(vec![Tool::new("A", "Pago"), Tool::new("B", "")], &store);
        let out = plain().catalog(&api.snapshot(), "").unwrap();
        assert!(out.contains("Prices: All Pago\n"), "{}", out);
    }

    #[test]
    fn color_mode_emits_ansi() {
        console::set_colors_enabled(true);
        let r = Renderer::new(palette_for(Theme::Dark), true).unwrap();
        let out = r.message("boom", MessageLevel::Error).unwrap();
        assert!(out.contains("\u{1b}["));
    }
}
