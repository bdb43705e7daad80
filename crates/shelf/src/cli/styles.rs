//! Styles for the shelf CLI.
//!
//! Templates only ever name a style by what the text *is* (a card title, a
//! price, an active facet). The palettes below decide what that looks like,
//! once for light terminals and once for dark ones, so switching themes never
//! touches a template.
//!
//! A style name a template asks for that no palette defines is rendered with a
//! `(!?)` prefix, which makes typos obvious while iterating on templates.

use console::Style;
use once_cell::sync::Lazy;
use shelfapp::theme::Theme;
use std::collections::HashMap;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const HEADER: &str = "header";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const LABEL: &str = "label";
    pub const FACET: &str = "facet";
    pub const FACET_ACTIVE: &str = "facet-active";
    pub const TITLE: &str = "title";
    pub const PRICE: &str = "price";
    pub const FAVORITE: &str = "favorite";
    pub const TAG: &str = "tag";
    pub const ADMIN: &str = "admin";
    pub const LINK: &str = "link";
    pub const HINT: &str = "hint";
    pub const SUCCESS: &str = "success";
    pub const ERROR: &str = "error";
}

const MISSING_STYLE_INDICATOR: &str = "(!?)";

#[derive(Debug, Clone, Default)]
pub struct Palette {
    styles: HashMap<&'static str, Style>,
}

impl Palette {
    fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Applies the named style, or only checks the name when color is off.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }
}

static LIGHT: Lazy<Palette> = Lazy::new(build_light_palette);
static DARK: Lazy<Palette> = Lazy::new(build_dark_palette);

pub fn palette_for(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

/// Whether the terminal looks dark. Used only when no theme was saved.
pub fn system_prefers_dark() -> bool {
    matches!(dark_light::detect(), dark_light::Mode::Dark)
}

fn build_light_palette() -> Palette {
    let regular = Style::new().black();
    let muted = Style::new().color256(rgb_to_ansi256((115, 115, 115)));
    let accent = Style::new().color256(rgb_to_ansi256((196, 140, 0)));

    Palette::default()
        .add(names::HEADER, regular.clone().bold().underlined())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, Style::new().color256(rgb_to_ansi256((173, 173, 173))))
        .add(names::LABEL, muted.clone().bold())
        .add(names::FACET, regular.clone())
        .add(
            names::FACET_ACTIVE,
            Style::new()
                .black()
                .on_color256(rgb_to_ansi256((255, 235, 59))),
        )
        .add(names::TITLE, regular.bold())
        .add(names::PRICE, Style::new().color256(rgb_to_ansi256((0, 128, 0))))
        .add(names::FAVORITE, accent.clone().bold())
        .add(names::TAG, accent)
        .add(names::ADMIN, Style::new().color256(rgb_to_ansi256((128, 0, 128))).italic())
        .add(names::LINK, Style::new().blue().underlined())
        .add(names::HINT, muted.italic())
        .add(names::SUCCESS, Style::new().green())
        .add(names::ERROR, Style::new().red().bold())
}

fn build_dark_palette() -> Palette {
    let regular = Style::new().white();
    let muted = Style::new().color256(rgb_to_ansi256((180, 180, 180)));
    let accent = Style::new().color256(rgb_to_ansi256((255, 214, 10)));

    Palette::default()
        .add(names::HEADER, regular.clone().bold().underlined())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, Style::new().color256(rgb_to_ansi256((110, 110, 110))))
        .add(names::LABEL, muted.clone().bold())
        .add(names::FACET, regular.clone())
        .add(
            names::FACET_ACTIVE,
            Style::new()
                .black()
                .on_color256(rgb_to_ansi256((229, 185, 0))),
        )
        .add(names::TITLE, regular.bold())
        .add(names::PRICE, Style::new().color256(rgb_to_ansi256((144, 238, 144))))
        .add(names::FAVORITE, accent.clone().bold())
        .add(names::TAG, accent)
        .add(names::ADMIN, Style::new().color256(rgb_to_ansi256((221, 160, 221))).italic())
        .add(names::LINK, Style::new().cyan().underlined())
        .add(names::HINT, muted.italic())
        .add(names::SUCCESS, Style::new().green())
        .add(names::ERROR, Style::new().red().bold())
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}
