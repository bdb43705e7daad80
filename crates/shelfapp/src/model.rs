//! # Data Model
//!
//! A [`Tool`] is one catalog entry. Tools are immutable once loaded: nothing in
//! shelf mutates a record, the pipeline only selects and orders them.
//!
//! ## Field Naming
//!
//! The catalog file keeps the Portuguese keys of the catalog site (`nome`, `introdução`,
//! `descrição`, `tags`, `preco`, `comentario_admin`, `link`). Rust-side names
//! are English; serde maps between the two in both directions.
//!
//! ## Leniency
//!
//! Only `nome` is required. Every other field degrades instead of failing:
//! absent or `null` strings become `""`, `tags` that are absent, `null`, or not
//! an array become empty, and non-string tag entries are skipped. A
//! `comentario_admin` that is not a string is treated as absent.
//!
//! ## Selections
//!
//! The UI offers an "All" button in front of every facet. That sentinel is
//! modeled explicitly as [`Choice::All`] instead of a magic string.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Label of the catch-all facet button.
pub const ALL: &str = "All";

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Unique within the working set by convention only; used as the favorites key.
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "introdução", default, deserialize_with = "lenient_string")]
    pub intro: String,

    #[serde(rename = "descrição", default, deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,

    #[serde(rename = "preco", default, deserialize_with = "lenient_string")]
    pub price: String,

    #[serde(
        rename = "comentario_admin",
        default,
        deserialize_with = "lenient_comment",
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_comment: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub link: String,
}

impl Tool {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intro: String::new(),
            description: String::new(),
            tags: Vec::new(),
            price: price.into(),
            admin_comment: None,
            link: String::new(),
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_text(mut self, intro: impl Into<String>, description: impl Into<String>) -> Self {
        self.intro = intro.into();
        self.description = description.into();
        self
    }

    pub fn with_admin_comment(mut self, comment: impl Into<String>) -> Self {
        self.admin_comment = Some(comment.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// True when the admin left a note that is not just whitespace.
    pub fn is_annotated(&self) -> bool {
        self.admin_comment
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tier(&self) -> PriceTier {
        PriceTier::from_label(&self.price)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_comment<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Known price tiers. The set is open: anything else is [`PriceTier::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceTier {
    Gratuito,
    Freemium,
    Pago,
    Assinatura,
    Other,
}

impl PriceTier {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Gratuito" => PriceTier::Gratuito,
            "Freemium" => PriceTier::Freemium,
            "Pago" => PriceTier::Pago,
            "Assinatura" => PriceTier::Assinatura,
            _ => PriceTier::Other,
        }
    }

    /// Sort weight; unknown tiers sort last.
    pub fn weight(self) -> u8 {
        match self {
            PriceTier::Gratuito => 0,
            PriceTier::Freemium => 1,
            PriceTier::Pago => 2,
            PriceTier::Assinatura => 3,
            PriceTier::Other => 99,
        }
    }
}

impl PartialOrd for PriceTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriceTier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "name")]
    ByName,
    #[serde(rename = "price")]
    ByPrice,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "nome" => Ok(SortKey::ByName),
            "price" | "preco" | "preço" => Ok(SortKey::ByPrice),
            other => Err(format!("Unknown sort key '{}': use name or price", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::ByName => write!(f, "name"),
            SortKey::ByPrice => write!(f, "price"),
        }
    }
}

/// A facet selection: either the catch-all or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn only(value: impl Into<String>) -> Self {
        Choice::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    pub fn as_only(&self) -> Option<&str> {
        match self {
            Choice::All => None,
            Choice::Only(v) => Some(v),
        }
    }

    /// `All` accepts every value; `Only(v)` accepts exactly `v`.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => v == value,
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        match value {
            // The catalog site labels its catch-all buttons in Portuguese.
            ALL | "Todas" | "Todos" => Choice::All,
            other => Choice::Only(other.to_string()),
        }
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        Choice::from(value.as_str())
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::All => ALL.to_string(),
            Choice::Only(v) => v,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(f, "{}", ALL),
            Choice::Only(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_portuguese_keys() {
        let json = r#"{
            "nome": "Canva",
            "introdução": "Design",
            "descrição": "Editor online",
            "tags": ["design", "imagem"],
            "preco": "Freemium",
            "comentario_admin": "Muito bom",
            "link": "https://canva.com"
        }"#;
        let tool: Tool = serde_json::from_str(json).unwrap();
        assert_eq!(tool.name, "Canva");
        assert_eq!(tool.intro, "Design");
        assert_eq!(tool.description, "Editor online");
        assert_eq!(tool.tags, vec!["design", "imagem"]);
        assert_eq!(tool.tier(), PriceTier::Freemium);
        assert!(tool.is_annotated());
        assert_eq!(tool.link, "https://canva.com");
    }

    #[test]
    fn missing_and_null_fields_degrade() {
        let json = r#"{"nome": "Bare", "tags": null, "comentario_admin": null, "descrição": null}"#;
        let tool: Tool = serde_json::from_str(json).unwrap();
        assert!(tool.tags.is_empty());
        assert_eq!(tool.admin_comment, None);
        assert_eq!(tool.description, "");
        assert_eq!(tool.price, "");
    }

    #[test]
    fn malformed_tags_are_skipped() {
        let json = r#"{"nome": "Odd", "tags": ["ok", 3, null, "fine"]}"#;
        let tool: Tool = serde_json::from_str(json).unwrap();
        assert_eq!(tool.tags, vec!["ok", "fine"]);

        let json = r#"{"nome": "Odd", "tags": "not-a-list"}"#;
        let tool: Tool = serde_json::from_str(json).unwrap();
        assert!(tool.tags.is_empty());
    }

    #[test]
    fn missing_name_is_an_error() {
        let json = r#"{"preco": "Pago"}"#;
        assert!(serde_json::from_str::<Tool>(json).is_err());
    }

    #[test]
    fn blank_comment_is_not_annotated() {
        let tool = Tool::new("A", "Pago").with_admin_comment("   ");
        assert!(!tool.is_annotated());
        assert!(!Tool::new("B", "Pago").is_annotated());
        assert!(Tool::new("C", "Pago").with_admin_comment(" ok ").is_annotated());
    }

    #[test]
    fn serialization_keeps_portuguese_keys() {
        let tool = Tool::new("A", "Pago").with_tags(["x"]);
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["nome"], "A");
        assert_eq!(json["preco"], "Pago");
        assert!(json.get("comentario_admin").is_none());
    }

    #[test]
    fn tier_weights() {
        assert_eq!(PriceTier::from_label("Gratuito").weight(), 0);
        assert_eq!(PriceTier::from_label("Freemium").weight(), 1);
        assert_eq!(PriceTier::from_label("Pago").weight(), 2);
        assert_eq!(PriceTier::from_label("Assinatura").weight(), 3);
        assert_eq!(PriceTier::from_label("Vitalício").weight(), 99);
        // Exact match only
        assert_eq!(PriceTier::from_label("pago"), PriceTier::Other);
    }

    #[test]
    fn choice_parsing() {
        assert_eq!(Choice::from("All"), Choice::All);
        assert_eq!(Choice::from("Todas"), Choice::All);
        assert_eq!(Choice::from("Todos"), Choice::All);
        assert_eq!(Choice::from("ia"), Choice::only("ia"));
        assert!(Choice::All.accepts("anything"));
        assert!(Choice::only("x").accepts("x"));
        assert!(!Choice::only("x").accepts("X"));
    }

    #[test]
    fn choice_serializes_as_string() {
        assert_eq!(serde_json::to_string(&Choice::All).unwrap(), "\"All\"");
        assert_eq!(serde_json::to_string(&Choice::only("ia")).unwrap(), "\"ia\"");
        let back: Choice = serde_json::from_str("\"ia\"").unwrap();
        assert_eq!(back, Choice::only("ia"));
    }

    #[test]
    fn sort_key_from_str() {
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::ByName);
        assert_eq!("preco".parse::<SortKey>().unwrap(), SortKey::ByPrice);
        assert_eq!(" Price ".parse::<SortKey>().unwrap(), SortKey::ByPrice);
        assert!("rating".parse::<SortKey>().is_err());
    }
}
