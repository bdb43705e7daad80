//! Catalog loading.
//!
//! The catalog is read exactly once per session. Any failure here is terminal:
//! there is no retry and no partial data, the caller shows an error and stops.

use crate::error::{Result, ShelfError};
use crate::model::Tool;
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse a catalog document: a JSON array of tool objects.
pub fn parse(json: &str) -> Result<Vec<Tool>> {
    serde_json::from_str(json).map_err(|e| ShelfError::Catalog(format!("invalid catalog: {}", e)))
}

/// Read and parse the catalog file at `path`.
pub fn load(path: &Path) -> Result<Vec<Tool>> {
    let content = fs::read_to_string(path)
        .map_err(|e| ShelfError::Catalog(format!("{}: {}", path.display(), e)))?;
    let tools = parse(&content)
        .map_err(|e| ShelfError::Catalog(format!("{}: {}", path.display(), inner(e))))?;
    info!(path = %path.display(), count = tools.len(), "catalog loaded");
    Ok(tools)
}

fn inner(err: ShelfError) -> String {
    match err {
        ShelfError::Catalog(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_array_of_tools() {
        let tools = parse(
            r#"[
                {"nome": "A", "preco": "Gratuito", "tags": ["x"]},
                {"nome": "B", "preco": "Pago"}
            ]"#,
        )
        .unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].tags, vec!["x"]);
        assert!(tools[1].tags.is_empty());
    }

    #[test]
    fn empty_array_is_fine() {
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn non_array_is_a_catalog_error() {
        let err = parse(r#"{"nome": "A"}"#).unwrap_err();
        assert!(matches!(err, ShelfError::Catalog(_)));
    }

    #[test]
    fn missing_file_is_a_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("data.json")).unwrap_err();
        assert!(matches!(err, ShelfError::Catalog(_)));
        assert!(err.to_string().contains("data.json"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"nome": "Canva", "preco": "Freemium"}}]"#).unwrap();
        let tools = load(file.path()).unwrap();
        assert_eq!(tools[0].name, "Canva");
    }

    #[test]
    fn truncated_file_is_a_catalog_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"nome": "Canva""#).unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ShelfError::Catalog(_)));
    }
}
