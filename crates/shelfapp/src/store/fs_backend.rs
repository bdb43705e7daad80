use super::KeyValueStore;
use crate::error::{Result, ShelfError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const STORAGE_FILE: &str = "storage.json";

/// File-backed key-value store: one JSON object in `<root>/storage.json`.
///
/// The whole map is rewritten on every `set`. Writes go to a temp file that is
/// then renamed over the original, so a crash never leaves a torn file.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join(STORAGE_FILE)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ShelfError::Io)?;
        }
        Ok(())
    }

    /// Load the full map. A missing file is empty; so is one that is not a
    /// UTF-8 JSON object, which gets replaced on the next write.
    fn load_map(&self) -> Result<BTreeMap<String, String>> {
        let path = self.storage_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        if path.is_dir() {
            warn!(path = %path.display(), "storage path is a directory, treating as empty");
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&path).map_err(ShelfError::Io)?;
        match serde_json::from_slice(&bytes) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "storage file is corrupt, treating as empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn save_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(map).map_err(ShelfError::Serialization)?;

        let tmp_file = self.root.join(format!(".storage-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(ShelfError::Io)?;
        fs::rename(&tmp_file, self.storage_path()).map_err(ShelfError::Io)?;
        Ok(())
    }
}

impl KeyValueStore for FsBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map)?;
        debug!(key, "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load_map()?;
        if map.remove(key).is_some() {
            self.save_map(&map)?;
        }
        Ok(())
    }
}
