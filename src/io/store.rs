//! Key-value persistence for layouts and learning state
//!
//! Values are stored as JSON documents. The file store keeps one
//! `<key>.json` per key under a root directory; the memory store backs tests
//! and single-process sessions.

use crate::io::error::{FloorplanError, Result, WithPath};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// JSON document storage addressed by key
pub trait Store {
    /// Load the value stored under `key`, or `None` if there is none
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be read or decoded
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or written
    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()>;
}

/// One pretty-printed JSON file per key
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `root`; the directory is created on first save
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the documents
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Store for JsonFileStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        write_json(&self.path_for(key), value)
    }
}

/// In-memory documents, encoded exactly as the file store would
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Store for MemoryStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.documents
            .get(key)
            .map(|text| serde_json::from_str(text).with_path(Path::new(key)))
            .transpose()
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value).with_path(Path::new(key))?;
        self.documents.insert(key.to_string(), text);
        Ok(())
    }
}

/// Decode a JSON document from `path`
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode as `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| FloorplanError::FileSystem {
        path: path.to_path_buf(),
        operation: "read file",
        source: e,
    })?;
    serde_json::from_str(&text).with_path(path)
}

/// Encode `value` as pretty-printed JSON at `path`, creating parent directories
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or the file cannot be written
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FloorplanError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    let text = serde_json::to_string_pretty(value).with_path(path)?;
    std::fs::write(path, text).map_err(|e| FloorplanError::FileSystem {
        path: path.to_path_buf(),
        operation: "write file",
        source: e,
    })
}
