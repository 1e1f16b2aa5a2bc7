//! Document persistence port
//!
//! The editor never touches storage directly; it goes through a
//! [`DocumentStore`]. Two implementations ship with the crate:
//!
//! - [`MemoryStore`] keeps the serialized document in memory (tests, dry runs)
//! - [`FileStore`] writes JSON to disk, by default as
//!   `<dir>/atari-tile-editor.json`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::document::Document;

/// Fixed key of the autosave slot.
pub const STORAGE_KEY: &str = "atari-tile-editor";

/// Error writing a document to a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("store is read-only")]
    ReadOnly,
}

/// Where the editor loads its starting document and autosaves to.
pub trait DocumentStore {
    /// The stored document, or `None` when the slot is empty, unreadable or
    /// corrupt.
    fn load(&self) -> Option<Document>;

    /// Persist the document.
    fn save(&mut self, doc: &Document) -> Result<(), StoreError>;
}

/// In-memory store holding the last saved JSON.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
    read_only: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with raw JSON (which need not be valid).
    pub fn with_contents(json: impl Into<String>) -> Self {
        MemoryStore { slot: Some(json.into()), ..Self::default() }
    }

    /// A store whose writes always fail.
    pub fn read_only() -> Self {
        MemoryStore { read_only: true, ..Self::default() }
    }

    /// Raw JSON currently in the slot.
    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Option<Document> {
        let text = self.slot.as_deref()?;
        match Document::from_json(text) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(error = %e, "ignoring corrupt stored document");
                None
            }
        }
    }

    fn save(&mut self, doc: &Document) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.slot = Some(doc.to_json()?);
        self.saves += 1;
        Ok(())
    }
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    pretty: bool,
}

impl FileStore {
    /// Store at an explicit path. Writes indented JSON so the file doubles as
    /// a save file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into(), pretty: true }
    }

    /// The autosave slot inside `dir`.
    pub fn autosave_in(dir: &Path) -> Self {
        FileStore { path: dir.join(format!("{}.json", STORAGE_KEY)), pretty: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Option<Document> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no stored document");
                return None;
            }
        };
        match Document::from_json(&text) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt stored document");
                None
            }
        }
    }

    fn save(&mut self, doc: &Document) -> Result<(), StoreError> {
        let json = if self.pretty { doc.to_json_pretty()? } else { doc.to_json()? };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
            }
        }
        fs::write(&self.path, json)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), "document saved");
        Ok(())
    }
}
