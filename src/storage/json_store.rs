use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::Persistence;
use crate::entity::{Document, Note};
use crate::error::Result;

/// Default name of the backing file.
pub const NOTES_FILE: &str = "notes.json";

/// Shapes accepted when reading the backing file.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    /// First-generation files: a bare array of notes, no folders
    Legacy(Vec<Note>),
    Current(Document),
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        match stored {
            StoredDocument::Legacy(notes) => Document {
                notes,
                folders: Vec::new(),
            },
            StoredDocument::Current(doc) => doc,
        }
    }
}

/// Persists the whole [`Document`] as one pretty-printed JSON file.
///
/// Every save overwrites the file in full. There is no locking, so two
/// processes sharing a file will silently overwrite each other.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file in `dir` using the default file name
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(NOTES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the backing file, propagating any failure.
    pub fn read_document(&self) -> Result<Document> {
        let data = fs::read_to_string(&self.path)?;
        let stored: StoredDocument = serde_json::from_str(&data)?;
        Ok(stored.into())
    }

    /// Serialize `document` and overwrite the backing file.
    pub fn write_document(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Persistence for JsonFileStore {
    fn load(&self) -> Document {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "notes file missing, starting empty");
            return Document::new();
        }

        match self.read_document() {
            Ok(doc) => {
                tracing::debug!(
                    path = %self.path.display(),
                    notes = doc.notes.len(),
                    folders = doc.folders.len(),
                    "loaded notes"
                );
                doc
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "error loading notes");
                Document::new()
            }
        }
    }

    fn save(&self, document: &Document) -> bool {
        match self.write_document(document) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "error saving notes");
                false
            }
        }
    }
}
