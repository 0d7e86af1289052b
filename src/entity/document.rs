use serde::{Deserialize, Serialize};

use super::{Folder, Note};

/// The full persisted snapshot: every note and every folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "super::null_as_default")]
    pub notes: Vec<Note>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub folders: Vec<Folder>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.folders.is_empty()
    }

    /// Whether `id` is taken by any note or folder.
    pub fn contains_id(&self, id: &str) -> bool {
        self.notes.iter().any(|n| n.id == id) || self.folders.iter().any(|f| f.id == id)
    }
}
