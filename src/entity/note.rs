// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title shown for notes whose title is blank.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Note {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub content: String,
    /// Owning folder. Empty for notes written before folders existed.
    #[serde(deserialize_with = "super::null_as_default")]
    pub folder_id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create an empty note in the given folder, timestamped now.
    pub fn new(id: String, folder_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: String::new(),
            content: String::new(),
            folder_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    pub fn is_unfiled(&self) -> bool {
        self.folder_id.is_empty()
    }
}
