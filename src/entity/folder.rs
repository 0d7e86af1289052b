use serde::{Deserialize, Serialize};

/// Name given to folders created without one.
pub const DEFAULT_FOLDER_NAME: &str = "New folder";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Folder {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
}

impl Folder {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}
