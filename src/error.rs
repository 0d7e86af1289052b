use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteboxError {
    #[error("No folder selected. Create or select a folder first.")]
    NoFolderSelected,

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Ambiguous id '{0}' matches more than one entry")]
    AmbiguousId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to save notes to {}", .0.display())]
    SaveFailed(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NoteboxError>;
