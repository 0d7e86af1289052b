pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod storage;
pub mod store;

pub use config::Config;
pub use entity::{Document, Folder, Note};
pub use error::{NoteboxError, Result};
pub use storage::{JsonFileStore, Persistence};
pub use store::{Change, NoteStore, SaveStatus};
