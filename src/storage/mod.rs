mod json_store;

pub use json_store::{JsonFileStore, NOTES_FILE};

use crate::entity::Document;

/// Load/save boundary between the store and durable storage.
///
/// Neither method returns an error: a failed load yields an empty
/// [`Document`] and a failed save returns `false`. Implementations log the
/// underlying cause.
pub trait Persistence {
    fn load(&self) -> Document;

    fn save(&self, document: &Document) -> bool;
}
