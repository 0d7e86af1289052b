//! In-memory note and folder management.
//!
//! [`NoteStore`] owns the [`Document`] together with the front end's
//! selection state. Every mutation is applied in memory first and then the
//! whole document is handed to the [`Persistence`] gateway. A failed save is
//! reported through [`SaveStatus::Failed`] but never rolls the mutation back.

mod change;

pub use change::{Change, SaveStatus};

use chrono::Utc;

use crate::entity::{generate_id, Document, Folder, Note, DEFAULT_FOLDER_NAME};
use crate::error::{NoteboxError, Result};
use crate::storage::Persistence;

pub struct NoteStore<P: Persistence> {
    document: Document,
    gateway: P,
    active_folder: Option<String>,
    active_note: Option<String>,
}

impl<P: Persistence> NoteStore<P> {
    /// Load the document through `gateway`. The first folder becomes active.
    pub fn open(gateway: P) -> Self {
        let document = gateway.load();
        Self::with_document(gateway, document)
    }

    /// Wrap an already loaded document without touching the gateway.
    ///
    /// Folders stored without an id get a fresh one, since an empty folder
    /// id is what marks a note as unfiled.
    pub fn with_document(gateway: P, mut document: Document) -> Self {
        rekey_blank_folders(&mut document);
        let active_folder = document.folders.first().map(|f| f.id.clone());
        Self {
            document,
            gateway,
            active_folder,
            active_note: None,
        }
    }

    pub fn gateway(&self) -> &P {
        &self.gateway
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn notes(&self) -> &[Note] {
        &self.document.notes
    }

    pub fn folders(&self) -> &[Folder] {
        &self.document.folders
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.document.notes.iter().find(|n| n.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.document.folders.iter().find(|f| f.id == id)
    }

    // ---------------------------------------------------------------------
    // Notes
    // ---------------------------------------------------------------------

    /// Create an empty note at the front of the collection.
    ///
    /// Notes must belong to an existing folder: `None` fails with
    /// [`NoteboxError::NoFolderSelected`].
    pub fn create_note(&mut self, folder_id: Option<&str>) -> Result<Change<String>> {
        let folder_id = folder_id.ok_or(NoteboxError::NoFolderSelected)?;
        if self.folder(folder_id).is_none() {
            return Err(NoteboxError::FolderNotFound(folder_id.to_string()));
        }

        let note = Note::new(self.fresh_id(), folder_id.to_string());
        let id = note.id.clone();
        self.document.notes.insert(0, note);
        self.active_note = Some(id.clone());
        tracing::debug!(note = %id, folder = %folder_id, "created note");

        Ok(self.persist(id))
    }

    /// Replace a note's title and content and bump `updated_at`.
    pub fn update_note(&mut self, id: &str, title: &str, content: &str) -> Result<Change<()>> {
        let note = self
            .document
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| NoteboxError::NoteNotFound(id.to_string()))?;

        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = Utc::now().max(note.created_at);
        tracing::debug!(note = %id, "updated note");

        Ok(self.persist(()))
    }

    /// Remove a note. Returns whether anything was removed; deleting an
    /// unknown id changes nothing and skips the save.
    pub fn delete_note(&mut self, id: &str) -> Change<bool> {
        let before = self.document.notes.len();
        self.document.notes.retain(|n| n.id != id);
        if self.document.notes.len() == before {
            return Change::skipped(false);
        }

        if self.active_note.as_deref() == Some(id) {
            self.active_note = None;
        }
        tracing::debug!(note = %id, "deleted note");

        self.persist(true)
    }

    /// Notes in `folder_id`, most recently modified first. An empty id
    /// names no folder and lists nothing; see [`Self::unfiled_notes`].
    pub fn list_notes_by_folder(&self, folder_id: &str) -> Vec<&Note> {
        if folder_id.is_empty() {
            return Vec::new();
        }

        let mut notes: Vec<&Note> = self
            .document
            .notes
            .iter()
            .filter(|n| n.folder_id == folder_id)
            .collect();

        // Stable sort: equal timestamps keep collection order
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes
    }

    /// Notes with no folder, left over from files written before folders.
    pub fn unfiled_notes(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self
            .document
            .notes
            .iter()
            .filter(|n| n.is_unfiled())
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes
    }

    // ---------------------------------------------------------------------
    // Folders
    // ---------------------------------------------------------------------

    /// Create a folder and make it the active one. A missing or blank name
    /// falls back to [`DEFAULT_FOLDER_NAME`].
    pub fn create_folder(&mut self, name: Option<&str>) -> Change<String> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_FOLDER_NAME);

        let folder = Folder::new(self.fresh_id(), name.to_string());
        let id = folder.id.clone();
        self.document.folders.push(folder);
        self.active_folder = Some(id.clone());
        tracing::debug!(folder = %id, name, "created folder");

        self.persist(id)
    }

    /// Delete a folder and every note in it. Returns the number of notes
    /// removed along with the folder.
    pub fn delete_folder(&mut self, id: &str) -> Change<usize> {
        let before = self.document.folders.len();
        self.document.folders.retain(|f| f.id != id);
        if self.document.folders.len() == before {
            return Change::skipped(0);
        }

        let notes_before = self.document.notes.len();
        self.document.notes.retain(|n| n.folder_id != id);
        let removed = notes_before - self.document.notes.len();

        if self.active_folder.as_deref() == Some(id) {
            self.active_folder = self.document.folders.first().map(|f| f.id.clone());
        }
        if self
            .active_note
            .as_deref()
            .is_some_and(|note_id| self.note(note_id).is_none())
        {
            self.active_note = None;
        }
        tracing::debug!(folder = %id, notes_removed = removed, "deleted folder");

        self.persist(removed)
    }

    /// Rename a folder. Blank names are ignored and nothing is saved.
    pub fn rename_folder(&mut self, id: &str, new_name: &str) -> Result<Change<bool>> {
        let folder = self
            .document
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| NoteboxError::FolderNotFound(id.to_string()))?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(Change::skipped(false));
        }

        folder.name = new_name.to_string();
        tracing::debug!(folder = %id, name = new_name, "renamed folder");

        Ok(self.persist(true))
    }

    // ---------------------------------------------------------------------
    // Selection (front-end state, never persisted)
    // ---------------------------------------------------------------------

    pub fn active_folder(&self) -> Option<&Folder> {
        self.active_folder.as_deref().and_then(|id| self.folder(id))
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_note.as_deref().and_then(|id| self.note(id))
    }

    pub fn select_folder(&mut self, id: &str) -> Result<()> {
        if self.folder(id).is_none() {
            return Err(NoteboxError::FolderNotFound(id.to_string()));
        }
        self.active_folder = Some(id.to_string());
        Ok(())
    }

    /// Select a note. Its folder becomes the active folder as well.
    pub fn select_note(&mut self, id: &str) -> Result<()> {
        let note = self
            .note(id)
            .ok_or_else(|| NoteboxError::NoteNotFound(id.to_string()))?;
        let folder_id = note.folder_id.clone();

        if self.folder(&folder_id).is_some() {
            self.active_folder = Some(folder_id);
        }
        self.active_note = Some(id.to_string());
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn fresh_id(&self) -> String {
        fresh_id(&self.document)
    }

    fn persist<T>(&self, value: T) -> Change<T> {
        let status = if self.gateway.save(&self.document) {
            SaveStatus::Saved
        } else {
            SaveStatus::Failed
        };
        Change { value, status }
    }
}

fn fresh_id(document: &Document) -> String {
    loop {
        let id = generate_id();
        if !document.contains_id(&id) {
            return id;
        }
    }
}

fn rekey_blank_folders(document: &mut Document) {
    for index in 0..document.folders.len() {
        if document.folders[index].id.is_empty() {
            let id = fresh_id(document);
            let folder = &mut document.folders[index];
            tracing::warn!(folder = %id, name = %folder.name, "folder stored without id, assigned a new one");
            folder.id = id;
        }
    }
}

#[cfg(test)]
mod tests;
