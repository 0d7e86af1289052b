use std::cell::{Cell, RefCell};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

use super::*;
use crate::storage::JsonFileStore;

/// Gateway that keeps the last saved document in memory.
#[derive(Default)]
struct MemoryGateway {
    stored: RefCell<Document>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemoryGateway {
    fn with_document(document: Document) -> Self {
        Self {
            stored: RefCell::new(document),
            ..Self::default()
        }
    }
}

impl Persistence for MemoryGateway {
    fn load(&self) -> Document {
        self.stored.borrow().clone()
    }

    fn save(&self, document: &Document) -> bool {
        self.saves.set(self.saves.get() + 1);
        if self.fail_saves.get() {
            return false;
        }
        *self.stored.borrow_mut() = document.clone();
        true
    }
}

fn store_with_folder(name: &str) -> (NoteStore<MemoryGateway>, String) {
    let mut store = NoteStore::open(MemoryGateway::default());
    let folder_id = store.create_folder(Some(name)).into_value();
    (store, folder_id)
}

#[test]
fn test_open_empty_gateway() {
    let store = NoteStore::open(MemoryGateway::default());
    assert!(store.notes().is_empty());
    assert!(store.folders().is_empty());
    assert!(store.active_folder().is_none());
}

#[test]
fn test_open_selects_first_folder() {
    let doc = Document {
        notes: Vec::new(),
        folders: vec![
            Folder::new("a".to_string(), "First".to_string()),
            Folder::new("b".to_string(), "Second".to_string()),
        ],
    };
    let store = NoteStore::open(MemoryGateway::with_document(doc));
    assert_eq!(store.active_folder().unwrap().id, "a");
}

#[test]
fn test_create_note_requires_folder() {
    let mut store = NoteStore::open(MemoryGateway::default());

    let result = store.create_note(None);
    assert!(matches!(result, Err(NoteboxError::NoFolderSelected)));
    assert!(store.notes().is_empty());
    assert_eq!(store.gateway().saves.get(), 0);
}

#[test]
fn test_create_note_in_unknown_folder_fails() {
    let (mut store, _) = store_with_folder("Work");

    let result = store.create_note(Some("missing"));
    assert!(matches!(result, Err(NoteboxError::FolderNotFound(id)) if id == "missing"));
    assert!(store.notes().is_empty());
}

#[test]
fn test_create_note_prepends_and_persists() {
    let (mut store, folder) = store_with_folder("Work");

    let first = store.create_note(Some(&folder)).unwrap();
    let second = store.create_note(Some(&folder)).unwrap();
    assert_eq!(first.status, SaveStatus::Saved);
    assert_eq!(second.status, SaveStatus::Saved);

    let ids: Vec<&str> = store.notes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![second.value.as_str(), first.value.as_str()]);

    let note = store.note(&first.value).unwrap();
    assert_eq!(note.title, "");
    assert_eq!(note.content, "");
    assert_eq!(note.folder_id, folder);
    assert_eq!(note.created_at, note.updated_at);

    assert_eq!(store.gateway().stored.borrow().notes.len(), 2);
    assert_eq!(store.active_note().unwrap().id, second.value);
}

#[test]
fn test_update_note_sets_fields_and_timestamp() {
    let (mut store, folder) = store_with_folder("Work");
    let id = store.create_note(Some(&folder)).unwrap().into_value();
    let created_at = store.note(&id).unwrap().created_at;

    thread::sleep(Duration::from_millis(2));
    let change = store.update_note(&id, "Draft", "Some text").unwrap();
    assert_eq!(change.status, SaveStatus::Saved);

    let note = store.note(&id).unwrap();
    assert_eq!(note.title, "Draft");
    assert_eq!(note.content, "Some text");
    assert_eq!(note.created_at, created_at);
    assert!(note.updated_at > note.created_at);

    let saved = store.gateway().stored.borrow();
    assert_eq!(saved.notes[0].title, "Draft");
}

#[test]
fn test_update_unknown_note_fails() {
    let (mut store, _) = store_with_folder("Work");
    let saves = store.gateway().saves.get();

    let result = store.update_note("nope", "t", "c");
    assert!(matches!(result, Err(NoteboxError::NoteNotFound(_))));
    assert_eq!(store.gateway().saves.get(), saves);
}

#[test]
fn test_update_never_moves_before_created_at() {
    let mut note = Note::new("n1".to_string(), "f1".to_string());
    note.created_at = Utc::now() + chrono::Duration::days(1);
    note.updated_at = note.created_at;
    let doc = Document {
        notes: vec![note],
        folders: vec![Folder::new("f1".to_string(), "Work".to_string())],
    };
    let mut store = NoteStore::open(MemoryGateway::with_document(doc));

    let _ = store.update_note("n1", "t", "c").unwrap();
    let note = store.note("n1").unwrap();
    assert!(note.updated_at >= note.created_at);
}

#[test]
fn test_delete_note_is_idempotent() {
    let (mut store, folder) = store_with_folder("Work");
    let keep = store.create_note(Some(&folder)).unwrap().into_value();
    let gone = store.create_note(Some(&folder)).unwrap().into_value();

    let first = store.delete_note(&gone);
    assert!(first.value);
    assert_eq!(first.status, SaveStatus::Saved);
    let after_once = store.document().clone();

    let second = store.delete_note(&gone);
    assert!(!second.value);
    assert_eq!(second.status, SaveStatus::Skipped);
    assert_eq!(store.document(), &after_once);

    assert!(store.note(&keep).is_some());
    assert!(store.note(&gone).is_none());
}

#[test]
fn test_delete_active_note_clears_selection() {
    let (mut store, folder) = store_with_folder("Work");
    let id = store.create_note(Some(&folder)).unwrap().into_value();
    assert!(store.active_note().is_some());

    let _ = store.delete_note(&id);
    assert!(store.active_note().is_none());
}

#[test]
fn test_list_notes_by_folder_orders_by_updated_at_desc() {
    let (mut store, folder) = store_with_folder("Work");
    let a = store.create_note(Some(&folder)).unwrap().into_value();
    let b = store.create_note(Some(&folder)).unwrap().into_value();
    let c = store.create_note(Some(&folder)).unwrap().into_value();

    // Update in the order b (t1), a (t2), c (t3)
    for id in [&b, &a, &c] {
        thread::sleep(Duration::from_millis(2));
        let _ = store.update_note(id, id, "").unwrap();
    }

    let listed: Vec<&str> = store
        .list_notes_by_folder(&folder)
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(listed, vec![c.as_str(), a.as_str(), b.as_str()]);
}

#[test]
fn test_list_notes_by_folder_filters_by_folder() {
    let (mut store, work) = store_with_folder("Work");
    let home = store.create_folder(Some("Home")).into_value();

    let _ = store.create_note(Some(&work)).unwrap();
    let _ = store.create_note(Some(&home)).unwrap();
    let _ = store.create_note(Some(&home)).unwrap();

    assert_eq!(store.list_notes_by_folder(&work).len(), 1);
    assert_eq!(store.list_notes_by_folder(&home).len(), 2);
    assert!(store.list_notes_by_folder("other").is_empty());
}

#[test]
fn test_create_folder_default_name_and_selection() {
    let mut store = NoteStore::open(MemoryGateway::default());

    let unnamed = store.create_folder(None);
    assert_eq!(unnamed.status, SaveStatus::Saved);
    assert_eq!(store.folder(&unnamed.value).unwrap().name, DEFAULT_FOLDER_NAME);

    let blank = store.create_folder(Some("   ")).into_value();
    assert_eq!(store.folder(&blank).unwrap().name, DEFAULT_FOLDER_NAME);

    let named = store.create_folder(Some("  Work ")).into_value();
    assert_eq!(store.folder(&named).unwrap().name, "Work");
    assert_eq!(store.active_folder().unwrap().id, named);

    assert_eq!(store.gateway().stored.borrow().folders.len(), 3);
}

#[test]
fn test_delete_folder_cascades_to_notes() {
    let (mut store, work) = store_with_folder("Work");
    let home = store.create_folder(Some("Home")).into_value();
    for _ in 0..3 {
        let _ = store.create_note(Some(&work)).unwrap();
    }
    let survivor = store.create_note(Some(&home)).unwrap().into_value();

    let change = store.delete_folder(&work);
    assert_eq!(change.value, 3);
    assert_eq!(change.status, SaveStatus::Saved);

    assert!(store.folder(&work).is_none());
    assert!(store.notes().iter().all(|n| n.folder_id != work));
    assert!(store.note(&survivor).is_some());

    let saved = store.gateway().stored.borrow();
    assert!(saved.notes.iter().all(|n| n.folder_id != work));
    assert_eq!(saved.folders.len(), 1);
}

#[test]
fn test_delete_active_folder_falls_back_to_first_remaining() {
    let (mut store, work) = store_with_folder("Work");
    let home = store.create_folder(Some("Home")).into_value();
    let trip = store.create_folder(Some("Trip")).into_value();
    assert_eq!(store.active_folder().unwrap().id, trip);

    let _ = store.delete_folder(&trip);
    assert_eq!(store.active_folder().unwrap().id, work);

    let _ = store.delete_folder(&work);
    assert_eq!(store.active_folder().unwrap().id, home);

    let _ = store.delete_folder(&home);
    assert!(store.active_folder().is_none());
}

#[test]
fn test_delete_inactive_folder_keeps_selection() {
    let (mut store, work) = store_with_folder("Work");
    let home = store.create_folder(Some("Home")).into_value();
    store.select_folder(&home).unwrap();

    let _ = store.delete_folder(&work);
    assert_eq!(store.active_folder().unwrap().id, home);
}

#[test]
fn test_delete_folder_clears_active_note_in_it() {
    let (mut store, work) = store_with_folder("Work");
    let _ = store.create_note(Some(&work)).unwrap();
    assert!(store.active_note().is_some());

    let _ = store.delete_folder(&work);
    assert!(store.active_note().is_none());
}

#[test]
fn test_delete_unknown_folder_is_skipped() {
    let (mut store, _) = store_with_folder("Work");
    let saves = store.gateway().saves.get();

    let change = store.delete_folder("missing");
    assert_eq!(change.value, 0);
    assert_eq!(change.status, SaveStatus::Skipped);
    assert_eq!(store.gateway().saves.get(), saves);
}

#[test]
fn test_rename_folder() {
    let (mut store, work) = store_with_folder("Work");

    let change = store.rename_folder(&work, "  Projects  ").unwrap();
    assert!(change.value);
    assert_eq!(change.status, SaveStatus::Saved);
    assert_eq!(store.folder(&work).unwrap().name, "Projects");
    assert_eq!(store.gateway().stored.borrow().folders[0].name, "Projects");
}

#[test]
fn test_rename_folder_blank_name_is_noop() {
    let (mut store, work) = store_with_folder("Work");
    let saves = store.gateway().saves.get();

    let change = store.rename_folder(&work, "   ").unwrap();
    assert!(!change.value);
    assert_eq!(change.status, SaveStatus::Skipped);
    assert_eq!(store.folder(&work).unwrap().name, "Work");
    assert_eq!(store.gateway().saves.get(), saves);
}

#[test]
fn test_rename_unknown_folder_fails() {
    let (mut store, _) = store_with_folder("Work");
    let result = store.rename_folder("missing", "New");
    assert!(matches!(result, Err(NoteboxError::FolderNotFound(_))));
}

#[test]
fn test_failed_save_keeps_in_memory_change() {
    let (mut store, work) = store_with_folder("Work");
    store.gateway().fail_saves.set(true);

    let change = store.create_note(Some(&work)).unwrap();
    assert!(change.save_failed());
    assert!(store.note(&change.value).is_some());
    assert!(store.gateway().stored.borrow().notes.is_empty());
}

#[test]
fn test_select_note_activates_its_folder() {
    let (mut store, work) = store_with_folder("Work");
    let note = store.create_note(Some(&work)).unwrap().into_value();
    let _home = store.create_folder(Some("Home")).into_value();

    store.select_note(&note).unwrap();
    assert_eq!(store.active_folder().unwrap().id, work);
    assert_eq!(store.active_note().unwrap().id, note);

    assert!(matches!(
        store.select_note("missing"),
        Err(NoteboxError::NoteNotFound(_))
    ));
    assert!(matches!(
        store.select_folder("missing"),
        Err(NoteboxError::FolderNotFound(_))
    ));
}

#[test]
fn test_unfiled_notes_are_kept_but_not_listed_in_folders() {
    let mut legacy = Note::new("old".to_string(), String::new());
    legacy.title = "From v1".to_string();
    let doc = Document {
        notes: vec![legacy],
        folders: Vec::new(),
    };
    let mut store = NoteStore::open(MemoryGateway::with_document(doc));
    let work = store.create_folder(Some("Work")).into_value();

    assert!(store.list_notes_by_folder(&work).is_empty());
    assert_eq!(store.unfiled_notes().len(), 1);
    assert_eq!(store.gateway().stored.borrow().notes.len(), 1);
}

#[test]
fn test_end_to_end_reload_from_file() {
    let tmp = TempDir::new().unwrap();

    let (work, note_id) = {
        let mut store = NoteStore::open(JsonFileStore::in_dir(tmp.path()));
        let work = store.create_folder(Some("Work")).into_value();
        let note_id = store.create_note(Some(&work)).unwrap().into_value();
        let change = store
            .update_note(&note_id, "Draft", "First paragraph.\n\nSecond.")
            .unwrap();
        assert_eq!(change.status, SaveStatus::Saved);
        (work, note_id)
    };

    let reopened = NoteStore::open(JsonFileStore::in_dir(tmp.path()));
    assert_eq!(reopened.folder(&work).unwrap().name, "Work");
    assert_eq!(reopened.active_folder().unwrap().id, work);

    let notes = reopened.list_notes_by_folder(&work);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, note_id);
    assert_eq!(notes[0].title, "Draft");
    assert_eq!(notes[0].content, "First paragraph.\n\nSecond.");
}

#[test]
fn test_folder_without_id_gets_fresh_id_on_open() {
    let legacy = Note::new("old".to_string(), String::new());
    let doc = Document {
        notes: vec![legacy],
        folders: vec![Folder::new(String::new(), "Nameless".to_string())],
    };
    let store = NoteStore::open(MemoryGateway::with_document(doc));

    let folder = &store.folders()[0];
    assert!(!folder.id.is_empty());
    assert_eq!(folder.name, "Nameless");
    assert!(store.list_notes_by_folder(&folder.id).is_empty());
    assert_eq!(store.unfiled_notes().len(), 1);
}

#[test]
fn test_empty_folder_id_never_reaches_unfiled_notes() {
    let legacy = Note::new("old".to_string(), String::new());
    let doc = Document {
        notes: vec![legacy],
        folders: vec![Folder::new(String::new(), "Nameless".to_string())],
    };
    let mut store = NoteStore::open(MemoryGateway::with_document(doc));

    assert!(store.list_notes_by_folder("").is_empty());

    let change = store.delete_folder("");
    assert_eq!(change.value, 0);
    assert_eq!(change.status, SaveStatus::Skipped);
    assert!(store.note("old").is_some());
    assert_eq!(store.folders().len(), 1);
}
