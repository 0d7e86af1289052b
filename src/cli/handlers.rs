use std::io::{self, Read};

use chrono::Utc;

use super::format::{relative_date, truncate};
use crate::config::Config;
use crate::entity::{Folder, Note};
use crate::error::{NoteboxError, Result};
use crate::storage::JsonFileStore;
use crate::store::{Change, NoteStore};

/// Longest folder name the front end accepts, in characters.
pub const MAX_FOLDER_NAME_CHARS: usize = 20;

const TITLE_COLUMN: usize = 32;

type Store = NoteStore<JsonFileStore>;

fn open_store(config: &Config) -> Store {
    NoteStore::open(JsonFileStore::new(config.notes_file.clone()))
}

/// Unwrap a change, turning a failed save into an error for the user.
fn committed<T>(store: &Store, change: Change<T>) -> Result<T> {
    if change.save_failed() {
        return Err(NoteboxError::SaveFailed(store.gateway().path().to_path_buf()));
    }
    Ok(change.into_value())
}

/// Resolve an exact id or a unique id prefix against `ids`.
fn resolve_id<'a>(
    ids: impl Iterator<Item = &'a str> + Clone,
    query: &str,
    not_found: fn(String) -> NoteboxError,
) -> Result<String> {
    if let Some(exact) = ids.clone().find(|id| *id == query) {
        return Ok(exact.to_string());
    }
    if query.is_empty() {
        return Err(not_found(query.to_string()));
    }

    let mut matches = ids.filter(|id| id.starts_with(query));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id.to_string()),
        (Some(_), Some(_)) => Err(NoteboxError::AmbiguousId(query.to_string())),
        (None, _) => Err(not_found(query.to_string())),
    }
}

fn resolve_folder(store: &Store, query: &str) -> Result<String> {
    resolve_id(
        store.folders().iter().map(|f| f.id.as_str()),
        query,
        NoteboxError::FolderNotFound,
    )
}

fn resolve_note(store: &Store, query: &str) -> Result<String> {
    resolve_id(
        store.notes().iter().map(|n| n.id.as_str()),
        query,
        NoteboxError::NoteNotFound,
    )
}

fn validate_folder_name(name: &str) -> Result<()> {
    let len = name.trim().chars().count();
    if len > MAX_FOLDER_NAME_CHARS {
        return Err(NoteboxError::InvalidInput(format!(
            "folder name is {} characters, the limit is {}",
            len, MAX_FOLDER_NAME_CHARS
        )));
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

/// Ask for confirmation on a terminal. Without a terminal, refuse.
fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Err(NoteboxError::InvalidInput(
            "use --force to delete in non-interactive mode".to_string(),
        ));
    }

    eprintln!("{} [y/N] ", prompt);
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_note_row(note: &Note) {
    println!(
        "{}  {:<width$}  {}",
        note.id,
        truncate(note.display_title(), TITLE_COLUMN),
        relative_date(note.updated_at, Utc::now()),
        width = TITLE_COLUMN
    );
}

fn print_notes(notes: &[&Note], json: bool, empty_message: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
    } else if notes.is_empty() {
        println!("{}", empty_message);
    } else {
        for note in notes {
            print_note_row(note);
        }
    }
    Ok(())
}

// -------------------------------------------------------------------------
// Folders
// -------------------------------------------------------------------------

pub fn handle_folder_add(config: &Config, name: Option<String>, json: bool) -> Result<()> {
    if let Some(ref name) = name {
        validate_folder_name(name)?;
    }

    let mut store = open_store(config);
    let change = store.create_folder(name.as_deref());
    let id = committed(&store, change)?;

    let folder = store
        .folder(&id)
        .ok_or_else(|| NoteboxError::FolderNotFound(id.clone()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(folder)?);
    } else {
        println!("Created folder {} - {}", folder.id, folder.name);
    }
    Ok(())
}

pub fn handle_folder_list(config: &Config, json: bool) -> Result<()> {
    let store = open_store(config);
    let folders: &[Folder] = store.folders();

    if json {
        println!("{}", serde_json::to_string_pretty(folders)?);
        return Ok(());
    }

    if folders.is_empty() {
        println!("No folders found.");
        return Ok(());
    }

    for folder in folders {
        let count = store.list_notes_by_folder(&folder.id).len();
        println!(
            "{}  {:<width$}  {} note{}",
            folder.id,
            folder.name,
            count,
            if count == 1 { "" } else { "s" },
            width = MAX_FOLDER_NAME_CHARS
        );
    }

    let unfiled = store.unfiled_notes().len();
    if unfiled > 0 {
        println!("({} unfiled note(s), see `note list --unfiled`)", unfiled);
    }
    Ok(())
}

pub fn handle_folder_rename(config: &Config, id: String, name: String) -> Result<()> {
    validate_folder_name(&name)?;

    let mut store = open_store(config);
    let id = resolve_folder(&store, &id)?;
    let change = store.rename_folder(&id, &name)?;

    if committed(&store, change)? {
        println!("Renamed folder {} to {}", id, name.trim());
    } else {
        println!("Folder name unchanged: new name is empty.");
    }
    Ok(())
}

pub fn handle_folder_delete(config: &Config, id: String, force: bool) -> Result<()> {
    let mut store = open_store(config);
    let id = resolve_folder(&store, &id)?;

    if !force {
        let folder = store
            .folder(&id)
            .ok_or_else(|| NoteboxError::FolderNotFound(id.clone()))?;
        let count = store.list_notes_by_folder(&id).len();
        let prompt = format!(
            "Delete folder '{}' and its {} note(s)?",
            folder.name, count
        );
        if !confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let change = store.delete_folder(&id);
    let removed = committed(&store, change)?;
    println!("Deleted folder {} ({} note(s) removed)", id, removed);
    Ok(())
}

// -------------------------------------------------------------------------
// Notes
// -------------------------------------------------------------------------

pub fn handle_note_add(
    config: &Config,
    folder: Option<String>,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let mut store = open_store(config);

    let folder_id = match folder {
        Some(query) => Some(resolve_folder(&store, &query)?),
        None => store.active_folder().map(|f| f.id.clone()),
    };

    let content = if stdin { Some(read_stdin()?) } else { content };

    let change = store.create_note(folder_id.as_deref())?;
    let id = committed(&store, change)?;

    // A second full save. If it fails, the file keeps the empty note from
    // the first save and the command still reports the failure.
    if title.is_some() || content.is_some() {
        let title = title.unwrap_or_default();
        let content = content.unwrap_or_default();
        let change = store.update_note(&id, &title, &content)?;
        committed(&store, change)?;
    }

    let note = store
        .note(&id)
        .ok_or_else(|| NoteboxError::NoteNotFound(id.clone()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("Created note {} - {}", note.id, note.display_title());
    }
    Ok(())
}

pub fn handle_note_edit(
    config: &Config,
    id: String,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
) -> Result<()> {
    let mut store = open_store(config);
    let id = resolve_note(&store, &id)?;

    let content = if stdin { Some(read_stdin()?) } else { content };
    if title.is_none() && content.is_none() {
        return Err(NoteboxError::InvalidInput(
            "nothing to change: pass --title, --content or --stdin".to_string(),
        ));
    }

    let note = store
        .note(&id)
        .ok_or_else(|| NoteboxError::NoteNotFound(id.clone()))?;
    let title = title.unwrap_or_else(|| note.title.clone());
    let content = content.unwrap_or_else(|| note.content.clone());

    let change = store.update_note(&id, &title, &content)?;
    committed(&store, change)?;

    println!("Updated note {}", id);
    Ok(())
}

pub fn handle_note_list(
    config: &Config,
    folder: Option<String>,
    unfiled: bool,
    json: bool,
) -> Result<()> {
    let mut store = open_store(config);

    if unfiled {
        return print_notes(&store.unfiled_notes(), json, "No unfiled notes.");
    }

    if let Some(query) = folder {
        let id = resolve_folder(&store, &query)?;
        store.select_folder(&id)?;
    }
    let folder = store.active_folder().ok_or(NoteboxError::NoFolderSelected)?;

    if !json {
        println!("{}", folder.name);
    }
    print_notes(
        &store.list_notes_by_folder(&folder.id),
        json,
        "No notes in this folder.",
    )
}

pub fn handle_note_show(config: &Config, id: String, json: bool) -> Result<()> {
    let store = open_store(config);
    let id = resolve_note(&store, &id)?;
    let note = store
        .note(&id)
        .ok_or_else(|| NoteboxError::NoteNotFound(id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }

    let folder = store
        .folder(&note.folder_id)
        .map(|f| f.name.as_str())
        .unwrap_or("(unfiled)");

    println!("{}", note.display_title());
    println!("Folder:  {}", folder);
    println!("ID:      {}", note.id);
    println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated: {}", relative_date(note.updated_at, Utc::now()));
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
    Ok(())
}

pub fn handle_note_delete(config: &Config, id: String, force: bool) -> Result<()> {
    let mut store = open_store(config);
    let id = resolve_note(&store, &id)?;

    if !force {
        let title = store
            .note(&id)
            .map(|n| n.display_title().to_string())
            .unwrap_or_default();
        if !confirm(&format!("Delete note '{}'?", title))? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let change = store.delete_note(&id);
    committed(&store, change)?;
    println!("Deleted note {}", id);
    Ok(())
}
