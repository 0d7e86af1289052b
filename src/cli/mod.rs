mod commands;
mod format;
mod handlers;

pub use commands::{Cli, Commands, FolderAction, FolderCommand, NoteAction, NoteCommand};
pub use handlers::{
    handle_folder_add, handle_folder_delete, handle_folder_list, handle_folder_rename,
    handle_note_add, handle_note_delete, handle_note_edit, handle_note_list, handle_note_show,
    MAX_FOLDER_NAME_CHARS,
};
