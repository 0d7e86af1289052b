use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notebox")]
#[command(version, about = "Local notes organized into folders")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Notes file to read and write (defaults to ./notes.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage folders
    Folder(FolderCommand),

    /// Manage notes
    Note(NoteCommand),
}

#[derive(Args, Debug)]
pub struct FolderCommand {
    #[command(subcommand)]
    pub action: FolderAction,
}

#[derive(Subcommand, Debug)]
pub enum FolderAction {
    /// Create a folder
    Add {
        /// Folder name (up to 20 characters, defaults to "New folder")
        name: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List folders
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a folder
    Rename {
        /// Folder ID or unique prefix
        id: String,

        /// New name (up to 20 characters)
        name: String,
    },

    /// Delete a folder and every note in it
    Delete {
        /// Folder ID or unique prefix
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct NoteCommand {
    #[command(subcommand)]
    pub action: NoteAction,
}

#[derive(Subcommand, Debug)]
pub enum NoteAction {
    /// Create a note in a folder
    ///
    /// With --title, --content or --stdin the note is created empty and then
    /// edited, so the notes file is written twice.
    Add {
        /// Folder ID or unique prefix
        #[arg(long)]
        folder: Option<String>,

        /// Note title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Note content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a note's title and/or content
    Edit {
        /// Note ID or unique prefix
        id: String,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// List notes in a folder, most recently modified first
    List {
        /// Folder ID or unique prefix
        #[arg(long, conflicts_with = "unfiled")]
        folder: Option<String>,

        /// List notes that belong to no folder
        #[arg(long)]
        unfiled: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note ID or unique prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note ID or unique prefix
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}
