use clap::Parser;
use notebox::cli::{
    handle_folder_add, handle_folder_delete, handle_folder_list, handle_folder_rename,
    handle_note_add, handle_note_delete, handle_note_edit, handle_note_list, handle_note_show,
    Cli, Commands, FolderAction, NoteAction,
};
use notebox::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::from_args(cli.file, cli.verbose);
    init_tracing(&config);

    let result = match cli.command {
        Commands::Folder(folder) => match folder.action {
            FolderAction::Add { name, json } => handle_folder_add(&config, name, json),
            FolderAction::List { json } => handle_folder_list(&config, json),
            FolderAction::Rename { id, name } => handle_folder_rename(&config, id, name),
            FolderAction::Delete { id, force } => handle_folder_delete(&config, id, force),
        },
        Commands::Note(note) => match note.action {
            NoteAction::Add {
                folder,
                title,
                content,
                stdin,
                json,
            } => handle_note_add(&config, folder, title, content, stdin, json),
            NoteAction::Edit {
                id,
                title,
                content,
                stdin,
            } => handle_note_edit(&config, id, title, content, stdin),
            NoteAction::List {
                folder,
                unfiled,
                json,
            } => handle_note_list(&config, folder, unfiled, json),
            NoteAction::Show { id, json } => handle_note_show(&config, id, json),
            NoteAction::Delete { id, force } => handle_note_delete(&config, id, force),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
