use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::*;

use crate::{
    editor::{EditorSaveError, EditorSession},
    models::store::Store,
    remote::http::HttpTodoSource,
    services::{
        seed::{SeedError, mark_seeded, seed_store},
        todos::{
            DeleteTodoError, DeleteTodoParameters, ToggleTodoError, ToggleTodoParameters,
            delete_todo, toggle_todo,
        },
    },
    storage::{Storage, json::JsonFileStorage},
};

mod editor;
mod history;
mod models;
mod remote;
mod services;
mod storage;
mod ui;

#[derive(Parser)]
#[command(
    name = "tudo",
    about = "A to-do manager with an undoable editor for your terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all todos, newest first
    List,

    /// Search todos by title or body
    Search { query: String },

    /// Show a single todo in full
    Show { number: u64 },

    /// Add a new todo without opening the editor
    Add {
        /// Todo title
        title: String,

        /// Body text of the todo
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Create a new todo in the interactive editor
    New,

    /// Edit a todo in the interactive editor
    Edit {
        /// Todo number as shown by `tudo list`
        number: u64,
    },

    /// Toggle completion of a todo
    Done { number_or_fuzzy_name: String },

    /// Delete a todo
    Delete { number_or_fuzzy_name: String },

    /// Import seed todos from the remote source
    Seed {
        /// Re-import even if the store was already seeded
        #[arg(long)]
        force: bool,

        /// Mark the store as seeded without fetching anything
        #[arg(long)]
        skip: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize storage
    let storage_path = match std::env::var_os("TUDO_STORE") {
        Some(path) => PathBuf::from(path),
        None => dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tudo")
            .join("store.json"),
    };

    // Create parent directory if it doesn't exist
    if let Some(parent) = storage_path.parent() {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| {
            eprintln!("Error: Failed to create data directory: {}", e);
            std::process::exit(1);
        });
    }

    let storage = JsonFileStorage::new(storage_path);

    let mut store = match storage.load() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Failed to load store: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::List) | None => {
            seed_on_first_run(&mut store, &storage);
            render_list("Todos", store.search(""));
        }
        Some(Commands::Search { query }) => {
            let matches = store.search(&query);
            if matches.is_empty() {
                println!("No todos matching '{}'", query);
            } else {
                render_list(&format!("Search '{}'", query), matches);
            }
        }
        Some(Commands::Show { number }) => match store.get_todo_by_number(number) {
            Some(todo) => ui::render_todo_detail(todo),
            None => {
                eprintln!("Error: Todo '{}' not found", number);
                std::process::exit(1);
            }
        },
        Some(Commands::Add { title, notes }) => {
            let mut session = EditorSession::new();
            session.update_title(title);
            if let Some(notes) = notes {
                session.update_task(notes);
            }

            match session.save(&mut store, &storage) {
                Ok(todo) => {
                    println!("✓ Todo added: {}", todo.title);
                    println!("  #{}", todo.number);
                }
                Err(EditorSaveError::InvalidDraft) => {
                    eprintln!("Error: A todo needs a non-empty title and body");
                    eprintln!("\nExample: tudo add 'Buy milk' --notes '2%'");
                    std::process::exit(1);
                }
                Err(EditorSaveError::Storage(e)) => {
                    eprintln!("Error: Failed to save todo: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::New) => {
            let session = EditorSession::new();
            if let Err(e) = run_editor(session, &mut store, &storage) {
                eprintln!("Error: Editor input failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Edit { number }) => {
            let todo = match store.get_todo_by_number(number) {
                Some(todo) => todo.clone(),
                None => {
                    eprintln!("Error: Todo '{}' not found", number);
                    std::process::exit(1);
                }
            };

            let session = EditorSession::edit(&todo);
            if let Err(e) = run_editor(session, &mut store, &storage) {
                eprintln!("Error: Editor input failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Done {
            number_or_fuzzy_name,
        }) => {
            let params = ToggleTodoParameters {
                number_or_fuzzy_name,
            };

            match toggle_todo(&mut store, &storage, params) {
                Ok(todo) => {
                    if todo.completed {
                        println!("✓ Todo completed: {}", todo.title);
                    } else {
                        println!("○ Todo reopened: {}", todo.title);
                    }
                    println!("  #{}", todo.number);
                }
                Err(ToggleTodoError::TodoNotFound(identifier)) => {
                    eprintln!("Error: Todo '{}' not found", identifier);
                    std::process::exit(1);
                }
                Err(ToggleTodoError::AmbiguousTodoName(titles)) => {
                    eprintln!("Error: Todo name is ambiguous. Multiple todos found:");
                    for title in titles {
                        eprintln!("  - {}", title);
                    }
                    eprintln!("\nPlease be more specific or use the todo number.");
                    std::process::exit(1);
                }
                Err(ToggleTodoError::Storage(e)) => {
                    eprintln!("Error: Failed to save todo: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Delete {
            number_or_fuzzy_name,
        }) => {
            let params = DeleteTodoParameters {
                number_or_fuzzy_name,
            };

            match delete_todo(&mut store, &storage, params) {
                Ok(todo) => {
                    println!("✓ Todo deleted: {}", todo.title);
                }
                Err(DeleteTodoError::TodoNotFound(identifier)) => {
                    eprintln!("Error: Todo '{}' not found", identifier);
                    std::process::exit(1);
                }
                Err(DeleteTodoError::AmbiguousTodoName(titles)) => {
                    eprintln!("Error: Todo name is ambiguous. Multiple todos found:");
                    for title in titles {
                        eprintln!("  - {}", title);
                    }
                    eprintln!("\nPlease be more specific or use the todo number.");
                    std::process::exit(1);
                }
                Err(DeleteTodoError::Storage(e)) => {
                    eprintln!("Error: Failed to delete todo: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Seed { force, skip }) => {
            if skip {
                match mark_seeded(&mut store, &storage) {
                    Ok(()) => println!("✓ Store marked as seeded, nothing imported"),
                    Err(e) => {
                        eprintln!("Error: Failed to save store: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            let source = HttpTodoSource::default();
            match seed_store(&mut store, &storage, &source, force) {
                Ok(outcome) if outcome.skipped => {
                    println!("Store is already seeded. Use --force to re-import.");
                }
                Ok(outcome) => {
                    println!("✓ Imported {} todos", outcome.imported);
                }
                Err(SeedError::Remote(e)) => {
                    eprintln!("Error: Failed to fetch seed data: {}", e);
                    std::process::exit(1);
                }
                Err(SeedError::Storage(e)) => {
                    eprintln!("Error: Failed to save store: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// First run only: populate the store from the remote source. A fetch
/// failure degrades to a warning so the local store stays usable offline;
/// the seed flag stays unset and the next run retries.
fn seed_on_first_run(store: &mut Store, storage: &impl Storage) {
    if store.seeded {
        return;
    }

    let source = HttpTodoSource::default();
    match seed_store(store, storage, &source, false) {
        Ok(outcome) if !outcome.skipped => {
            println!("✓ Imported {} todos from the seed source", outcome.imported);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!(
                "Warning: Could not fetch seed data ({}). Starting with local todos only; run 'tudo seed' to retry or 'tudo seed --skip' to stop trying.",
                e
            );
        }
    }
}

fn render_list(header: &str, todos: Vec<&models::todo::Todo>) {
    if todos.is_empty() {
        println!("No todos yet. Add one with: tudo add 'Buy milk' --notes '2%'");
    } else {
        ui::render_view_header(header, todos.len());
        for todo in todos {
            ui::render_todo_line(todo);
        }
    }
}

/// Interactive editor loop over stdin.
///
/// One line per command; every field edit is one undoable step. The
/// undo/redo hint after each step is driven by the caretaker's status
/// stream, and quitting with unsaved changes asks for confirmation.
fn run_editor(
    mut session: EditorSession,
    store: &mut Store,
    storage: &impl Storage,
) -> io::Result<()> {
    session.subscribe(|status| ui::render_history_hint(status));

    println!(
        "\n  {}",
        "title <text> · notes <text> · undo · redo · show · save · quit".dimmed()
    );
    render_draft(&session);

    let stdin = io::stdin();
    let mut warned_unsaved = false;
    let mut line = String::new();

    loop {
        print!("tudo> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF behaves like a confirmed quit
            return Ok(());
        }

        let input = line.trim_end();
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "title" => {
                session.update_title(rest);
            }
            "notes" => {
                session.update_task(rest);
            }
            "undo" => {
                session.undo();
            }
            "redo" => {
                session.redo();
            }
            "show" => {
                render_draft(&session);
            }
            "save" => match session.save(store, storage) {
                Ok(todo) => {
                    println!("✓ Todo saved: {}", todo.title);
                    println!("  #{}", todo.number);
                    return Ok(());
                }
                Err(EditorSaveError::InvalidDraft) => {
                    eprintln!("A todo needs a non-empty title and body. Nothing saved.");
                }
                Err(EditorSaveError::Storage(e)) => {
                    eprintln!("Failed to save todo: {}", e);
                }
            },
            "quit" => {
                if session.has_unsaved_changes() && !warned_unsaved {
                    eprintln!("Unsaved changes. Type 'quit' again to discard, or 'save'.");
                    warned_unsaved = true;
                } else {
                    return Ok(());
                }
            }
            "" | "help" => {
                println!(
                    "  {}",
                    "title <text> · notes <text> · undo · redo · show · save · quit".dimmed()
                );
            }
            _ => {
                eprintln!("Unknown command '{}'. Type 'help' for the command list.", command);
            }
        }

        if command != "quit" {
            warned_unsaved = false;
        }
    }
}

fn render_draft(session: &EditorSession) {
    let marker = if session.is_valid() {
        "✓".green()
    } else {
        "·".dimmed()
    };
    println!("  {} {} {}", marker, "title:".dimmed(), session.title());
    println!("    {} {}", "notes:".dimmed(), session.task());
}
