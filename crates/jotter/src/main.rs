//! Jotter - minimal note-taking service with a web page and a JSON API.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jotter_core::{MemoryStore, NoteService, NoteStore};
use jotter_sqlite::SqliteStore;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE: &str = "notes.db";
const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Notes seeded by `serve --demo` into an empty store.
const DEMO_NOTES: &[&str] = &["First note!", "Flask is fun.", "War Eagle!"];

#[derive(Parser)]
#[command(name = "jotter", about = "Minimal note-taking service", version)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, env = "JOTTER_DB", default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true, env = "JOTTER_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Address to listen on
        #[arg(long, env = "JOTTER_BIND", default_value = DEFAULT_BIND)]
        bind: String,
        /// Keep notes in memory instead of the database (lost on exit)
        #[arg(long)]
        memory: bool,
        /// Seed a few demo notes if the store is empty
        #[arg(long)]
        demo: bool,
    },
    /// Add a new note
    Add {
        /// Note text (reads from stdin if not provided)
        text: Option<String>,
    },
    /// List all notes
    Ls,
    /// Show one or more notes
    Show {
        /// Comma-separated note IDs
        ids: String,
    },
    /// Delete one or more notes
    Rm {
        /// Comma-separated note IDs
        ids: String,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn open_store(path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(path).with_context(|| format!("Failed to open database {}", path.display()))
}

fn parse_ids(ids: &str) -> Result<Vec<i64>> {
    ids.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().context(format!("Invalid note ID: {}", s)))
        .collect()
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

fn is_stdin_tty() -> bool {
    atty::is(atty::Stream::Stdin)
}

async fn seed_demo_notes<S: NoteStore>(service: &NoteService<S>) -> Result<()> {
    if !service.list_notes().await?.is_empty() {
        log::info!("Store is not empty, skipping demo notes");
        return Ok(());
    }
    for text in DEMO_NOTES {
        service.add_note(*text).await?;
    }
    log::info!("Seeded {} demo notes", DEMO_NOTES.len());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    log::info!("Shutting down");
}

async fn run_server<S: NoteStore + 'static>(
    service: NoteService<S>,
    bind: &str,
    demo: bool,
) -> Result<()> {
    if demo {
        seed_demo_notes(&service).await?;
    }

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    log::info!("Jotter listening on http://{}", bind);

    jotter_server::serve(listener, service, shutdown_signal())
        .await
        .context("Server error")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Serve { bind, memory, demo } => {
            if memory {
                log::info!("Using in-memory store");
                run_server(NoteService::new(MemoryStore::new()), &bind, demo).await?;
            } else {
                log::info!("Using database {}", cli.db.display());
                let store = open_store(&cli.db)?;
                run_server(NoteService::new(store), &bind, demo).await?;
            }
        }

        Commands::Add { text } => {
            let text = match text {
                Some(t) => t,
                None if !is_stdin_tty() => read_stdin()?.trim_end_matches('\n').to_string(),
                None => bail!("No note text given"),
            };
            let service = NoteService::new(open_store(&cli.db)?);
            let note = service.add_note(text).await?;
            println!("Added note {}", note.id);
        }

        Commands::Ls => {
            let service = NoteService::new(open_store(&cli.db)?);
            for note in service.list_notes().await? {
                println!("{}: {}", note.id, note.text);
            }
        }

        Commands::Show { ids } => {
            let ids = parse_ids(&ids)?;
            if ids.is_empty() {
                eprintln!("No note IDs provided");
                std::process::exit(1);
            }

            let service = NoteService::new(open_store(&cli.db)?);
            let mut not_found = Vec::new();
            for id in &ids {
                match service.get_note(*id).await? {
                    Some(note) => println!("{}: {}", note.id, note.text),
                    None => not_found.push(*id),
                }
            }

            if !not_found.is_empty() {
                for id in &not_found {
                    eprintln!("Note {} not found", id);
                }
                std::process::exit(1);
            }
        }

        Commands::Rm { ids } => {
            let ids = parse_ids(&ids)?;
            if ids.is_empty() {
                eprintln!("No note IDs provided");
                std::process::exit(1);
            }

            let service = NoteService::new(open_store(&cli.db)?);
            let mut not_found = Vec::new();
            for id in &ids {
                if service.delete_note(*id).await? {
                    println!("Deleted note {}", id);
                } else {
                    not_found.push(*id);
                }
            }

            if !not_found.is_empty() {
                for id in &not_found {
                    eprintln!("Note {} not found", id);
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
