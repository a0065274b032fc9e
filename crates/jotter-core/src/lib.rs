//! Jotter core library - note type, store trait, in-memory store and the
//! service holding the note rules.
//!
//! This crate contains no I/O and can be compiled for any target.

mod error;
mod memory;
mod migrations;
mod note;
mod service;
mod store;

pub use error::Error;
pub use memory::MemoryStore;
pub use migrations::{get_pending_migrations, Migration, MIGRATIONS, SCHEMA_VERSION};
pub use note::{CreateNote, Note};
pub use service::NoteService;
pub use store::NoteStore;
