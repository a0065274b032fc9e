//! Volatile in-process note store. Contents are lost when the process exits.

use std::sync::{Mutex, MutexGuard};

use crate::{CreateNote, Error, Note, NoteStore};

#[derive(Debug)]
struct MemoryState {
    notes: Vec<Note>,
    next_id: i64,
}

/// In-memory store backed by a vector and an id counter.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                notes: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::Database("memory store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NoteStore for MemoryStore {
    async fn add_note(&self, note: CreateNote) -> Result<Note, Error> {
        let mut state = self.state()?;
        let note = Note {
            id: state.next_id,
            text: note.text,
        };
        state.next_id += 1;
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, Error> {
        let state = self.state()?;
        Ok(state.notes.iter().find(|n| n.id == id).cloned())
    }

    async fn list_notes(&self) -> Result<Vec<Note>, Error> {
        Ok(self.state()?.notes.clone())
    }

    async fn delete_note(&self, id: i64) -> Result<bool, Error> {
        let mut state = self.state()?;
        let before = state.notes.len();
        state.notes.retain(|n| n.id != id);
        Ok(state.notes.len() < before)
    }
}
