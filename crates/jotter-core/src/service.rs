use crate::{CreateNote, Error, Note, NoteStore};

/// The service that holds the note rules.
/// Generic over the store implementation.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Add a new note.
    ///
    /// Empty text is rejected with `MissingText`. Text longer than the store's
    /// limit is rejected with `TextTooLong`. The text is stored as given.
    pub async fn add_note(&self, text: impl Into<String>) -> Result<Note, Error> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::MissingText);
        }

        if let Some(max) = self.store.max_text_len() {
            if text.chars().count() > max {
                return Err(Error::TextTooLong { max });
            }
        }

        self.store.add_note(CreateNote { text }).await
    }

    /// Get a note by ID.
    pub async fn get_note(&self, id: i64) -> Result<Option<Note>, Error> {
        self.store.get_note(id).await
    }

    /// List all notes in insertion order.
    pub async fn list_notes(&self) -> Result<Vec<Note>, Error> {
        self.store.list_notes().await
    }

    /// Delete a note by ID. Returns false if there was no such note.
    pub async fn delete_note(&self, id: i64) -> Result<bool, Error> {
        self.store.delete_note(id).await
    }

    /// Delete a note by ID, failing with `NotFound` if it does not exist.
    pub async fn remove_note(&self, id: i64) -> Result<(), Error> {
        if self.store.delete_note(id).await? {
            Ok(())
        } else {
            Err(Error::NotFound(id))
        }
    }
}
