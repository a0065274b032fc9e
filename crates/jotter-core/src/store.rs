use crate::{CreateNote, Error, Note};

/// Storage abstraction shared by the in-memory and SQLite stores.
///
/// Implementations must be `Send + Sync` so a single store can be shared
/// across request handlers.
#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note and return it with its newly assigned ID.
    ///
    /// IDs strictly increase and are never handed out twice, even after the
    /// note holding one is deleted.
    async fn add_note(&self, note: CreateNote) -> Result<Note, Error>;

    /// Get a note by ID.
    async fn get_note(&self, id: i64) -> Result<Option<Note>, Error>;

    /// List every note in insertion order.
    async fn list_notes(&self) -> Result<Vec<Note>, Error>;

    /// Delete a note by ID. Returns true if deleted, false if not found.
    async fn delete_note(&self, id: i64) -> Result<bool, Error>;

    /// Longest text (in characters) this store accepts, if it has a limit.
    fn max_text_len(&self) -> Option<usize> {
        None
    }
}
