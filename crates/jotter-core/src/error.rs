use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing text")]
    MissingText,

    #[error("Text exceeds {max} characters")]
    TextTooLong { max: usize },

    #[error("Note not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingText | Error::TextTooLong { .. } | Error::NotFound(_)
        )
    }
}
