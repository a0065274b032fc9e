use serde::{Deserialize, Serialize};

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
}

/// Parameters for creating a new note. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub text: String,
}
