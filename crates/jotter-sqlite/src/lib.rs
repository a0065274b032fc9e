//! SQLite implementation of the Jotter note store.

use jotter_core::{get_pending_migrations, CreateNote, Error, Note, NoteStore, SCHEMA_VERSION};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Longest note text the `notes` table accepts.
pub const MAX_TEXT_LEN: usize = 200;

/// SQLite-backed store. Every mutation is committed before the call returns.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a database at the given path and run any pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let conn = Connection::open(path).map_err(|e| Error::Database(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database and run migrations.
    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Database(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, Error> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.conn
            .lock()
            .map_err(|_| Error::Database("connection lock poisoned".into()))
    }

    /// Run any pending database migrations.
    fn run_migrations(&self) -> Result<(), Error> {
        let conn = self.conn()?;

        // Ensure _jotter_meta table exists
        conn.execute(
            "CREATE TABLE IF NOT EXISTS _jotter_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        let current_version: i64 = conn
            .query_row(
                "SELECT value FROM _jotter_meta WHERE key = 'schema_version'",
                [],
                |row| {
                    let val: String = row.get(0)?;
                    Ok(val.parse().unwrap_or(0))
                },
            )
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?
            .unwrap_or(0);

        if current_version >= SCHEMA_VERSION {
            return Ok(());
        }

        for migration in get_pending_migrations(current_version) {
            log::debug!("Applying migration {} ({})", migration.version, migration.name);
            for statement in migration.statements {
                // Created above
                if statement.contains("_jotter_meta") {
                    continue;
                }
                conn.execute(statement, []).map_err(|e| {
                    Error::Database(format!("Migration {} failed: {}", migration.name, e))
                })?;
            }
        }

        conn.execute(
            "INSERT OR REPLACE INTO _jotter_meta (key, value) VALUES ('schema_version', ?1)",
            params![SCHEMA_VERSION.to_string()],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl NoteStore for SqliteStore {
    async fn add_note(&self, note: CreateNote) -> Result<Note, Error> {
        let conn = self.conn()?;

        conn.execute("INSERT INTO notes (text) VALUES (?1)", params![note.text])
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Note {
            id: conn.last_insert_rowid(),
            text: note.text,
        })
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, Error> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT id, text FROM notes WHERE id = ?1",
            params![id],
            |row| {
                Ok(Note {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn list_notes(&self) -> Result<Vec<Note>, Error> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare("SELECT id, text FROM notes ORDER BY id")
            .map_err(|e| Error::Database(e.to_string()))?;

        let notes = stmt
            .query_map([], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(notes)
    }

    async fn delete_note(&self, id: i64) -> Result<bool, Error> {
        let conn = self.conn()?;

        let rows = conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows > 0)
    }

    fn max_text_len(&self) -> Option<usize> {
        Some(MAX_TEXT_LEN)
    }
}
