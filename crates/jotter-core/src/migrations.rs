//! Embedded database migrations for Jotter.
//!
//! Migrations are versioned and run automatically when a store is opened.
//! The schema version is tracked in the `_jotter_meta` table.

/// Current schema version. Increment when adding new migrations.
pub const SCHEMA_VERSION: i64 = 1;

/// A database migration with version number and SQL statements.
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

/// All migrations in order.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    statements: &[
        "CREATE TABLE IF NOT EXISTS _jotter_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        // AUTOINCREMENT keeps SQLite from reusing the ids of deleted rows.
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text VARCHAR(200) NOT NULL CHECK (length(text) <= 200)
        )",
    ],
}];

/// Get migrations that need to be applied given the current version.
pub fn get_pending_migrations(current_version: i64) -> Vec<&'static Migration> {
    MIGRATIONS
        .iter()
        .filter(|m| m.version > current_version)
        .collect()
}
