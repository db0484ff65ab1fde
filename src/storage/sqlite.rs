//! SQLite-backed store
//!
//! A single key-value table in a local database file.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use super::{KeyValueStore, StorageError};

/// SQL schema for the key-value table
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Database connection wrapper
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("Opened history store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Get the database file path (`None` for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Execute a query with the database connection
    fn with_connection<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StorageError>,
    {
        let mut conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        f(&mut conn)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_connection(|conn| {
            conn.execute(
                r#"
                INSERT INTO kv (key, value, updated_at)
                VALUES (?1, ?2, CURRENT_TIMESTAMP)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
            Ok(())
        })
    }

    /// Deletes inside one transaction: either every key goes or none does
    fn delete_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.with_connection(|conn| {
            let tx = conn.transaction()?;
            for key in keys {
                tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
            }
            tx.commit()?;
            Ok(())
        })
    }
}

/// Get the default database path
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("flow").join("history.db")
}
