//! Persistence collaborator
//!
//! The host owns a key-value store of opaque JSON blobs. The engine only
//! ever gets, sets, and deletes whole values under fixed keys; it never
//! iterates the keyspace.

pub mod memory;
pub mod sqlite;

use thiserror::Error;

pub use memory::MemoryStore;
pub use sqlite::{default_db_path, SqliteStore};

/// Recorded sessions
pub const SESSIONS_KEY: &str = "flow-sessions";
/// Tasks that have had sessions recorded against them
pub const TASK_HISTORY_KEY: &str = "flow-task-history";
/// The user's current task list
pub const TASKS_KEY: &str = "flow-tasks";
/// Timer and UI settings
pub const SETTINGS_KEY: &str = "flow-settings";

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Key-value store holding serialized JSON values
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; removing an absent key is not an error
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Remove several keys as one operation
    fn delete_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.delete(key)?;
        }
        Ok(())
    }
}
