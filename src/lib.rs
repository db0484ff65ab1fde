//! Flow session history engine
//!
//! The data side of the Flow focus timer. It handles:
//! - The task and session data model
//! - Date range presets and filtering
//! - Summary metrics and daily trends
//! - CSV and JSON export and re-import
//! - Persisting and erasing history through a key-value store

pub mod export;
pub mod format;
pub mod history;
pub mod metrics;
pub mod models;
pub mod range;
pub mod storage;
pub mod trends;

pub use export::{
    export_sessions, CsvLayout, ExportDocument, ExportFormat, ExportOptions, FormatError,
};
pub use models::{Session, SessionBuilder, Summary, Task, TaskTotal};
pub use range::{filter_by_range, preset_ranges, DateRange, PresetRange, PresetRanges};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

/// Error type for history operations
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Import format error: {0}")]
    Format(#[from] FormatError),

    #[error("Failed to read file: {0}")]
    ReadFailure(#[source] std::io::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

// Hosts forward errors over IPC as plain strings
impl serde::Serialize for HistoryError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Install the default log subscriber
///
/// Does nothing if the host already installed one.
pub fn init_logging() {
    let installed = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Starting Flow history engine");
    }
}
