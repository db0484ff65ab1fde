//! File boundary for import and export
//!
//! Reading an uploaded file is the one suspension point of the engine: it
//! completes once with the whole text or fails. There is no partial read.

use std::path::{Path, PathBuf};

use super::csv_import::import_csv;
use super::json_export::import_json;
use super::ExportDocument;
use crate::models::Session;
use crate::HistoryError;

/// Read an import file as UTF-8 text
pub async fn read_import_file(path: impl AsRef<Path>) -> Result<String, HistoryError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        tracing::warn!("Failed to read import file {}: {}", path.display(), e);
        HistoryError::ReadFailure(e)
    })?;

    tracing::debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Read and parse an import file
///
/// `.json` files are treated as JSON backups; anything else as a CSV export.
pub async fn import_file(path: impl AsRef<Path>) -> Result<Vec<Session>, HistoryError> {
    let path = path.as_ref();
    let text = read_import_file(path).await?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        import_json(&text)
    } else {
        import_csv(&text)
    }
}

/// Write an export document into `dir`, returning the file path
pub async fn save_export(
    document: &ExportDocument,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, HistoryError> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(&document.filename);
    tokio::fs::write(&path, document.as_bytes()).await?;

    tracing::info!("Saved export to {}", path.display());
    Ok(path)
}

/// Get the default export directory (Downloads, Documents, or temp dir)
pub fn default_export_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(std::env::temp_dir)
}
