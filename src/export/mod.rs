//! Export module for CSV and JSON export/import
//!
//! Turns a filtered session collection plus its summary into a document the
//! host hands to the browser or filesystem, and parses such documents back.

pub mod csv_export;
pub mod csv_import;
pub mod io;
pub mod json_export;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Session;
use crate::range::DateRange;
use crate::HistoryError;

/// Document-level import failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("marker not found")]
    MarkerNotFound,

    #[error("no valid session data")]
    NoValidSessionData,
}

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(HistoryError::InvalidOption(format!(
                "Invalid export format: {}. Use 'csv' or 'json'",
                s
            ))),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// MIME hint handed to the host along with the document
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Column layout of the detailed data section
///
/// Rows are matched to a layout by their field count, never by a version
/// marker in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvLayout {
    /// `Date,Start Time,End Time,Task,Duration (sec),Duration (time)`
    #[default]
    Extended,
    /// `Date,Task,Duration (sec),Duration (time)`
    Legacy,
}

impl CsvLayout {
    pub fn header(&self) -> &'static str {
        match self {
            CsvLayout::Extended => "Date,Start Time,End Time,Task,Duration (sec),Duration (time)",
            CsvLayout::Legacy => "Date,Task,Duration (sec),Duration (time)",
        }
    }

    /// Fields a row needs to be read with this layout
    pub fn column_count(&self) -> usize {
        match self {
            CsvLayout::Extended => 6,
            CsvLayout::Legacy => 4,
        }
    }

    /// Pick the widest layout a row with `field_count` fields satisfies
    pub fn detect(field_count: usize) -> Option<Self> {
        [CsvLayout::Extended, CsvLayout::Legacy]
            .into_iter()
            .find(|layout| field_count >= layout.column_count())
    }
}

/// Options for export operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Export format (csv or json)
    #[serde(default)]
    pub format: ExportFormat,
    /// CSV column layout; ignored for JSON
    #[serde(default)]
    pub layout: CsvLayout,
}

/// A finished export, ready for the host to save or download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportDocument {
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

/// Filename for an export of `range`: `flow-export-<start>-<end>.<ext>`
pub fn export_filename(range: &DateRange, format: ExportFormat) -> String {
    format!(
        "flow-export-{}-{}.{}",
        range.start_date_string(),
        range.end_date_string(),
        format.extension()
    )
}

/// Export the sessions inside `range` in the format chosen by `options`
pub fn export_sessions(
    sessions: &[Session],
    range: &DateRange,
    options: &ExportOptions,
    exported_at: &DateTime<FixedOffset>,
) -> Result<ExportDocument, HistoryError> {
    match options.format {
        ExportFormat::Csv => Ok(csv_export::export_csv_at(
            sessions,
            range,
            options.layout,
            exported_at,
        )),
        ExportFormat::Json => json_export::export_json_at(sessions, range, exported_at),
    }
}
