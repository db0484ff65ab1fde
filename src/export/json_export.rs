//! JSON export functionality
//!
//! A full-fidelity backup of the sessions in a range, with the summary
//! alongside. Unlike CSV, session timestamps survive with full precision.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::{export_filename, ExportDocument, ExportFormat, FormatError};
use crate::metrics::summarize;
use crate::models::session::generate_session_id;
use crate::models::{Session, Summary};
use crate::range::{filter_by_range, DateRange};
use crate::HistoryError;

const EXPORT_VERSION: &str = "1.0.0";

/// Complete export structure for JSON
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsExportJson {
    pub export_date: String,
    pub export_version: &'static str,
    pub period: DateRange,
    pub summary: Summary,
    pub sessions: Vec<Session>,
}

/// Accepted backup shapes: a full export document, or a bare session list
/// as the host persists it
#[derive(Deserialize)]
#[serde(untagged)]
enum SessionsBackup {
    Document { sessions: Vec<Session> },
    List(Vec<Session>),
}

/// Export the sessions inside `range` as pretty-printed JSON
pub fn export_json_at(
    sessions: &[Session],
    range: &DateRange,
    exported_at: &DateTime<FixedOffset>,
) -> Result<ExportDocument, HistoryError> {
    let mut filtered = filter_by_range(sessions, range);
    filtered.sort_by_key(|s| s.start_time);

    let export = SessionsExportJson {
        export_date: exported_at.to_rfc3339(),
        export_version: EXPORT_VERSION,
        period: *range,
        summary: summarize(&filtered),
        sessions: filtered,
    };

    let content = serde_json::to_string_pretty(&export)?;
    let filename = export_filename(range, ExportFormat::Json);
    tracing::info!("Exported {} sessions to {}", export.sessions.len(), filename);

    Ok(ExportDocument {
        filename,
        mime_type: ExportFormat::Json.mime_type(),
        content,
    })
}

/// Read sessions back from a JSON backup
///
/// Every session receives a fresh id so a restore never collides with the
/// history it is merged into.
pub fn import_json(text: &str) -> Result<Vec<Session>, HistoryError> {
    let backup: SessionsBackup = serde_json::from_str(text)?;
    let mut sessions = match backup {
        SessionsBackup::Document { sessions } => sessions,
        SessionsBackup::List(sessions) => sessions,
    };

    if sessions.is_empty() {
        return Err(FormatError::NoValidSessionData.into());
    }

    let now = Utc::now();
    for session in &mut sessions {
        session.id = generate_session_id(now);
    }

    tracing::info!("Imported {} sessions from JSON backup", sessions.len());
    Ok(sessions)
}
