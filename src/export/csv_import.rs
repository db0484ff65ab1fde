//! CSV import functionality
//!
//! Parses a Flow export (or a compatible third-party file) back into
//! sessions. Only the detailed data section is read; the preamble is
//! ignored. Malformed rows are skipped one by one, and the import fails only
//! when the marker is missing or no row survives.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use super::csv_export::DETAILED_DATA_MARKER;
use super::{CsvLayout, FormatError};
use crate::models::session::add_seconds;
use crate::models::task::task_id_for_name;
use crate::models::{Session, SessionBuilder};
use crate::HistoryError;

/// Result of an import, including how many rows were dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub sessions: Vec<Session>,
    pub skipped_rows: usize,
}

/// Parse an export document into sessions
pub fn import_csv(text: &str) -> Result<Vec<Session>, HistoryError> {
    import_csv_report(text).map(|report| report.sessions)
}

/// Parse an export document, reporting skipped rows alongside the sessions
pub fn import_csv_report(text: &str) -> Result<ImportReport, HistoryError> {
    let data = detailed_data(text).ok_or(FormatError::MarkerNotFound)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(data.as_bytes());

    let mut sessions = Vec::new();
    let mut skipped_rows = 0;
    let mut record = StringRecord::new();

    loop {
        let start = reader.position().byte() as usize;
        let read = reader.read_record(&mut record);
        let end = reader.position().byte() as usize;
        let raw = data.get(start..end).unwrap_or_default();

        match read {
            Ok(false) => break,
            Ok(true) if is_well_quoted(raw) => {
                let fields: Vec<&str> = record.iter().collect();
                if is_blank(&fields) {
                    continue;
                }
                match parse_fields(&fields) {
                    Some(session) => sessions.push(session),
                    None => {
                        skipped_rows += 1;
                        tracing::debug!("Skipping malformed row: {:?}", record);
                    }
                }
            }
            // Older exports wrapped task names in quotes without escaping
            // the quotes inside them
            Ok(true) => {
                for line in raw.lines().filter(|line| !line.trim().is_empty()) {
                    match split_unescaped_row(line).and_then(|fields| {
                        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
                        parse_fields(&fields)
                    }) {
                        Some(session) => sessions.push(session),
                        None => {
                            skipped_rows += 1;
                            tracing::debug!("Skipping malformed row: {:?}", line);
                        }
                    }
                }
            }
            Err(e) => {
                skipped_rows += 1;
                tracing::debug!("Skipping unreadable row: {}", e);
                if end <= start {
                    break;
                }
            }
        }
    }

    if sessions.is_empty() {
        return Err(FormatError::NoValidSessionData.into());
    }

    if skipped_rows > 0 {
        tracing::warn!("Import skipped {} malformed rows", skipped_rows);
    }
    tracing::info!("Imported {} sessions", sessions.len());

    Ok(ImportReport {
        sessions,
        skipped_rows,
    })
}

/// Everything after the marker line and the header row that follows it
fn detailed_data(text: &str) -> Option<&str> {
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');

    while let Some(line) = lines.next() {
        offset += line.len();
        if line.contains(DETAILED_DATA_MARKER) {
            if let Some(header) = lines.next() {
                offset += header.len();
            }
            return text.get(offset..);
        }
    }

    None
}

fn is_blank(fields: &[&str]) -> bool {
    fields.iter().all(|f| f.trim().is_empty())
}

/// Whether a raw record follows CSV quoting rules: a quote may only open a
/// field, close it right before a delimiter, or appear doubled inside it
fn is_well_quoted(raw: &str) -> bool {
    let mut chars = raw.chars().peekable();
    let mut at_field_start = true;
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                match chars.peek() {
                    Some('"') => {
                        chars.next();
                    }
                    None | Some(',') | Some('\r') | Some('\n') => in_quotes = false,
                    Some(_) => return false,
                }
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            '"' => return false,
            ',' | '\r' | '\n' => at_field_start = true,
            _ => at_field_start = false,
        }
    }

    !in_quotes
}

/// Split a row whose quoted task name contains raw quotes
///
/// The task runs from the first field opening with a quote up to the third
/// field from the end; only its outer quotes are removed.
fn split_unescaped_row(line: &str) -> Option<Vec<String>> {
    let parts: Vec<&str> = line.split(',').collect();
    let open = parts.iter().position(|p| p.starts_with('"'))?;
    let close = parts.len().checked_sub(3)?;
    if close < open {
        return None;
    }

    let task = parts[open..=close].join(",");
    let inner = task.strip_prefix('"').unwrap_or(&task);
    let inner = inner.strip_suffix('"').unwrap_or(inner);

    let mut fields: Vec<String> = parts[..open].iter().map(|p| p.to_string()).collect();
    fields.push(inner.to_string());
    fields.extend(parts[close + 1..].iter().map(|p| p.to_string()));
    Some(fields)
}

/// Turn one data row into a session, or `None` if it is malformed
///
/// Every field but the task name is trimmed; the task name is kept as written.
fn parse_fields(fields: &[&str]) -> Option<Session> {
    let field = |i: usize| fields.get(i).copied().unwrap_or("");

    let (task_name, start_time, end_time, duration) = match CsvLayout::detect(fields.len())? {
        CsvLayout::Legacy => {
            let start = parse_date(field(0))?.and_time(NaiveTime::MIN).and_utc();
            let duration = parse_seconds(field(2))?;
            (field(1), start, add_seconds(start, duration), duration)
        }
        CsvLayout::Extended => {
            let day = parse_date(field(0));
            let start = parse_timestamp(field(1), day)?;
            let end = parse_timestamp(field(2), day)?;
            if end < start {
                return None;
            }
            (field(3), start, end, parse_seconds(field(4))?)
        }
    };

    if task_name.trim().is_empty() {
        return None;
    }

    Some(
        SessionBuilder::new(task_id_for_name(task_name), task_name.to_string(), start_time)
            .ended_at(end_time)
            .duration(duration)
            .build(),
    )
}

/// Parse a calendar date in `DD-MM-YY` (year 2000+YY) or `YYYY-MM-DD` form
///
/// The form is chosen by the length of the first dash-separated component.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.trim().split('-').collect();
    if parts.len() != 3 {
        return None;
    }

    let (year, month, day) = match parts[0].len() {
        2 => {
            let yy: i32 = parts[2].parse().ok()?;
            if parts[2].len() != 2 {
                return None;
            }
            (2000 + yy, parts[1].parse().ok()?, parts[0].parse().ok()?)
        }
        4 => (parts[0].parse().ok()?, parts[1].parse().ok()?, parts[2].parse().ok()?),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a start/end timestamp from the extended layout
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` as UTC,
/// or a bare `HH:MM[:SS]` placed on the row's date.
pub fn parse_timestamp(value: &str, day: Option<NaiveDate>) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(parsed.and_utc());
        }
    }

    let day = day?;
    ["%H:%M:%S", "%H:%M"]
        .into_iter()
        .find_map(|pattern| NaiveTime::parse_from_str(value, pattern).ok())
        .map(|time| day.and_time(time).and_utc())
}

/// Parse a non-negative duration in seconds; fractional values are rounded
fn parse_seconds(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(seconds);
    }

    let seconds: f64 = value.parse().ok()?;
    if seconds.is_finite() && seconds >= 0.0 && seconds <= u64::MAX as f64 {
        Some(seconds.round() as u64)
    } else {
        None
    }
}
