//! CSV export functionality
//!
//! Writes the Flow export document: a preamble with the export time, the
//! period and a summary block, then one row per session under the
//! `DETAILED DATA` marker.

use chrono::{DateTime, FixedOffset, Local};

use super::{export_filename, CsvLayout, ExportDocument, ExportFormat};
use crate::format::{format_date, format_date_time, format_duration, format_timer_display};
use crate::metrics::summarize;
use crate::models::Session;
use crate::range::{filter_by_range, DateRange};

pub const EXPORT_TITLE: &str = "FLOW Data Export";
pub const SUMMARY_MARKER: &str = "SUMMARY";
pub const DETAILED_DATA_MARKER: &str = "DETAILED DATA";

/// Export the sessions inside `range`, stamped with the current local time
pub fn export_csv(sessions: &[Session], range: &DateRange) -> ExportDocument {
    export_csv_at(sessions, range, CsvLayout::Extended, &Local::now().fixed_offset())
}

/// Export the sessions inside `range` with an explicit export time
///
/// Display dates in the preamble are rendered in `exported_at`'s offset.
pub fn export_csv_at(
    sessions: &[Session],
    range: &DateRange,
    layout: CsvLayout,
    exported_at: &DateTime<FixedOffset>,
) -> ExportDocument {
    let mut filtered = filter_by_range(sessions, range);
    filtered.sort_by_key(|s| s.start_time);
    let summary = summarize(&filtered);
    let offset = exported_at.offset();

    let mut out = String::new();
    push_line(
        &mut out,
        &format!("{},{}", EXPORT_TITLE, quote_field(&format_date_time(exported_at))),
    );
    push_line(
        &mut out,
        &format!(
            "Period,{} - {}",
            format_date(&range.start.with_timezone(offset)),
            format_date(&range.end.with_timezone(offset))
        ),
    );
    push_line(&mut out, "");
    push_line(&mut out, SUMMARY_MARKER);
    push_line(&mut out, &format!("Total Sessions,{}", summary.total_sessions));
    push_line(&mut out, &format!("Total Time,{}", format_duration(summary.total_time)));
    push_line(&mut out, &format!("Unique Tasks,{}", summary.unique_tasks));
    push_line(
        &mut out,
        &format!(
            "Average Session Time,{}",
            format_duration(summary.average_session_time as u64)
        ),
    );
    push_line(
        &mut out,
        &format!("Longest Session,{}", format_duration(summary.longest_session)),
    );
    push_line(&mut out, "");
    push_line(&mut out, DETAILED_DATA_MARKER);
    push_line(&mut out, layout.header());

    for session in &filtered {
        push_line(&mut out, &session_row(session, layout));
    }

    let filename = export_filename(range, ExportFormat::Csv);
    tracing::info!("Exported {} sessions to {}", filtered.len(), filename);

    ExportDocument {
        filename,
        mime_type: ExportFormat::Csv.mime_type(),
        content: out,
    }
}

/// Render one detailed-data row; only the task name is quoted
///
/// Built with `format!` because `csv::Writer` quotes per field by content and
/// cannot always quote the task column while never quoting the others.
fn session_row(session: &Session, layout: CsvLayout) -> String {
    let task = quote_field(&session.task_name);
    let timer = format_timer_display(session.duration);

    match layout {
        CsvLayout::Extended => format!(
            "{},{},{},{},{},{}",
            session.date_string(),
            session.start_time.format("%Y-%m-%dT%H:%M:%SZ"),
            session.end_time.format("%Y-%m-%dT%H:%M:%SZ"),
            task,
            session.duration,
            timer
        ),
        CsvLayout::Legacy => format!(
            "{},{},{},{}",
            session.date_string(),
            task,
            session.duration,
            timer
        ),
    }
}

/// Wrap a field in double quotes, doubling any embedded quote
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
