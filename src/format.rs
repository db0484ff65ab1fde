//! Time formatting helpers
//!
//! Converts durations (in seconds) and timestamps into the strings shown in
//! the timer, the history views, and the CSV export preamble.

use chrono::{DateTime, TimeZone};

/// Format a duration as a compact `H:MM` string
///
/// Hours are not zero-padded, seconds are dropped:
/// - 3661 → "1:01"
/// - 61 → "0:01"
/// - 36000 → "10:00"
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}:{:02}", hours, minutes)
}

/// Format a duration the way the running timer displays it
///
/// `MM:SS` below one hour, `H:MM:SS` from one hour up.
pub fn format_timer_display(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Format a timestamp as a display date and time, e.g. `7/1/2025, 9:05:03 AM`
///
/// Rendered in the timestamp's own zone. Display only; the importer never
/// parses this form back.
pub fn format_date_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Format a timestamp as a display date, e.g. `7/1/2025`
pub fn format_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%-m/%-d/%Y").to_string()
}
