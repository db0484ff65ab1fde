//! Date range filtering
//!
//! Inclusive timestamp intervals and the named presets offered in the
//! history view (today, yesterday, last week, ...).

pub mod presets;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Session;

pub use presets::{preset_ranges, PresetRange, PresetRanges};

/// Inclusive interval between two timestamps
///
/// `start <= end` is the caller's responsibility; an inverted range simply
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `timestamp` lies within the range, both ends included
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        *timestamp >= self.start && *timestamp <= self.end
    }

    /// Range start as `YYYY-MM-DD`
    pub fn start_date_string(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Range end as `YYYY-MM-DD`
    pub fn end_date_string(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Select sessions whose start time falls inside `range`
pub fn filter_by_range(sessions: &[Session], range: &DateRange) -> Vec<Session> {
    sessions
        .iter()
        .filter(|s| range.contains(&s.start_time))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionBuilder;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, day, hour, 0, 0).unwrap()
    }

    fn session_at(start: DateTime<Utc>) -> Session {
        SessionBuilder::new("task-a".into(), "A".into(), start)
            .duration(600)
            .build()
    }

    #[test]
    fn test_filter_includes_both_bounds() {
        let range = DateRange::new(at(1, 0), at(3, 0));
        let sessions = vec![
            session_at(at(1, 0)),
            session_at(at(2, 12)),
            session_at(at(3, 0)),
            session_at(at(3, 0) + Duration::milliseconds(1)),
            session_at(at(1, 0) - Duration::milliseconds(1)),
        ];

        let filtered = filter_by_range(&sessions, &range);

        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].start_time, at(1, 0));
        assert_eq!(filtered[2].start_time, at(3, 0));
    }

    #[test]
    fn test_filter_empty_input() {
        let range = DateRange::new(at(1, 0), at(3, 0));
        assert!(filter_by_range(&[], &range).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let range = DateRange::new(at(2, 0), at(4, 0));
        let sessions: Vec<Session> = (1..=6).map(|d| session_at(at(d, 9))).collect();

        let once = filter_by_range(&sessions, &range);
        let twice = filter_by_range(&once, &range);

        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = DateRange::new(at(4, 0), at(2, 0));
        let sessions = vec![session_at(at(3, 0))];
        assert!(filter_by_range(&sessions, &range).is_empty());
    }

    #[test]
    fn test_filter_uses_start_time_only() {
        // Session starts before the range and ends inside it
        let range = DateRange::new(at(2, 0), at(2, 23));
        let sessions = vec![SessionBuilder::new("t".into(), "T".into(), at(1, 23))
            .duration(7200)
            .build()];

        assert!(filter_by_range(&sessions, &range).is_empty());
    }

    #[test]
    fn test_date_strings() {
        let range = DateRange::new(at(1, 5), at(10, 23));
        assert_eq!(range.start_date_string(), "2025-07-01");
        assert_eq!(range.end_date_string(), "2025-07-10");
    }
}
