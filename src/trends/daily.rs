//! Daily trend calculations
//!
//! Aggregates sessions by the calendar day of their start time.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use super::DailyTotal;
use crate::models::Session;
use crate::range::{filter_by_range, DateRange};

/// Aggregate sessions by day, sorted by date ascending
///
/// Only days with at least one session appear.
pub fn aggregate_by_day(sessions: &[Session]) -> Vec<DailyTotal> {
    let mut daily: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();

    for session in sessions {
        daily
            .entry(session.date())
            .or_insert_with(|| DailyTotal::new(session.date_string()))
            .add_session(session.duration);
    }

    daily.into_values().collect()
}

/// Per-day totals over `range`, with every day of the range present
pub fn daily_totals(sessions: &[Session], range: &DateRange) -> Vec<DailyTotal> {
    let in_range = filter_by_range(sessions, range);
    let mut totals = aggregate_by_day(&in_range);
    fill_missing_days(&mut totals, range.start.date_naive(), range.end.date_naive());
    totals
}

/// Fill in missing days with zero values
fn fill_missing_days(totals: &mut Vec<DailyTotal>, start: NaiveDate, end: NaiveDate) {
    let existing: HashSet<String> = totals.iter().map(|t| t.date.clone()).collect();

    let mut current = start;
    while current <= end {
        let date_str = current.format("%Y-%m-%d").to_string();
        if !existing.contains(&date_str) {
            totals.push(DailyTotal::new(date_str));
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    totals.sort_by(|a, b| a.date.cmp(&b.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionBuilder;
    use chrono::{TimeZone, Utc};

    fn session(day: u32, hour: u32, duration: u64) -> Session {
        let start = Utc.with_ymd_and_hms(2025, 7, day, hour, 0, 0).unwrap();
        SessionBuilder::new("task-a".into(), "A".into(), start)
            .duration(duration)
            .build()
    }

    #[test]
    fn test_aggregate_by_day() {
        let sessions = vec![session(3, 9, 600), session(1, 9, 300), session(3, 15, 900)];

        let daily = aggregate_by_day(&sessions);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, "2025-07-01");
        assert_eq!(daily[0].total_time, 300);
        assert_eq!(daily[1].date, "2025-07-03");
        assert_eq!(daily[1].sessions, 2);
        assert_eq!(daily[1].total_time, 1500);
    }

    #[test]
    fn test_daily_totals_fills_gaps() {
        let sessions = vec![session(1, 9, 600), session(4, 9, 300)];
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 7, 5, 23, 59, 59).unwrap(),
        );

        let daily = daily_totals(&sessions, &range);

        let dates: Vec<&str> = daily.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2025-07-01", "2025-07-02", "2025-07-03", "2025-07-04", "2025-07-05"]
        );
        assert_eq!(daily[1].sessions, 0);
        assert_eq!(daily[3].total_time, 300);
    }

    #[test]
    fn test_daily_totals_excludes_out_of_range() {
        let sessions = vec![session(1, 9, 600), session(10, 9, 300)];
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 7, 2, 0, 0, 0).unwrap(),
        );

        let daily = daily_totals(&sessions, &range);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily.iter().map(|d| d.total_time).sum::<u64>(), 600);
    }

    #[test]
    fn test_aggregate_by_day_empty() {
        assert!(aggregate_by_day(&[]).is_empty());
    }
}
