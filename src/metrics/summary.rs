//! Session summary aggregation
//!
//! Single-pass statistics over a session collection.

use std::collections::HashSet;

use crate::models::{Session, Summary};

/// Summarize a set of sessions
///
/// Defined for the empty collection: every field is zero.
pub fn summarize(sessions: &[Session]) -> Summary {
    let mut total_time: u64 = 0;
    let mut longest_session: u64 = 0;
    let mut tasks: HashSet<&str> = HashSet::new();

    for session in sessions {
        total_time = total_time.saturating_add(session.duration);
        longest_session = longest_session.max(session.duration);
        tasks.insert(session.task_id.as_str());
    }

    let total_sessions = sessions.len() as u64;
    let average_session_time = if total_sessions > 0 {
        total_time as f64 / total_sessions as f64
    } else {
        0.0
    };

    Summary {
        total_sessions,
        total_time,
        unique_tasks: tasks.len() as u64,
        average_session_time,
        longest_session,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionBuilder;
    use chrono::{TimeZone, Utc};

    fn session(task: &str, duration: u64) -> Session {
        let start = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
        SessionBuilder::new(format!("task-{}", task), task.to_string(), start)
            .duration(duration)
            .build()
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);

        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.total_time, 0);
        assert_eq!(summary.unique_tasks, 0);
        assert_eq!(summary.average_session_time, 0.0);
        assert_eq!(summary.longest_session, 0);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_summarize_totals() {
        let sessions = vec![session("a", 600), session("b", 1800), session("a", 300)];
        let summary = summarize(&sessions);

        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.total_time, 2700);
        assert_eq!(summary.unique_tasks, 2);
        assert_eq!(summary.longest_session, 1800);
        assert!((summary.average_session_time - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_total_matches_sum_and_max() {
        let durations = [17u64, 3601, 0, 45, 999];
        let sessions: Vec<Session> = durations
            .iter()
            .enumerate()
            .map(|(i, d)| session(&format!("t{}", i % 2), *d))
            .collect();
        let summary = summarize(&sessions);

        assert_eq!(summary.total_time, durations.iter().sum::<u64>());
        assert_eq!(summary.longest_session, *durations.iter().max().unwrap());
    }

    #[test]
    fn test_summary_serialization() {
        let summary = summarize(&[session("a", 120)]);
        let json = serde_json::to_string(&summary).unwrap();

        assert!(json.contains("\"totalSessions\":1"));
        assert!(json.contains("\"totalTime\":120"));
        assert!(json.contains("\"uniqueTasks\":1"));
        assert!(json.contains("\"longestSession\":120"));
    }
}
