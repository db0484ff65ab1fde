//! Trend analysis module
//!
//! Per-day totals of recorded work, used by the history charts.

pub mod daily;

use serde::{Deserialize, Serialize};

pub use daily::{aggregate_by_day, daily_totals};

/// Represents a single day's aggregated work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// Number of sessions started on this day
    pub sessions: u32,
    /// Total recorded seconds
    pub total_time: u64,
}

impl DailyTotal {
    /// Create a new empty DailyTotal for a given date
    pub fn new(date: String) -> Self {
        Self {
            date,
            sessions: 0,
            total_time: 0,
        }
    }

    /// Add one session's duration to this day
    pub fn add_session(&mut self, duration: u64) {
        self.sessions += 1;
        self.total_time = self.total_time.saturating_add(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_total_new() {
        let total = DailyTotal::new("2025-07-01".to_string());
        assert_eq!(total.date, "2025-07-01");
        assert_eq!(total.sessions, 0);
        assert_eq!(total.total_time, 0);
    }

    #[test]
    fn test_daily_total_add_session() {
        let mut total = DailyTotal::new("2025-07-01".to_string());
        total.add_session(600);
        total.add_session(1200);

        assert_eq!(total.sessions, 2);
        assert_eq!(total.total_time, 1800);
    }

    #[test]
    fn test_daily_total_serialization() {
        let mut total = DailyTotal::new("2025-07-01".to_string());
        total.add_session(90);

        let json = serde_json::to_string(&total).unwrap();
        assert!(json.contains("\"date\":\"2025-07-01\""));
        assert!(json.contains("\"sessions\":1"));
        assert!(json.contains("\"totalTime\":90"));
    }
}
