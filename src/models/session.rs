//! Session data types
//!
//! A session is one completed interval of work recorded against a task.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One recorded unit of work
///
/// `start_time` is the canonical timestamp: filtering, sorting, and the
/// calendar day all derive from it. The serialized form also carries a
/// `date` string for hosts that group by day; it is ignored when reading.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// Weak reference; the task may since have been deleted
    pub task_id: String,
    /// Task name at the time the session was recorded
    pub task_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Duration in whole seconds
    pub duration: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord<'a> {
    id: &'a str,
    task_id: &'a str,
    task_name: &'a str,
    start_time: &'a DateTime<Utc>,
    end_time: &'a DateTime<Utc>,
    duration: u64,
    date: String,
}

impl Serialize for Session {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SessionRecord {
            id: &self.id,
            task_id: &self.task_id,
            task_name: &self.task_name,
            start_time: &self.start_time,
            end_time: &self.end_time,
            duration: self.duration,
            date: self.date_string(),
        }
        .serialize(serializer)
    }
}

impl Session {
    /// Calendar day (UTC) of the session start
    pub fn date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Calendar day as `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }
}

/// Generate a collision-resistant session id: `<unix-millis>-<random>`
pub fn generate_session_id(now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}-{}", now.timestamp_millis(), suffix)
}

/// Whole seconds between two timestamps, rounded, clamped at zero
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        ((millis + 500) / 1000) as u64
    }
}

/// `start + seconds`, saturating at `start` when the offset is out of range
pub fn add_seconds(start: DateTime<Utc>, seconds: u64) -> DateTime<Utc> {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|offset| start.checked_add_signed(offset))
        .unwrap_or(start)
}

/// Builder for creating session records
pub struct SessionBuilder {
    id: Option<String>,
    task_id: String,
    task_name: String,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    duration: Option<u64>,
}

impl SessionBuilder {
    /// Create a new session builder
    pub fn new(task_id: String, task_name: String, start_time: DateTime<Utc>) -> Self {
        Self {
            id: None,
            task_id,
            task_name,
            start_time,
            end_time: None,
            duration: None,
        }
    }

    /// Start a session for an existing task
    pub fn for_task(task: &super::task::Task, start_time: DateTime<Utc>) -> Self {
        Self::new(task.id.clone(), task.name.clone(), start_time)
    }

    /// Set an explicit id instead of generating one
    pub fn id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Set end time
    pub fn ended_at(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Set an authoritative duration in seconds
    pub fn duration(mut self, seconds: u64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Build the session
    ///
    /// A missing end is derived as `start + duration`; a missing duration as
    /// the rounded distance from start to end.
    pub fn build(self) -> Session {
        let start_time = self.start_time;
        let (end_time, duration) = match (self.end_time, self.duration) {
            (Some(end), Some(duration)) => (end, duration),
            (Some(end), None) => (end, seconds_between(start_time, end)),
            (None, Some(duration)) => (add_seconds(start_time, duration), duration),
            (None, None) => (start_time, 0),
        };

        Session {
            id: self
                .id
                .unwrap_or_else(|| generate_session_id(Utc::now())),
            task_id: self.task_id,
            task_name: self.task_name,
            start_time,
            end_time,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_build_derives_duration_from_end() {
        let session = SessionBuilder::new("task-a".into(), "A".into(), start())
            .ended_at(start() + Duration::milliseconds(90_600))
            .build();

        assert_eq!(session.duration, 91);
        assert_eq!(session.end_time, start() + Duration::milliseconds(90_600));
    }

    #[test]
    fn test_build_derives_end_from_duration() {
        let session = SessionBuilder::new("task-a".into(), "A".into(), start())
            .duration(1500)
            .build();

        assert_eq!(session.end_time, start() + Duration::seconds(1500));
        assert_eq!(session.duration, 1500);
    }

    #[test]
    fn test_build_keeps_disagreeing_duration() {
        let session = SessionBuilder::new("task-a".into(), "A".into(), start())
            .ended_at(start() + Duration::seconds(60))
            .duration(90)
            .build();

        assert_eq!(session.duration, 90);
        assert_eq!(session.end_time, start() + Duration::seconds(60));
    }

    #[test]
    fn test_date_derives_from_start_time() {
        let late = Utc.with_ymd_and_hms(2025, 7, 1, 23, 59, 59).unwrap();
        let session = SessionBuilder::new("t".into(), "T".into(), late)
            .duration(3600)
            .build();

        assert_eq!(session.date_string(), "2025-07-01");
    }

    #[test]
    fn test_generate_session_id_shape() {
        let id = generate_session_id(start());
        let (millis, suffix) = id.split_once('-').unwrap();

        assert_eq!(millis, start().timestamp_millis().to_string());
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = generate_session_id(start());
        let b = generate_session_id(start());
        assert_ne!(a, b);
    }

    #[test]
    fn test_seconds_between_clamps_negative() {
        assert_eq!(seconds_between(start(), start() - Duration::seconds(5)), 0);
    }

    #[test]
    fn test_session_serialization_uses_camel_case() {
        let session = SessionBuilder::new("task-a".into(), "A".into(), start())
            .id("s-1".into())
            .duration(60)
            .build();

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["taskId"], "task-a");
        assert_eq!(json["taskName"], "A");
        assert_eq!(json["duration"], 60);
        assert_eq!(json["date"], "2025-07-01");
        assert!(json["startTime"].as_str().unwrap().starts_with("2025-07-01T09:00:00"));
    }

    #[test]
    fn test_session_deserialization_ignores_stored_date() {
        let json = r#"{
            "id": "s-1",
            "taskId": "task-a",
            "taskName": "A",
            "startTime": "2025-07-01T09:00:00Z",
            "endTime": "2025-07-01T09:01:00Z",
            "duration": 60,
            "date": "1999-01-01"
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.date_string(), "2025-07-01");
        assert_eq!(session.duration, 60);
    }
}
