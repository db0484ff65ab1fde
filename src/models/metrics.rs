//! Metrics data types
//!
//! Aggregated statistics over a session collection

use serde::{Deserialize, Serialize};

/// Summary statistics for a set of sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_sessions: u64,
    /// Sum of session durations in seconds
    pub total_time: u64,
    /// Number of distinct task ids
    pub unique_tasks: u64,
    /// `total_time / total_sessions`, 0 when there are no sessions
    pub average_session_time: f64,
    /// Longest single session in seconds
    pub longest_session: u64,
}

/// Time spent on a single task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTotal {
    pub task_id: String,
    /// Most recent name the task was recorded under
    pub task_name: String,
    pub sessions: u64,
    pub total_time: u64,
}
