//! Per-task time totals

use std::collections::HashMap;

use crate::models::{Session, TaskTotal};

/// Total time per task, largest first (ties ordered by name)
///
/// The reported name is the one from the most recent session of each task.
pub fn totals_by_task(sessions: &[Session]) -> Vec<TaskTotal> {
    let mut by_task: HashMap<&str, (TaskTotal, chrono::DateTime<chrono::Utc>)> = HashMap::new();

    for session in sessions {
        let (total, latest) = by_task
            .entry(session.task_id.as_str())
            .or_insert_with(|| {
                (
                    TaskTotal {
                        task_id: session.task_id.clone(),
                        task_name: session.task_name.clone(),
                        sessions: 0,
                        total_time: 0,
                    },
                    session.start_time,
                )
            });

        total.sessions += 1;
        total.total_time = total.total_time.saturating_add(session.duration);
        if session.start_time > *latest {
            *latest = session.start_time;
            total.task_name = session.task_name.clone();
        }
    }

    let mut totals: Vec<TaskTotal> = by_task.into_values().map(|(total, _)| total).collect();
    totals.sort_by(|a, b| {
        b.total_time
            .cmp(&a.total_time)
            .then_with(|| a.task_name.cmp(&b.task_name))
    });
    totals
}
