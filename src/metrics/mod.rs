//! Metrics calculation module
//!
//! Aggregates session collections into:
//! - Summary statistics (count, total, distinct tasks, average, longest)
//! - Per-task time totals

pub mod summary;
pub mod tasks;

pub use summary::summarize;
pub use tasks::totals_by_task;
