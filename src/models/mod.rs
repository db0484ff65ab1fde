//! Data models module
//!
//! Contains the data structures shared across the engine:
//! - Task and session records
//! - Summary and per-task metrics types

pub mod metrics;
pub mod session;
pub mod task;

pub use metrics::{Summary, TaskTotal};
pub use session::{Session, SessionBuilder};
pub use task::Task;
