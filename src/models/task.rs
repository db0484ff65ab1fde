//! Task data types

use serde::{Deserialize, Serialize};

/// A named unit of work that sessions are attributed to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
}

impl Task {
    /// Create a task whose id is derived from its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: task_id_for_name(&name),
            name,
        }
    }
}

/// Synthesize a task id from a task name: `task-<slug>`
///
/// The name is lowercased and every run of non-alphanumeric characters
/// collapses to a single `-`, with leading/trailing dashes dropped.
pub fn task_id_for_name(name: &str) -> String {
    format!("task-{}", slugify(name))
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_for_name() {
        assert_eq!(task_id_for_name("Deploy Docker"), "task-deploy-docker");
        assert_eq!(task_id_for_name("CI/CD pipeline"), "task-ci-cd-pipeline");
        assert_eq!(task_id_for_name("  Tune   PostgreSQL "), "task-tune-postgresql");
        assert_eq!(task_id_for_name("Write, then \"ship\""), "task-write-then-ship");
    }

    #[test]
    fn test_task_id_is_case_insensitive() {
        assert_eq!(task_id_for_name("Refactor Code"), task_id_for_name("refactor code"));
    }

    #[test]
    fn test_task_id_keeps_non_ascii_letters() {
        assert_eq!(task_id_for_name("Überprüfung Café"), "task-überprüfung-café");
    }

    #[test]
    fn test_task_new() {
        let task = Task::new("Optimize SQL");
        assert_eq!(task.id, "task-optimize-sql");
        assert_eq!(task.name, "Optimize SQL");
    }
}
