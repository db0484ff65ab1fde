//! Session history against the host's store
//!
//! Sessions and the task history live as JSON arrays under fixed keys. Every
//! operation here is a whole-value read-modify-write; nothing coordinates
//! concurrent writers.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Session, Task};
use crate::storage::{KeyValueStore, StorageError, SESSIONS_KEY, TASK_HISTORY_KEY};
use crate::HistoryError;

fn load_list<T, S>(store: &S, key: &str) -> Result<Vec<T>, HistoryError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw).map_err(StorageError::from)?),
        None => Ok(Vec::new()),
    }
}

fn save_list<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), HistoryError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items).map_err(StorageError::from)?;
    store.set(key, &raw)?;
    Ok(())
}

/// Load all recorded sessions; an absent key is an empty history
pub fn load_sessions<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<Session>, HistoryError> {
    load_list(store, SESSIONS_KEY)
}

/// Replace the stored sessions
pub fn save_sessions<S: KeyValueStore + ?Sized>(
    store: &S,
    sessions: &[Session],
) -> Result<(), HistoryError> {
    save_list(store, SESSIONS_KEY, sessions)
}

/// Append sessions whose id is not stored yet, returning how many were added
pub fn append_sessions<S: KeyValueStore + ?Sized>(
    store: &S,
    new_sessions: &[Session],
) -> Result<usize, HistoryError> {
    let mut sessions = load_sessions(store)?;
    let mut known: HashSet<String> = sessions.iter().map(|s| s.id.clone()).collect();

    let before = sessions.len();
    for session in new_sessions {
        if known.insert(session.id.clone()) {
            sessions.push(session.clone());
        }
    }

    let added = sessions.len() - before;
    if added > 0 {
        save_sessions(store, &sessions)?;
    }
    if added < new_sessions.len() {
        tracing::debug!(
            "Skipped {} sessions with ids already in history",
            new_sessions.len() - added
        );
    }

    Ok(added)
}

/// Record one finished session and remember its task
///
/// Returns `false` when a session with the same id was already stored.
pub fn record_session<S: KeyValueStore + ?Sized>(
    store: &S,
    session: &Session,
) -> Result<bool, HistoryError> {
    let added = append_sessions(store, std::slice::from_ref(session))? == 1;

    let mut tasks = load_task_history(store)?;
    if !tasks.iter().any(|t| t.id == session.task_id) {
        tasks.push(Task {
            id: session.task_id.clone(),
            name: session.task_name.clone(),
        });
        save_task_history(store, &tasks)?;
    }

    Ok(added)
}

/// Load the tasks that have had sessions recorded
pub fn load_task_history<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<Task>, HistoryError> {
    load_list(store, TASK_HISTORY_KEY)
}

pub fn save_task_history<S: KeyValueStore + ?Sized>(
    store: &S,
    tasks: &[Task],
) -> Result<(), HistoryError> {
    save_list(store, TASK_HISTORY_KEY, tasks)
}

/// Permanently delete all sessions and the task history
///
/// The task list and settings are kept. Callers must have the user's
/// confirmation before calling this.
pub fn erase_all<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), HistoryError> {
    store.delete_many(&[SESSIONS_KEY, TASK_HISTORY_KEY])?;
    tracing::info!("Erased all session history");
    Ok(())
}
