use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::clock::TimeOfDay;
use crate::model::session::{SessionState, TaskSet};
use crate::ops::time_ops;

/// File name of the persisted session inside the state directory
pub const STATE_FILE: &str = "current.json";

/// Error type for session persistence
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize session: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Persisted session record (written to current.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub next_tasks: String,
    #[serde(default)]
    pub must_tasks: String,
    #[serde(default)]
    pub have_to_tasks: String,
    #[serde(default)]
    pub completed_tasks: String,
    #[serde(default)]
    pub last_saved: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn from_state(state: &SessionState, saved_at: DateTime<Utc>) -> Self {
        SessionRecord {
            start_time: state.start.clone(),
            end_time: state.end.clone(),
            next_tasks: state.tasks.next.clone(),
            must_tasks: state.tasks.must.clone(),
            have_to_tasks: state.tasks.have_to.clone(),
            completed_tasks: state.tasks.completed.clone(),
            last_saved: Some(saved_at),
        }
    }

    /// Rebuild a session, filling empty endpoints from the default interval
    pub fn into_state(self, now: TimeOfDay, default_duration: u32) -> SessionState {
        let fallback = SessionState::starting_at(now, default_duration);
        SessionState {
            start: non_empty_or(self.start_time, fallback.start),
            end: non_empty_or(self.end_time, fallback.end),
            tasks: TaskSet {
                completed: self.completed_tasks,
                next: self.next_tasks,
                must: self.must_tasks,
                have_to: self.have_to_tasks,
            },
            last_saved: self.last_saved,
        }
    }
}

fn non_empty_or(value: String, fallback: String) -> String {
    if value.is_empty() { fallback } else { value }
}

pub fn state_path(state_dir: &Path) -> PathBuf {
    state_dir.join(STATE_FILE)
}

/// Read current.json. None when the file is missing or unparseable.
pub fn read_record(state_dir: &Path) -> Option<SessionRecord> {
    let path = state_path(state_dir);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!(
                "event=state_load status=malformed path={} error={}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Write current.json atomically (temp file + rename)
pub fn write_record(state_dir: &Path, record: &SessionRecord) -> Result<(), StateError> {
    let path = state_path(state_dir);
    let write_err = |source| StateError::WriteError {
        path: path.clone(),
        source,
    };
    let content = serde_json::to_string_pretty(record)?;
    fs::create_dir_all(state_dir).map_err(write_err)?;
    let mut tmp = NamedTempFile::new_in(state_dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.persist(&path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Load the session, falling back to a fresh one. Never fails.
pub fn load_session(state_dir: &Path, now: TimeOfDay, default_duration: u32) -> SessionState {
    let mut state = match read_record(state_dir) {
        Some(record) => record.into_state(now, default_duration),
        None => SessionState::starting_at(now, default_duration),
    };
    crate::ops::reduce::settle_interval(&mut state);
    state
}

/// Persist the session and return it with `last_saved` updated.
///
/// Sessions with an empty endpoint are not written. Write failures are
/// logged and otherwise ignored: the in-memory state is already correct.
pub fn save_session(state_dir: &Path, state: &SessionState, now: DateTime<Utc>) -> SessionState {
    if !state.has_endpoints() {
        return state.clone();
    }
    let record = SessionRecord::from_state(state, now);
    match write_record(state_dir, &record) {
        Ok(()) => {
            log::debug!("event=state_save status=ok dir={}", state_dir.display());
            SessionState {
                last_saved: Some(now),
                ..state.clone()
            }
        }
        Err(e) => {
            log::warn!("event=state_save status=failed error={}", e);
            state.clone()
        }
    }
}

/// `HH:MM` of the last save in local time, for the status row
pub fn last_saved_display(state: &SessionState) -> Option<String> {
    let saved = state.last_saved?.with_timezone(&chrono::Local);
    Some(time_ops::to_time_of_day(&saved).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn saved_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-10-17T09:15:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn sample_state() -> SessionState {
        SessionState {
            start: "09:00".into(),
            end: "10:00".into(),
            tasks: TaskSet {
                completed: "done thing".into(),
                next: "- a\n  - b".into(),
                must: "m".into(),
                have_to: "h".into(),
            },
            last_saved: None,
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let saved = save_session(dir.path(), &sample_state(), saved_at());
        assert_eq!(saved.last_saved, Some(saved_at()));

        let loaded = load_session(dir.path(), t("12:00"), 60);
        assert_eq!(loaded, saved);
    }

    #[test]
    fn missing_file_gives_fresh_session() {
        let dir = TempDir::new().unwrap();
        let loaded = load_session(dir.path(), t("12:00"), 60);
        assert_eq!(loaded.start, "12:00");
        assert_eq!(loaded.end, "13:00");
        assert_eq!(loaded.tasks, TaskSet::default());
    }

    #[test]
    fn malformed_file_gives_fresh_session() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STATE_FILE), "not json {{{").unwrap();
        assert!(read_record(dir.path()).is_none());
        let loaded = load_session(dir.path(), t("07:30"), 30);
        assert_eq!((loaded.start.as_str(), loaded.end.as_str()), ("07:30", "08:00"));
    }

    #[test]
    fn reads_camel_case_record_with_missing_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(STATE_FILE),
            r#"{"startTime":"","nextTasks":"x","lastSaved":"2025-10-17T09:15:00.000Z"}"#,
        )
        .unwrap();
        let loaded = load_session(dir.path(), t("10:00"), 60);
        assert_eq!(loaded.start, "10:00");
        assert_eq!(loaded.end, "11:00");
        assert_eq!(loaded.tasks.next, "x");
        assert_eq!(loaded.last_saved, Some(saved_at()));
    }

    #[test]
    fn loading_applies_gap_rule() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(STATE_FILE),
            r#"{"startTime":"10:00","endTime":"09:00"}"#,
        )
        .unwrap();
        let loaded = load_session(dir.path(), t("00:00"), 60);
        assert_eq!(loaded.end, "10:30");
    }

    #[test]
    fn session_without_endpoints_is_not_written() {
        let dir = TempDir::new().unwrap();
        let mut state = sample_state();
        state.end.clear();
        let out = save_session(dir.path(), &state, saved_at());
        assert!(out.last_saved.is_none());
        assert!(!dir.path().join(STATE_FILE).exists());
    }

    #[test]
    fn write_failure_keeps_state() {
        let dir = TempDir::new().unwrap();
        // a file where the state directory should be
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, "").unwrap();
        let state = sample_state();
        let out = save_session(&blocked, &state, saved_at());
        assert_eq!(out, state);
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let record = SessionRecord::from_state(&sample_state(), saved_at());
        let json = serde_json::to_string(&record).unwrap();
        for key in ["startTime", "endTime", "nextTasks", "mustTasks", "haveToTasks", "lastSaved"] {
            assert!(json.contains(key), "missing {}", key);
        }
    }
}
