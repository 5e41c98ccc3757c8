//! JSONL file writer for debate events.
//!
//! Each non-delta [`DebateEvent`] is serialized as one JSON line carrying its
//! `type` tag and a `timestamp`, appended through a buffered writer.

use committee_application::DebateObserver;
use committee_domain::DebateEvent;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL debate log, one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLog {
    /// Create a log at `path`, creating parent directories as needed.
    ///
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: &DebateEvent) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(event).ok()?;
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        if let serde_json::Value::Object(map) = &mut value {
            map.insert("timestamp".to_string(), serde_json::Value::String(timestamp));
        }
        Some(value)
    }
}

impl DebateObserver for JsonlEventLog {
    fn on_event(&self, event: &DebateEvent) {
        // Deltas are reassembled in statement_complete
        if matches!(event, DebateEvent::StatementDelta { .. }) {
            return;
        }
        let Some(line) = Self::record(event).and_then(|r| serde_json::to_string(&r).ok()) else {
            return;
        };

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Failed to write event log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlEventLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use committee_domain::{
        DebateStatus, ModelSelector, Participant, ParticipantSpec, Role, Statement,
    };

    fn statement() -> Statement {
        let member = Participant::from_spec(ParticipantSpec::new(
            "Member A",
            ModelSelector::default(),
            Role::Proponent,
        ));
        Statement::new(&member, 1).finalize("We should adopt it.")
    }

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event_without_deltas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("debate.jsonl");
        let log = JsonlEventLog::new(&path).unwrap();

        log.on_event(&DebateEvent::RoundStarted { round: 1 });
        log.on_event(&DebateEvent::delta(&statement(), "We "));
        log.on_event(&DebateEvent::StatementComplete {
            statement: statement(),
        });
        log.on_event(&DebateEvent::StatusChanged {
            status: DebateStatus::Concluding,
        });
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.get("timestamp").is_some()));
        assert_eq!(lines[0]["type"], "round_started");
        assert_eq!(lines[0]["round"], 1);
        assert_eq!(lines[1]["type"], "statement_complete");
        assert_eq!(lines[1]["statement"]["content"], "We should adopt it.");
        assert_eq!(lines[2]["status"], "arbiter_concluding");
    }

    #[test]
    fn test_new_fails_for_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlEventLog::new(dir.path()).is_none());
    }

    #[test]
    fn test_usable_as_shared_observer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.jsonl");
        let log: std::sync::Arc<dyn DebateObserver> =
            std::sync::Arc::new(JsonlEventLog::new(&path).unwrap());
        log.on_event(&DebateEvent::RoundEnded { round: 2 });
        drop(log);
        assert_eq!(read_lines(&path)[0]["type"], "round_ended");
    }
}
