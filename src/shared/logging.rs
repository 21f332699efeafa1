use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn intake_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/intake.log")
}

/// Append-only JSON-lines event log for intake sessions.
///
/// Writes are best-effort: a log that cannot be opened never interrupts a
/// conversation.
#[derive(Debug, Clone)]
pub struct IntakeLog {
    path: PathBuf,
}

impl IntakeLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_state_root(state_root: &Path) -> Self {
        Self::new(intake_log_path(state_root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, event: &str, message: &str) {
        self.append("info", event, message);
    }

    pub fn warn(&self, event: &str, message: &str) {
        self.append("warn", event, message);
    }

    pub fn error(&self, event: &str, message: &str) {
        self.append("error", event, message);
    }

    fn append(&self, level: &str, event: &str, message: &str) {
        let payload = serde_json::json!({
            "timestamp": chrono::Utc::now().timestamp(),
            "level": level,
            "event": event,
            "message": message,
        });

        let Ok(line) = serde_json::to_string(&payload) else {
            return;
        };

        if let Some(parent) = self.path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let Ok(mut file) = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        else {
            return;
        };
        let _ = writeln!(file, "{line}");
    }
}
