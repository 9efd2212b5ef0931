use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Append-only JSON-lines event log. Write failures are swallowed so logging never
/// changes the outcome of a wizard operation.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, event: &str, message: &str, fields: Value) {
        self.append(LogLevel::Info, event, message, fields);
    }

    pub fn warn(&self, event: &str, message: &str, fields: Value) {
        self.append(LogLevel::Warn, event, message, fields);
    }

    pub fn error(&self, event: &str, message: &str, fields: Value) {
        self.append(LogLevel::Error, event, message, fields);
    }

    pub fn append(&self, level: LogLevel, event: &str, message: &str, fields: Value) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        let payload = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "level": level.as_str(),
            "event": event,
            "message": message,
            "fields": fields,
        });
        let Ok(line) = serde_json::to_string(&payload) else {
            return;
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };
        let _ = writeln!(file, "{line}");
    }
}
