//! Append-only error log
//!
//! Failed runs are recorded here with a context label. Writing the log must
//! never disturb the run itself, so every failure inside the log is
//! swallowed and only reported through `log::error!`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use chrono::{SecondsFormat, Utc};

/// Receiver for errors that ended a run
pub trait ErrorLog {
    fn record(&self, context: &str, error: &dyn std::error::Error);
}

/// Appends entries to a file, creating it and its directory on demand
///
/// Each entry looks like
/// `[2024-05-01T09:30:00.000Z] Error in Splitting PDF: plans.pdf: <message>`
/// followed by a blank line.
#[derive(Debug, Clone)]
pub struct FileErrorLog {
    path: PathBuf,
}

impl FileErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())
    }
}

impl ErrorLog for FileErrorLog {
    fn record(&self, context: &str, error: &dyn std::error::Error) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let entry = format!("[{}] Error in {}: {}\n\n", timestamp, context, error);

        if let Err(e) = self.append(&entry) {
            log::error!("Failed to log error to {}: {}", self.path.display(), e);
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullErrorLog;

impl ErrorLog for NullErrorLog {
    fn record(&self, _context: &str, _error: &dyn std::error::Error) {}
}
