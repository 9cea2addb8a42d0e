//! File-backed audit sink

use super::{AuditEntry, AuditError, AuditSink};
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `<timestamp> - <LEVEL> - <message>` lines to a file
///
/// The file is truncated when the sink is created, so each run starts a fresh log.
pub struct FileAuditSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileAuditSink {
    /// Create (or truncate) the audit file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        tracing::debug!(path = %path.display(), "Opened audit log");

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditSink {
    fn record(&mut self, entry: &AuditEntry) -> Result<(), AuditError> {
        writeln!(
            self.writer,
            "{} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            entry.level(),
            entry
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), AuditError> {
        self.writer.flush()?;
        Ok(())
    }
}
