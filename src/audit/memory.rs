//! In-memory audit sink

use super::{AuditEntry, AuditError, AuditSink};

/// Keeps audit records in memory
///
/// Used when the audit file is disabled, and in tests.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Vec<AuditEntry>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Rendered messages, without timestamp or level
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&mut self, entry: &AuditEntry) -> Result<(), AuditError> {
        self.entries.push(entry.clone());
        Ok(())
    }
}
