//! Append-only workflow event log.
//!
//! An audit trail of workflow milestones, kept strictly out of the control
//! path: nothing in the orchestrator reads it back to make a decision. The
//! only mutators are [`EventLog::append`] (and its severity helpers) and
//! [`EventLog::clear`], the latter invoked solely from `reset()` and the
//! start of a new run.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Severity of a log entry, mirroring the presentation classes of the
/// terminal-style display: plain line, highlighted success, error, and
/// dimmed detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
    Trace,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// One recorded milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntry {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

/// Thread-safe, insertion-ordered event log.
///
/// Entries are only ever appended; `entries()` returns a snapshot in
/// insertion order. Interior mutability keeps the call sites free of
/// `&mut` plumbing across the orchestrator's suspension points.
#[derive(Default)]
pub struct EventLog {
    entries: Mutex<Vec<EventEntry>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry. The sole mutator besides [`clear`](Self::clear).
    pub fn append(&self, severity: Severity, message: impl Into<String>) {
        self.entries.lock().push(EventEntry {
            timestamp: Utc::now(),
            severity,
            message: message.into(),
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.append(Severity::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.append(Severity::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.append(Severity::Error, message);
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.append(Severity::Trace, message);
    }

    /// Snapshot of all entries in insertion order.
    pub fn entries(&self) -> Vec<EventEntry> {
        self.entries.lock().clone()
    }

    /// Remove every entry. Only `reset()` and a new `start()` call this.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Index of the first entry whose message contains `needle`, if any.
    ///
    /// Ordering assertions in tests are phrased in terms of this.
    pub fn position_of(&self, needle: &str) -> Option<usize> {
        self.entries
            .lock()
            .iter()
            .position(|e| e.message.contains(needle))
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_preserve_insertion_order() {
        let log = EventLog::new();
        log.info("first");
        log.success("second");
        log.error("third");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
        assert_eq!(entries[2].message, "third");
    }

    #[test]
    fn severity_helpers_tag_entries() {
        let log = EventLog::new();
        log.info("a");
        log.success("b");
        log.error("c");
        log.trace("d");

        let severities: Vec<Severity> = log.entries().iter().map(|e| e.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Info,
                Severity::Success,
                Severity::Error,
                Severity::Trace
            ]
        );
    }

    #[test]
    fn clear_empties_the_log() {
        let log = EventLog::new();
        log.info("something");
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn position_of_finds_first_match() {
        let log = EventLog::new();
        log.info("proof generated in 42ms");
        log.info("pairing check passed");
        assert_eq!(log.position_of("proof generated"), Some(0));
        assert_eq!(log.position_of("pairing check"), Some(1));
        assert_eq!(log.position_of("missing"), None);
    }

    #[test]
    fn timestamps_are_monotone_non_decreasing() {
        let log = EventLog::new();
        for i in 0..5 {
            log.info(format!("entry {i}"));
        }
        let entries = log.entries();
        for pair in entries.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn entry_serde_roundtrip() {
        let log = EventLog::new();
        log.success("proof generated in 7ms");
        let entry = &log.entries()[0];
        let json = serde_json::to_string(entry).unwrap();
        let back: EventEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.message, entry.message);
        assert_eq!(back.severity, Severity::Success);
    }
}
