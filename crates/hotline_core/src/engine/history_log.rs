//! Bounded, most-recent-first call history.
//!
//! # Responsibility
//! - Record successful calls with a capture-time timestamp.
//! - Evict the oldest entries once capacity is exceeded.
//! - Hand out snapshots that later mutations cannot invalidate.
//!
//! # Invariants
//! - Index 0 is the newest entry; the tail is the oldest.
//! - `len() <= capacity()` after every operation.
//! - Eviction only drops from the tail and never reorders survivors.

use crate::model::history_entry::{now_epoch_ms, CallRequest, HistoryEntry};
use std::collections::VecDeque;

/// Maximum number of retained calls.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Result of [`CallHistoryLog::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The log held `removed` entries and is now empty.
    Cleared { removed: usize },
    /// The log was already empty; nothing changed.
    NothingToClear,
}

impl ClearOutcome {
    pub fn cleared(self) -> bool {
        matches!(self, Self::Cleared { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for CallHistoryLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CallHistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log; a zero capacity is raised to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records a call at the current instant.
    pub fn record(&mut self, request: CallRequest) -> HistoryEntry {
        self.record_at(request, now_epoch_ms())
    }

    /// Records a call at an explicit instant.
    pub fn record_at(&mut self, request: CallRequest, timestamp: i64) -> HistoryEntry {
        let entry = HistoryEntry::new(request, timestamp);
        self.entries.push_front(entry.clone());
        self.entries.truncate(self.capacity);
        entry
    }

    /// Replaces the log with previously persisted entries (most-recent-first).
    ///
    /// Entries beyond capacity are dropped from the tail; returns how many.
    pub fn restore(&mut self, entries: Vec<HistoryEntry>) -> usize {
        let dropped = entries.len().saturating_sub(self.capacity);
        self.entries = entries.into_iter().take(self.capacity).collect();
        dropped
    }

    /// Owned snapshot, newest first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) -> ClearOutcome {
        if self.entries.is_empty() {
            return ClearOutcome::NothingToClear;
        }
        let removed = self.entries.len();
        self.entries.clear();
        ClearOutcome::Cleared { removed }
    }
}

#[cfg(test)]
mod tests {
    use super::{CallHistoryLog, ClearOutcome, DEFAULT_HISTORY_CAPACITY};
    use crate::model::history_entry::CallRequest;

    fn request(n: usize) -> CallRequest {
        CallRequest::new(format!("Service {n}"), format!("{n}"))
    }

    #[test]
    fn newest_entry_is_first() {
        let mut log = CallHistoryLog::new();
        log.record_at(request(1), 100);
        log.record_at(request(2), 200);

        let names: Vec<_> = log.list().into_iter().map(|e| e.service_name).collect();
        assert_eq!(names, vec!["Service 2", "Service 1"]);
        assert_eq!(log.latest().map(|e| e.timestamp), Some(200));
    }

    #[test]
    fn recording_at_capacity_evicts_exactly_one() {
        let mut log = CallHistoryLog::new();
        for n in 1..=DEFAULT_HISTORY_CAPACITY {
            log.record_at(request(n), n as i64);
        }
        assert_eq!(log.len(), 10);

        log.record_at(request(11), 11);

        let list = log.list();
        assert_eq!(list.len(), 10);
        assert_eq!(list[0].service_name, "Service 11");
        assert_eq!(list[9].service_name, "Service 2");
        assert!(list.iter().all(|e| e.service_name != "Service 1"));
    }

    #[test]
    fn snapshot_is_not_affected_by_later_mutation() {
        let mut log = CallHistoryLog::new();
        log.record_at(request(1), 1);
        let snapshot = log.list();

        log.record_at(request(2), 2);
        log.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].service_name, "Service 1");
    }

    #[test]
    fn clear_distinguishes_empty_from_cleared() {
        let mut log = CallHistoryLog::new();
        assert_eq!(log.clear(), ClearOutcome::NothingToClear);
        assert!(!log.clear().cleared());

        log.record(request(1));
        log.record(request(2));
        let outcome = log.clear();
        assert_eq!(outcome, ClearOutcome::Cleared { removed: 2 });
        assert!(outcome.cleared());
        assert!(log.is_empty());
    }

    #[test]
    fn restore_truncates_tail_beyond_capacity() {
        let mut source = CallHistoryLog::with_capacity(20);
        for n in 1..=12 {
            source.record_at(request(n), n as i64);
        }

        let mut log = CallHistoryLog::new();
        let dropped = log.restore(source.list());

        assert_eq!(dropped, 2);
        assert_eq!(log.len(), 10);
        assert_eq!(log.list()[0].service_name, "Service 12");
        assert_eq!(log.list()[9].service_name, "Service 3");
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut log = CallHistoryLog::with_capacity(0);
        log.record(request(1));
        log.record(request(2));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.list()[0].service_name, "Service 2");
    }
}
