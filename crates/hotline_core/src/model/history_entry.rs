//! Call-history entry model.
//!
//! # Responsibility
//! - Define the record produced as a side effect of a successful call.
//! - Capture the call instant as Unix epoch milliseconds.
//!
//! # Invariants
//! - Entries are created only by the history log and never mutated.
//! - `id` is stable across persistence round-trips.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of one history entry.
pub type HistoryEntryId = Uuid;

/// Input for recording one call; the timestamp is captured by the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub service_name: String,
    pub phone_number: String,
}

impl CallRequest {
    pub fn new(service_name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    pub service_name: String,
    pub phone_number: String,
    /// Unix epoch milliseconds at capture time.
    pub timestamp: i64,
}

/// Invalid entry shape, raised when reading back or writing persisted rows.
///
/// Name and number are free text: any value a call accepts is storable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntryValidationError {
    NegativeTimestamp { id: HistoryEntryId, timestamp: i64 },
}

impl Display for HistoryEntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeTimestamp { id, timestamp } => {
                write!(f, "history entry {id} has negative timestamp {timestamp}")
            }
        }
    }
}

impl Error for HistoryEntryValidationError {}

impl HistoryEntry {
    /// Creates an entry with a fresh id at the given instant.
    pub fn new(request: CallRequest, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_name: request.service_name,
            phone_number: request.phone_number,
            timestamp,
        }
    }

    pub fn validate(&self) -> Result<(), HistoryEntryValidationError> {
        if self.timestamp < 0 {
            return Err(HistoryEntryValidationError::NegativeTimestamp {
                id: self.id,
                timestamp: self.timestamp,
            });
        }
        Ok(())
    }
}

/// Current wall-clock instant in Unix epoch milliseconds.
///
/// Clocks set before the epoch collapse to `0`.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{now_epoch_ms, CallRequest, HistoryEntry, HistoryEntryValidationError};

    #[test]
    fn new_entries_get_distinct_ids() {
        let first = HistoryEntry::new(CallRequest::new("Police", "999"), 1);
        let second = HistoryEntry::new(CallRequest::new("Police", "999"), 1);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn validate_rejects_only_negative_time() {
        let mut entry = HistoryEntry::new(CallRequest::new("Police", "999"), 10);
        entry.validate().unwrap();

        entry.timestamp = -1;
        assert!(matches!(
            entry.validate(),
            Err(HistoryEntryValidationError::NegativeTimestamp { .. })
        ));

        let blank = HistoryEntry::new(CallRequest::new(" ", ""), 10);
        blank.validate().unwrap();
    }

    #[test]
    fn clock_is_after_epoch() {
        assert!(now_epoch_ms() > 0);
    }
}
