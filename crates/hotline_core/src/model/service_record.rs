//! Service catalog record.
//!
//! # Responsibility
//! - Describe one directory entry (hotline) as supplied by the catalog.
//! - Validate record shape before it enters a catalog.
//!
//! # Invariants
//! - `id` is lowercase ascii and unique within one catalog.
//! - `number` is digits, optionally grouped with single `-` separators.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static SERVICE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid service id regex"));
static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(-[0-9]+)*$").expect("valid phone number regex"));

/// Stable catalog identity of a service.
pub type ServiceId = String;

/// One immutable directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: ServiceId,
    /// Full display name, also written into call history.
    pub name: String,
    /// Compact label used on small surfaces.
    pub short_name: String,
    /// Dialable number, e.g. `999` or `1994-999999`.
    pub number: String,
    pub category: String,
    /// Opaque reference resolved by the presentation layer.
    pub icon_ref: String,
    /// Opaque reference resolved by the presentation layer.
    pub color_ref: String,
}

/// Shape violations detected by [`ServiceRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRecordValidationError {
    InvalidId(String),
    EmptyName { id: ServiceId },
    InvalidNumber { id: ServiceId, number: String },
}

impl Display for ServiceRecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "service id is invalid: `{value}`"),
            Self::EmptyName { id } => write!(f, "service `{id}` has an empty name"),
            Self::InvalidNumber { id, number } => {
                write!(f, "service `{id}` has an invalid number `{number}`")
            }
        }
    }
}

impl Error for ServiceRecordValidationError {}

impl ServiceRecord {
    /// Checks id, name and number shape.
    ///
    /// Presentation refs (`icon_ref`, `color_ref`) and `category` are opaque
    /// to core and accepted as-is.
    pub fn validate(&self) -> Result<(), ServiceRecordValidationError> {
        if !SERVICE_ID_RE.is_match(&self.id) {
            return Err(ServiceRecordValidationError::InvalidId(self.id.clone()));
        }
        if self.name.trim().is_empty() {
            return Err(ServiceRecordValidationError::EmptyName {
                id: self.id.clone(),
            });
        }
        if !PHONE_NUMBER_RE.is_match(&self.number) {
            return Err(ServiceRecordValidationError::InvalidNumber {
                id: self.id.clone(),
                number: self.number.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ServiceRecord, ServiceRecordValidationError};

    fn record(id: &str, name: &str, number: &str) -> ServiceRecord {
        ServiceRecord {
            id: id.to_string(),
            name: name.to_string(),
            short_name: name.to_string(),
            number: number.to_string(),
            category: "All".to_string(),
            icon_ref: "assets/emergency.png".to_string(),
            color_ref: "red".to_string(),
        }
    }

    #[test]
    fn accepts_plain_and_grouped_numbers() {
        record("police", "Police", "999").validate().unwrap();
        record("ambulance", "Ambulance", "1994-999999")
            .validate()
            .unwrap();
    }

    #[test]
    fn rejects_uppercase_or_empty_id() {
        let err = record("Police", "Police", "999").validate().unwrap_err();
        assert_eq!(err, ServiceRecordValidationError::InvalidId("Police".into()));
        assert!(record("", "Police", "999").validate().is_err());
    }

    #[test]
    fn rejects_blank_name_and_malformed_number() {
        assert!(matches!(
            record("police", "   ", "999").validate(),
            Err(ServiceRecordValidationError::EmptyName { .. })
        ));
        assert!(matches!(
            record("police", "Police", "99--9").validate(),
            Err(ServiceRecordValidationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            record("police", "Police", "+880 999").validate(),
            Err(ServiceRecordValidationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(record("brac", "Brac Helpline", "16445")).unwrap();
        assert_eq!(json["shortName"], "Brac Helpline");
        assert_eq!(json["iconRef"], "assets/emergency.png");
        assert_eq!(json["colorRef"], "red");
    }
}
