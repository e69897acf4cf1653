//! Read-only service catalog.
//!
//! # Responsibility
//! - Hold the ordered list of service records supplied at startup.
//! - Reject malformed records and duplicate identities up front.
//!
//! # Invariants
//! - Record order is preserved exactly as supplied.
//! - Every `id` appears at most once.
//! - The catalog is never mutated after construction.

mod builtin;

use crate::model::service_record::{ServiceRecord, ServiceRecordValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog construction errors.
#[derive(Debug)]
pub enum CatalogError {
    InvalidRecord(ServiceRecordValidationError),
    DuplicateId(String),
    Parse(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRecord(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate service id in catalog: {id}"),
            Self::Parse(err) => write!(f, "catalog json is malformed: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRecord(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<ServiceRecordValidationError> for CatalogError {
    fn from(value: ServiceRecordValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Immutable, ordered set of service records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ServiceRecord>,
}

impl Catalog {
    /// Builds a catalog after validating every record.
    pub fn new(records: Vec<ServiceRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Parses a JSON array of camelCase records.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let records: Vec<ServiceRecord> = serde_json::from_str(text)?;
        Self::new(records)
    }

    /// Built-in national hotline directory.
    pub fn builtin() -> Self {
        Self {
            records: builtin::records(),
        }
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ServiceRecord> {
        self.records.iter().find(|record| record.id == id.trim())
    }

    /// Returns records whose category matches case-insensitively, in catalog order.
    pub fn by_category(&self, category: &str) -> Vec<&ServiceRecord> {
        let wanted = category.trim();
        self.records
            .iter()
            .filter(|record| record.category.eq_ignore_ascii_case(wanted))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
