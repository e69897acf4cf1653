//! Engine tuning and storage location resolution.
//!
//! # Responsibility
//! - Carry the economy and history constants as a validated value.
//! - Resolve the local history database path for host surfaces.
//!
//! # Invariants
//! - A validated config always has `call_cost > 0` and `history_capacity >= 1`.
//! - Defaults are balance 100, call cost 20, history capacity 10.

use crate::engine::economy::{CALL_COST, DEFAULT_STARTING_BALANCE};
use crate::engine::history_log::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment variable overriding the history database location.
pub const DB_PATH_ENV: &str = "HOTLINE_DB_PATH";
/// File name used under the temp dir when no override is set.
pub const DEFAULT_DB_FILE_NAME: &str = "hotline.sqlite3";

/// Engine configuration. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub starting_balance: u32,
    pub call_cost: u32,
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            call_cost: CALL_COST,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ZeroCallCost,
    ZeroHistoryCapacity,
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCallCost => write!(f, "call_cost must be greater than zero"),
            Self::ZeroHistoryCapacity => write!(f, "history_capacity must be at least 1"),
            Self::Parse(err) => write!(f, "engine config json is malformed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.call_cost == 0 {
            return Err(ConfigError::ZeroCallCost);
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        Ok(())
    }

    /// Parses and validates a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

/// Resolves the history database path.
///
/// Uses `HOTLINE_DB_PATH` when set to a non-blank value, otherwise
/// `<temp_dir>/hotline.sqlite3`.
pub fn resolve_db_path() -> PathBuf {
    db_path_from(std::env::var(DB_PATH_ENV).ok().as_deref())
}

fn db_path_from(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => PathBuf::from(trimmed),
        _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
    }
}
