//! Call-history load/save contract and implementations.
//!
//! # Invariants
//! - `save` replaces the persisted log as a whole, in one transaction.
//! - `load` returns entries most-recent-first, exactly as last saved.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::history_entry::{HistoryEntry, HistoryEntryValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(HistoryEntryValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted history data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<HistoryEntryValidationError> for RepoError {
    fn from(value: HistoryEntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Best-effort history persistence.
pub trait HistoryStore {
    /// Loads entries, most-recent-first.
    fn load(&self) -> RepoResult<Vec<HistoryEntry>>;
    /// Replaces persisted entries with `entries` (most-recent-first).
    fn save(&mut self, entries: &[HistoryEntry]) -> RepoResult<()>;
}

/// Store used when no persistence is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHistoryStore;

impl HistoryStore for NoopHistoryStore {
    fn load(&self) -> RepoResult<Vec<HistoryEntry>> {
        Ok(Vec::new())
    }

    fn save(&mut self, _entries: &[HistoryEntry]) -> RepoResult<()> {
        Ok(())
    }
}

/// SQLite-backed history store owning its migrated connection.
pub struct SqliteHistoryStore {
    conn: Connection,
}

impl SqliteHistoryStore {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn load(&self) -> RepoResult<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, service_name, phone_number, called_at
             FROM call_history
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_history_row(row)?);
        }
        Ok(entries)
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> RepoResult<()> {
        for entry in entries {
            entry.validate()?;
        }

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM call_history;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO call_history (
                    uuid,
                    position,
                    service_name,
                    phone_number,
                    called_at
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for (position, entry) in entries.iter().enumerate() {
                insert.execute(params![
                    entry.id.to_string(),
                    i64::try_from(position).unwrap_or(i64::MAX),
                    entry.service_name.as_str(),
                    entry.phone_number.as_str(),
                    entry.timestamp,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_history_row(row: &Row<'_>) -> RepoResult<HistoryEntry> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in call_history.uuid"
        ))
    })?;

    let entry = HistoryEntry {
        id,
        service_name: row.get("service_name")?,
        phone_number: row.get("phone_number")?,
        timestamp: row.get("called_at")?,
    };
    entry
        .validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;
    Ok(entry)
}
