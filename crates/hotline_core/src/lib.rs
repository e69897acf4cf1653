//! Interaction state engine for the emergency hotline directory.
//! This crate is the single source of truth for coin, favorite, copy and
//! call-history invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::{Catalog, CatalogError};
pub use config::{resolve_db_path, ConfigError, EngineConfig};
pub use engine::economy::{DebitRejection, EconomyLedger, CALL_COST, DEFAULT_STARTING_BALANCE};
pub use engine::favorites::FavoriteTracker;
pub use engine::history_log::{CallHistoryLog, ClearOutcome, DEFAULT_HISTORY_CAPACITY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::history_entry::{CallRequest, HistoryEntry, HistoryEntryId};
pub use model::service_record::{ServiceId, ServiceRecord, ServiceRecordValidationError};
pub use repo::history_store::{
    HistoryStore, NoopHistoryStore, RepoError, RepoResult, SqliteHistoryStore,
};
pub use service::interaction_service::{
    CallOutcome, ClearConfirmation, CopyOutcome, EngineSnapshot, FavoriteOutcome,
    HistoryCleared, InteractionError, InteractionService, PersistStatus,
};
pub use service::notification::Notification;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
