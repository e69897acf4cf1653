//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose intent-level functions (favorite, copy, call, clear) to Dart via FRB.
//! - Own the single process-wide interaction engine.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Unknown service ids are refused before any engine state changes.
//! - Every response carries the counter values to render after the intent.

use hotline_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Catalog, EngineConfig, InteractionService, NoopHistoryStore, Notification,
    ServiceRecord, SqliteHistoryStore,
};
use log::warn;
use std::sync::{Mutex, OnceLock};

/// Engine variant chosen at first use: SQLite-backed when the DB opens.
enum Engine {
    Persistent(InteractionService<SqliteHistoryStore>),
    Ephemeral(InteractionService<NoopHistoryStore>),
}

static ENGINE: OnceLock<Mutex<Engine>> = OnceLock::new();

/// Runs `$body` against whichever engine variant is active.
macro_rules! dispatch {
    ($engine:expr, |$service:ident| $body:expr) => {
        match $engine {
            Engine::Persistent($service) => $body,
            Engine::Ephemeral($service) => $body,
        }
    };
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One directory card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub service_id: String,
    pub name: String,
    pub short_name: String,
    pub number: String,
    pub category: String,
    pub icon_ref: String,
    pub color_ref: String,
    pub is_favorite: bool,
}

/// One call-history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub entry_id: String,
    pub service_name: String,
    pub phone_number: String,
    /// Unix epoch milliseconds.
    pub called_at_ms: i64,
}

/// Response envelope shared by every intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionResponse {
    /// Whether the intent was applied.
    pub ok: bool,
    /// Stable outcome kind (`copied`, `insufficient_funds`, `unknown_service`, ...).
    pub kind: String,
    /// User-facing notification text.
    pub message: String,
    pub balance: u32,
    pub favorite_count: u32,
    pub copy_count: u64,
}

/// Lists the catalog with per-card favorite state.
///
/// # FFI contract
/// - Returns an empty list when the engine lock is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_list() -> Vec<CatalogItem> {
    with_engine(|engine| {
        Ok(dispatch!(engine, |service| service
            .catalog()
            .records()
            .iter()
            .map(|record| to_catalog_item(record, service.is_favorite(&record.id)))
            .collect::<Vec<_>>()))
    })
    .unwrap_or_default()
}

/// Toggles the favorite flag of a catalog entry.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_favorite(service_id: String) -> InteractionResponse {
    respond(|engine| {
        dispatch!(engine, |service| {
            let record = lookup(service.catalog(), &service_id)?;
            let outcome = service.on_favorite_toggle(&record.id);
            let message = if outcome.is_favorite {
                format!("{} added to favorites.", record.name)
            } else {
                format!("{} removed from favorites.", record.name)
            };
            Ok(Reply::applied("favorite_toggled", message))
        })
    })
}

/// Counts a copy of the entry's number; the clipboard write happens in Dart.
#[flutter_rust_bridge::frb(sync)]
pub fn copy_number(service_id: String) -> InteractionResponse {
    respond(|engine| {
        dispatch!(engine, |service| {
            let number = lookup(service.catalog(), &service_id)?.number;
            let outcome = service.on_copy(&number);
            Ok(Reply::notified(true, outcome.notification()))
        })
    })
}

/// Places a call to a catalog entry, spending coins.
#[flutter_rust_bridge::frb(sync)]
pub fn call_service(service_id: String) -> InteractionResponse {
    respond(|engine| {
        dispatch!(engine, |service| {
            let record = lookup(service.catalog(), &service_id)?;
            match service.on_call(&record.name, &record.number) {
                Ok(outcome) => Ok(Reply::notified(true, outcome.notification())),
                Err(err) => Ok(Reply::notified(false, err.notification())),
            }
        })
    })
}

/// Clears call history. Confirmation is handled by the Dart dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_history() -> InteractionResponse {
    respond(|engine| {
        dispatch!(engine, |service| match service.on_clear_history() {
            Ok(cleared) => Ok(Reply::notified(true, cleared.notification())),
            Err(err) => Ok(Reply::notified(false, err.notification())),
        })
    })
}

/// Returns call history, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn call_history() -> Vec<HistoryItem> {
    with_engine(|engine| {
        Ok(dispatch!(engine, |service| service
            .history()
            .into_iter()
            .map(|entry| HistoryItem {
                entry_id: entry.id.to_string(),
                service_name: entry.service_name,
                phone_number: entry.phone_number,
                called_at_ms: entry.timestamp,
            })
            .collect::<Vec<_>>()))
    })
    .unwrap_or_default()
}

struct Reply {
    ok: bool,
    kind: String,
    message: String,
}

impl Reply {
    fn applied(kind: &str, message: String) -> Self {
        Self {
            ok: true,
            kind: kind.to_string(),
            message,
        }
    }

    fn notified(ok: bool, notification: Notification) -> Self {
        Self {
            ok,
            kind: notification.kind().to_string(),
            message: notification.message(),
        }
    }

    fn refused(kind: &str, message: String) -> Self {
        Self {
            ok: false,
            kind: kind.to_string(),
            message,
        }
    }
}

fn lookup(catalog: &Catalog, service_id: &str) -> Result<ServiceRecord, Reply> {
    catalog.get(service_id).cloned().ok_or_else(|| {
        Reply::refused(
            "unknown_service",
            format!("Unknown service `{}`.", service_id.trim()),
        )
    })
}

fn respond(intent: impl FnOnce(&mut Engine) -> Result<Reply, Reply>) -> InteractionResponse {
    let result = with_engine(|engine| {
        let reply = intent(engine).unwrap_or_else(|refusal| refusal);
        let (balance, favorite_count, copy_count) = dispatch!(engine, |service| (
            service.balance(),
            service.favorite_count(),
            service.copy_count()
        ));
        Ok(InteractionResponse {
            ok: reply.ok,
            kind: reply.kind,
            message: reply.message,
            balance,
            favorite_count: u32::try_from(favorite_count).unwrap_or(u32::MAX),
            copy_count,
        })
    });

    result.unwrap_or_else(|err| InteractionResponse {
        ok: false,
        kind: "engine_unavailable".to_string(),
        message: err,
        balance: 0,
        favorite_count: 0,
        copy_count: 0,
    })
}

fn with_engine<T>(f: impl FnOnce(&mut Engine) -> Result<T, String>) -> Result<T, String> {
    let mutex = ENGINE.get_or_init(|| Mutex::new(create_engine()));
    let mut guard = mutex
        .lock()
        .map_err(|_| "engine lock poisoned by an earlier failure".to_string())?;
    f(&mut *guard)
}

fn create_engine() -> Engine {
    let store = match open_history_store() {
        Ok(store) => store,
        Err(err) => {
            warn!(
                "event=engine_create module=ffi status=degraded error_code=history_db_unavailable error={err}"
            );
            return Engine::Ephemeral(InteractionService::new(Catalog::builtin()));
        }
    };
    match InteractionService::with_store(Catalog::builtin(), EngineConfig::default(), store) {
        Ok(service) => Engine::Persistent(service),
        Err(err) => {
            warn!("event=engine_create module=ffi status=degraded error_code=invalid_config error={err}");
            Engine::Ephemeral(InteractionService::new(Catalog::builtin()))
        }
    }
}

#[cfg(not(test))]
fn open_history_store() -> hotline_core::RepoResult<SqliteHistoryStore> {
    SqliteHistoryStore::open(hotline_core::resolve_db_path())
}

/// Unit tests share the process-wide engine; keep them off the user's database.
#[cfg(test)]
fn open_history_store() -> hotline_core::RepoResult<SqliteHistoryStore> {
    SqliteHistoryStore::open_in_memory()
}

fn to_catalog_item(record: &ServiceRecord, is_favorite: bool) -> CatalogItem {
    CatalogItem {
        service_id: record.id.clone(),
        name: record.name.clone(),
        short_name: record.short_name.clone(),
        number: record.number.clone(),
        category: record.category.clone(),
        icon_ref: record.icon_ref.clone(),
        color_ref: record.color_ref.clone(),
        is_favorite,
    }
}
