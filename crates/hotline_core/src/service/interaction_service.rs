//! Interaction facade over the engine components.
//!
//! # Responsibility
//! - Apply one user intent per call as a single atomic transition.
//! - Produce the updated observable values for presentation.
//! - Hand history changes to the configured store after committing them.
//!
//! # Invariants
//! - A history entry is recorded only after a successful debit for the same call.
//! - Favoriting and copying never touch the balance.
//! - `InsufficientFunds` and `EmptyHistory` leave every counter unchanged.

use crate::catalog::Catalog;
use crate::config::{ConfigError, EngineConfig};
use crate::engine::economy::{DebitRejection, EconomyLedger};
use crate::engine::favorites::FavoriteTracker;
use crate::engine::history_log::{CallHistoryLog, ClearOutcome};
use crate::model::history_entry::{CallRequest, HistoryEntry};
use crate::model::service_record::ServiceId;
use crate::repo::history_store::{HistoryStore, NoopHistoryStore};
use crate::service::notification::Notification;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Recoverable intent failures. The engine stays usable after either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    /// Call attempted with a balance below the call cost.
    InsufficientFunds { balance: u32, required: u32 },
    /// Clear attempted on an empty history log.
    EmptyHistory,
}

impl Display for InteractionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientFunds { balance, required } => write!(
                f,
                "insufficient funds: balance {balance} is below call cost {required}"
            ),
            Self::EmptyHistory => write!(f, "call history is already empty"),
        }
    }
}

impl Error for InteractionError {}

impl From<DebitRejection> for InteractionError {
    fn from(value: DebitRejection) -> Self {
        Self::InsufficientFunds {
            balance: value.balance,
            required: value.required,
        }
    }
}

impl InteractionError {
    pub fn notification(&self) -> Notification {
        match self {
            Self::InsufficientFunds { required, .. } => Notification::InsufficientFunds {
                required: *required,
            },
            Self::EmptyHistory => Notification::NothingToClear,
        }
    }

    /// Stable error code used in logs and host envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::EmptyHistory => "empty_history",
        }
    }
}

/// Outcome of handing history to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    Synced,
    Failed(String),
}

impl PersistStatus {
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteOutcome {
    pub service_id: ServiceId,
    pub is_favorite: bool,
    pub favorite_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub number: String,
    pub copy_count: u64,
}

impl CopyOutcome {
    pub fn notification(&self) -> Notification {
        Notification::Copied {
            number: self.number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    /// The entry now at the head of the history log.
    pub entry: HistoryEntry,
    /// Balance after the debit.
    pub balance: u32,
    pub persist: PersistStatus,
}

impl CallOutcome {
    pub fn notification(&self) -> Notification {
        Notification::Calling {
            service_name: self.entry.service_name.clone(),
            phone_number: self.entry.phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCleared {
    pub removed: usize,
    pub persist: PersistStatus,
}

impl HistoryCleared {
    pub fn notification(&self) -> Notification {
        Notification::Cleared
    }
}

/// Proof that a clear was requested while history was non-empty.
///
/// Only [`InteractionService::request_clear`] creates one; it is consumed by
/// [`InteractionService::confirm_clear`]. Dropping it cancels the clear.
#[derive(Debug, PartialEq, Eq)]
pub struct ClearConfirmation {
    pending: usize,
}

impl ClearConfirmation {
    /// Entries that were present when the clear was requested.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn notification(&self) -> Notification {
        Notification::ConfirmClear {
            pending: self.pending,
        }
    }
}

/// Observable values for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub balance: u32,
    pub favorite_count: usize,
    pub copy_count: u64,
    pub history: Vec<HistoryEntry>,
}

/// Single owner of all interaction state.
pub struct InteractionService<S: HistoryStore = NoopHistoryStore> {
    catalog: Catalog,
    config: EngineConfig,
    ledger: EconomyLedger,
    favorites: FavoriteTracker,
    history: CallHistoryLog,
    copy_count: u64,
    store: S,
    restore_status: PersistStatus,
}

impl InteractionService<NoopHistoryStore> {
    /// Creates a session with default config and no persistence.
    pub fn new(catalog: Catalog) -> Self {
        Self::build(catalog, EngineConfig::default(), NoopHistoryStore)
    }

    pub fn with_config(catalog: Catalog, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(catalog, config, NoopHistoryStore))
    }
}

impl<S: HistoryStore> InteractionService<S> {
    /// Creates a session backed by `store`, restoring any saved history.
    ///
    /// A failed load is logged and leaves history empty; see
    /// [`Self::restore_status`].
    pub fn with_store(catalog: Catalog, config: EngineConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut service = Self::build(catalog, config, store);
        service.restore_status = service.restore_history();
        Ok(service)
    }

    fn build(catalog: Catalog, config: EngineConfig, store: S) -> Self {
        info!(
            "event=engine_init module=interaction status=ok catalog_len={} balance={} call_cost={} history_capacity={}",
            catalog.len(),
            config.starting_balance,
            config.call_cost,
            config.history_capacity
        );
        Self {
            catalog,
            config,
            ledger: EconomyLedger::new(config.starting_balance),
            favorites: FavoriteTracker::new(),
            history: CallHistoryLog::with_capacity(config.history_capacity),
            copy_count: 0,
            store,
            restore_status: PersistStatus::Synced,
        }
    }

    fn restore_history(&mut self) -> PersistStatus {
        match self.store.load() {
            Ok(entries) => {
                let dropped = self.history.restore(entries);
                info!(
                    "event=history_load module=interaction status=ok history_len={} dropped={}",
                    self.history.len(),
                    dropped
                );
                PersistStatus::Synced
            }
            Err(err) => {
                warn!("event=history_load module=interaction status=error error={err}");
                PersistStatus::Failed(err.to_string())
            }
        }
    }

    fn persist_history(&mut self) -> PersistStatus {
        match self.store.save(&self.history.list()) {
            Ok(()) => PersistStatus::Synced,
            Err(err) => {
                warn!(
                    "event=history_save module=interaction status=error history_len={} error={err}",
                    self.history.len()
                );
                PersistStatus::Failed(err.to_string())
            }
        }
    }

    /// Flips the favorite flag of `service_id`.
    pub fn on_favorite_toggle(&mut self, service_id: &str) -> FavoriteOutcome {
        let is_favorite = self.favorites.toggle(service_id);
        let favorite_count = self.favorites.count();
        info!(
            "event=favorite_toggle module=interaction status=ok is_favorite={is_favorite} favorite_count={favorite_count}"
        );
        FavoriteOutcome {
            service_id: service_id.to_string(),
            is_favorite,
            favorite_count,
        }
    }

    /// Counts one copy of `number`; the clipboard write itself is external.
    pub fn on_copy(&mut self, number: &str) -> CopyOutcome {
        self.copy_count += 1;
        info!(
            "event=copy module=interaction status=ok copy_count={}",
            self.copy_count
        );
        CopyOutcome {
            number: number.to_string(),
            copy_count: self.copy_count,
        }
    }

    /// Debits the call cost and records the call.
    ///
    /// # Errors
    /// - `InsufficientFunds` when the balance is below the call cost; balance
    ///   and history are unchanged.
    pub fn on_call(
        &mut self,
        service_name: &str,
        phone_number: &str,
    ) -> Result<CallOutcome, InteractionError> {
        let balance = match self.ledger.attempt_debit(self.config.call_cost) {
            Ok(balance) => balance,
            Err(rejection) => {
                let err = InteractionError::from(rejection);
                warn!(
                    "event=call module=interaction status=rejected error_code={} balance={} required={}",
                    err.code(),
                    rejection.balance,
                    rejection.required
                );
                return Err(err);
            }
        };

        let entry = self
            .history
            .record(CallRequest::new(service_name, phone_number));
        info!(
            "event=call module=interaction status=ok balance={balance} history_len={}",
            self.history.len()
        );
        let persist = self.persist_history();
        Ok(CallOutcome {
            entry,
            balance,
            persist,
        })
    }

    /// Empties the history log.
    ///
    /// # Errors
    /// - `EmptyHistory` when there is nothing to clear; nothing is mutated or saved.
    pub fn on_clear_history(&mut self) -> Result<HistoryCleared, InteractionError> {
        match self.history.clear() {
            ClearOutcome::NothingToClear => {
                info!(
                    "event=history_clear module=interaction status=noop error_code={}",
                    InteractionError::EmptyHistory.code()
                );
                Err(InteractionError::EmptyHistory)
            }
            ClearOutcome::Cleared { removed } => {
                info!("event=history_clear module=interaction status=ok removed={removed}");
                let persist = self.persist_history();
                Ok(HistoryCleared { removed, persist })
            }
        }
    }

    /// First phase of a confirmed clear.
    ///
    /// # Errors
    /// - `EmptyHistory` when there is nothing to confirm.
    pub fn request_clear(&self) -> Result<ClearConfirmation, InteractionError> {
        if self.history.is_empty() {
            return Err(InteractionError::EmptyHistory);
        }
        Ok(ClearConfirmation {
            pending: self.history.len(),
        })
    }

    /// Second phase of a confirmed clear; clears whatever the log holds now.
    pub fn confirm_clear(
        &mut self,
        confirmation: ClearConfirmation,
    ) -> Result<HistoryCleared, InteractionError> {
        let ClearConfirmation { pending } = confirmation;
        if pending != self.history.len() {
            info!(
                "event=history_clear module=interaction status=drift requested={pending} current={}",
                self.history.len()
            );
        }
        self.on_clear_history()
    }

    pub fn balance(&self) -> u32 {
        self.ledger.balance()
    }

    pub fn copy_count(&self) -> u64 {
        self.copy_count
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.count()
    }

    pub fn is_favorite(&self, service_id: &str) -> bool {
        self.favorites.is_favorite(service_id)
    }

    pub fn favorite_ids(&self) -> Vec<ServiceId> {
        self.favorites.favorite_ids()
    }

    /// History snapshot, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.list()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Result of the startup history load.
    pub fn restore_status(&self) -> &PersistStatus {
        &self.restore_status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            balance: self.balance(),
            favorite_count: self.favorite_count(),
            copy_count: self.copy_count,
            history: self.history(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionError, InteractionService, PersistStatus};
    use crate::catalog::Catalog;
    use crate::config::EngineConfig;
    use crate::model::history_entry::HistoryEntry;
    use crate::repo::history_store::{HistoryStore, RepoError, RepoResult};
    use crate::service::notification::Notification;

    struct FailingStore;

    impl HistoryStore for FailingStore {
        fn load(&self) -> RepoResult<Vec<HistoryEntry>> {
            Err(RepoError::InvalidData("disk unavailable".to_string()))
        }

        fn save(&mut self, _entries: &[HistoryEntry]) -> RepoResult<()> {
            Err(RepoError::InvalidData("disk unavailable".to_string()))
        }
    }

    #[test]
    fn favorite_and_copy_do_not_touch_balance() {
        let mut service = InteractionService::new(Catalog::builtin());
        service.on_favorite_toggle("police");
        service.on_copy("999");
        assert_eq!(service.balance(), 100);
        assert!(service.history().is_empty());
    }

    #[test]
    fn rejected_call_maps_to_insufficient_funds_notification() {
        let config = EngineConfig {
            starting_balance: 10,
            ..EngineConfig::default()
        };
        let mut service = InteractionService::with_config(Catalog::builtin(), config).unwrap();

        let err = service.on_call("Police", "999").unwrap_err();
        assert_eq!(
            err,
            InteractionError::InsufficientFunds {
                balance: 10,
                required: 20
            }
        );
        assert_eq!(
            err.notification(),
            Notification::InsufficientFunds { required: 20 }
        );
        assert_eq!(service.balance(), 10);
    }

    #[test]
    fn store_failures_are_reported_without_rollback() {
        let mut service =
            InteractionService::with_store(Catalog::builtin(), EngineConfig::default(), FailingStore)
                .unwrap();
        assert!(matches!(service.restore_status(), PersistStatus::Failed(_)));

        let outcome = service.on_call("Police", "999").unwrap();
        assert!(!outcome.persist.is_synced());
        assert_eq!(service.balance(), 80);
        assert_eq!(service.history().len(), 1);

        let cleared = service.on_clear_history().unwrap();
        assert!(matches!(cleared.persist, PersistStatus::Failed(_)));
        assert!(service.history().is_empty());
    }

    #[test]
    fn confirmation_is_refused_for_empty_history() {
        let service = InteractionService::new(Catalog::builtin());
        assert_eq!(
            service.request_clear().unwrap_err(),
            InteractionError::EmptyHistory
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            call_cost: 0,
            ..EngineConfig::default()
        };
        assert!(InteractionService::with_config(Catalog::builtin(), config).is_err());
    }
}
