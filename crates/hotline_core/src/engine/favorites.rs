//! Per-service favorite flags.
//!
//! # Invariants
//! - An id absent from the set is not a favorite.
//! - `count()` is read from the set itself; there is no separate counter.
//! - Catalog membership is not checked here.

use crate::model::service_record::ServiceId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteTracker {
    favorites: BTreeSet<ServiceId>,
}

impl FavoriteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the flag for `service_id` and returns the new state.
    pub fn toggle(&mut self, service_id: &str) -> bool {
        if self.favorites.remove(service_id) {
            return false;
        }
        self.favorites.insert(service_id.to_string());
        true
    }

    pub fn is_favorite(&self, service_id: &str) -> bool {
        self.favorites.contains(service_id)
    }

    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Favorite ids in ascending order.
    pub fn favorite_ids(&self) -> Vec<ServiceId> {
        self.favorites.iter().cloned().collect()
    }
}
