//! Persistence collaborators for engine state.
//!
//! # Responsibility
//! - Define the load/save contract the interaction service depends on.
//! - Keep SQL details out of the engine and service layers.
//!
//! # Invariants
//! - Writes validate entries before any SQL mutation.
//! - Reads reject invalid persisted rows instead of masking them.

pub mod history_store;
