//! Interaction use-case layer.
//!
//! # Responsibility
//! - Route user intents (favorite, copy, call, clear) through the engine.
//! - Return explicit outcome values for presentation and notification.
//!
//! # Invariants
//! - Engine state is committed before any persistence call is issued.
//! - Persistence failures are reported, never rolled back into engine state.

pub mod interaction_service;
pub mod notification;
