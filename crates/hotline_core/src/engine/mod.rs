//! Interaction state components.
//!
//! # Responsibility
//! - Own the coin balance, favorite flags and bounded call history.
//! - Expose total, synchronous transitions with value-typed results.
//!
//! # Invariants
//! - No component performs I/O or touches presentation concerns.
//! - Each component is mutated only through its own methods.

pub mod economy;
pub mod favorites;
pub mod history_log;
