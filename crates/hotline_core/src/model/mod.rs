//! Domain records shared by the catalog, engine and persistence layers.
//!
//! # Responsibility
//! - Define the externally supplied service record shape.
//! - Define the immutable call-history entry created by successful calls.
//!
//! # Invariants
//! - A service is identified by its `id` for the whole catalog lifetime.
//! - History entries are never mutated after creation.

pub mod history_entry;
pub mod service_record;
