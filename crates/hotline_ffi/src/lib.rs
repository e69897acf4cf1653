//! Flutter-facing bindings for the hotline interaction engine.

pub mod api;
