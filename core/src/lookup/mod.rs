//! lookup/mod.rs
//! Sensor identity lookup.
//!
//! The decoder only needs `SensorLookup::resolve`; `NicknameTable` is the
//! file-backed implementation, loaded once and shared behind an `Arc`.

pub mod types;
pub mod nicknames;

use std::sync::Arc;

pub use types::*;
pub use nicknames::NicknameTable;

/// Lookup shared by every hub stream of a run.
pub type SharedLookup = Arc<dyn SensorLookup>;
