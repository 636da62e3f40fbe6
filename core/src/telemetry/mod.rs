//! telemetry/mod.rs
//! Counters, stage timers, and immutable snapshots for hitspool streams.
//!
//! Notes:
//! - Counters are always on; they are plain integer adds.
//! - Stage timers are opt-in (`ReaderConfig::collect_metrics`).
//! - Snapshots serialize to JSON for run logs.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
