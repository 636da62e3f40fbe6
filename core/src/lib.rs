//! hitspool-core
//!
//! Pure Rust hitspool reader: decodes per-hub binary hit records and merges
//! every hub into one globally time-ordered hit stream.
//! No plotting, no archive handling, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

// Record layout and sensor identity
pub mod lookup;
pub mod record;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::ReaderConfig;
    pub use crate::lookup::{NicknameTable, SensorInfo, SensorLookup, SharedLookup};
    pub use crate::record::{ChargeStamp, Hit, HitRow};
    pub use crate::stream::loader::{load, load_stream};
    pub use crate::stream::{accept_all, HitFilter, HitSource, HubStream, MergeStream};
    pub use crate::types::HitspoolError;
}
