use std::io;
use std::path::PathBuf;

use crate::{config::ConfigError, lookup::LookupError, record::RecordError};

/// Unified error covering I/O, record decoding, sensor lookup, and stream policy.
/// - `From<T>` impls enable `?` across modules.
/// - End of stream is never an error: readers return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum HitspoolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Record-level error outside of a file stream (in-memory decode).
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Data after this point cannot be trusted; the owning stream is finished.
    #[error("corrupt record in {} at offset {offset}: {reason}", path.display())]
    CorruptRecord { path: PathBuf, offset: u64, reason: String },

    /// Hardware id has no entry in the sensor table.
    #[error("unknown sensor: hardware id {hardware_id:012x}")]
    UnknownSensor { hardware_id: u64 },

    #[error("validation error: {0}")]
    Validation(String),
}

impl HitspoolError {
    /// Whether the stream that produced this error has been shut down.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, HitspoolError::UnknownSensor { .. })
    }
}
