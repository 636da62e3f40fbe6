//! lookup/types.rs
//! Sensor identity records and the lookup seam.

use std::io;

use crate::record::hit::split_location;

/// One row of the sensor table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorInfo {
    /// Mainboard id, 12 lowercase hex digits.
    pub mbid: String,
    /// Production DOM id, e.g. `UP5P4321`.
    pub dom_id: String,
    /// Human-readable nickname.
    pub name: String,
    /// `HH-CC` location (hub, channel).
    pub location: String,
}

impl SensorInfo {
    pub fn hub_number(&self) -> Option<u8> {
        split_location(&self.location).map(|(hub, _)| hub)
    }

    pub fn channel_number(&self) -> Option<u8> {
        split_location(&self.location).map(|(_, channel)| channel)
    }
}

/// Translates a raw hardware id into a sensor identity.
///
/// Implementations are built once and are read-only afterwards, so one instance
/// is shared by every hub stream.
pub trait SensorLookup: Send + Sync {
    /// Resolve a 12-digit lowercase hex mainboard id.
    fn resolve(&self, mbid_hex: &str) -> Result<&SensorInfo, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("sensor not found: {key}")]
    NotFound { key: String },

    #[error("sensor table I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid sensor key pattern: {0}")]
    Pattern(#[from] regex::Error),
}
