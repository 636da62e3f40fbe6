//! record/types.rs
//! Raw hitspool record header and its decode errors.
//!
//! Wire notes:
//! - Big-endian across all multi-byte integers.
//! - The header is 54 bytes, fixed length; `record_length` includes it.
//! - Everything after the header is an opaque trailer (waveform data) kept as-is.

use bytes::Bytes;

use crate::constants::RECORD_HEADER_LEN;

bitflags::bitflags! {
    /// Single-bit flags carried in `header_word_0`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HitFlags: u32 {
        /// ATWD chip B captured the waveform (chip A otherwise)
        const ATWD_B   = 1 << 11;

        /// ATWD waveform present in the trailer
        const ATWD     = 1 << 14;

        /// fADC samples present in the trailer
        const FADC     = 1 << 15;

        /// Recorded under the min-bias trigger policy
        const MIN_BIAS = 1 << 30;
    }
}

/// Fixed 54-byte header, field order matches the wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordHeader {
    /// Total record length in bytes, header included.
    pub record_length: i32,
    /// Record discriminator; not interpreted here.
    pub record_type: i32,
    /// Mainboard id of the sensor that produced the hit.
    pub hardware_id: u64,
    /// Global clock value.
    pub timestamp: u64,
    pub unused_a: i16,
    pub unused_b: i16,
    pub unused_c: i16,
    pub unused_d: u64,
    pub word0: u32,
    pub word1: u32,
}

impl RecordHeader {
    pub const LEN: usize = 4 // record_length
        + 4                  // record_type
        + 8                  // padding
        + 8                  // hardware_id
        + 8                  // timestamp
        + 2 + 2 + 2          // unused_a, unused_b, unused_c
        + 8                  // unused_d
        + 4                  // word0
        + 4;                 // word1

    /// Length of the trailer this header announces.
    ///
    /// Only meaningful once `record_length >= LEN` has been checked.
    pub fn trailer_len(&self) -> usize {
        (self.record_length as usize).saturating_sub(Self::LEN)
    }

    /// Header for tests and fixtures: an empty trailer and the given identity.
    pub fn test_header(hardware_id: u64, timestamp: u64) -> Self {
        Self {
            record_length: Self::LEN as i32,
            record_type: 2,
            hardware_id,
            timestamp,
            ..Default::default()
        }
    }
}

const _: () = assert!(RecordHeader::LEN == RECORD_HEADER_LEN);

/// A decoded record: header fields plus the retained trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub header: RecordHeader,
    pub trailer: Bytes,
}

impl RawRecord {
    /// Total bytes this record occupied on disk.
    pub fn wire_len(&self) -> usize {
        RecordHeader::LEN + self.trailer.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Fewer bytes available than the header or the declared length needs.
    #[error("truncated record: have {have} bytes, need {need}")]
    Truncated { have: usize, need: usize },

    /// Declared length shorter than the fixed header.
    #[error("invalid record length {declared}: shorter than the {header} byte header", header = RecordHeader::LEN)]
    InvalidLength { declared: i32 },

    #[error("malformed record: {0}")]
    Malformed(String),
}

impl RecordError {
    /// Both variants mean the bytes do not hold a complete record.
    pub fn is_truncation(&self) -> bool {
        matches!(self, RecordError::Truncated { .. } | RecordError::InvalidLength { .. })
    }
}
