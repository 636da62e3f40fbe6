//! telemetry/counters.rs
//! Mutable counters kept by every hub stream.
//!
//! Summary: counts records, hits and files as a stream is consumed.
//! Converted into an immutable `TelemetrySnapshot` on demand.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Deterministic counters collected while reading a hub.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    pub records_decoded: u64,
    pub hits_yielded: u64,
    pub hits_rejected: u64,
    pub bytes_read: u64,
    pub files_opened: u64,
    pub files_exhausted: u64,
    pub files_empty: u64,
    pub truncated_tails: u64,
}

impl StreamCounters {
    /// Record one fully read record of `wire_len` bytes.
    pub fn add_record(&mut self, wire_len: usize) {
        self.records_decoded += 1;
        self.bytes_read += wire_len as u64;
    }

    /// Record the filter's verdict on a decoded hit.
    pub fn add_filtered(&mut self, accepted: bool) {
        if accepted {
            self.hits_yielded += 1;
        } else {
            self.hits_rejected += 1;
        }
    }

    pub fn add_file_opened(&mut self) {
        self.files_opened += 1;
    }

    /// Mark a file finished; `empty` when it held no bytes at all.
    pub fn add_file_exhausted(&mut self, empty: bool) {
        self.files_exhausted += 1;
        if empty {
            self.files_empty += 1;
        }
    }

    /// Bytes at end of file that did not form a full record.
    pub fn add_truncated_tail(&mut self, dangling: usize) {
        self.truncated_tails += 1;
        self.bytes_read += dangling as u64;
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.records_decoded += other.records_decoded;
        self.hits_yielded += other.hits_yielded;
        self.hits_rejected += other.hits_rejected;
        self.bytes_read += other.bytes_read;
        self.files_opened += other.files_opened;
        self.files_exhausted += other.files_exhausted;
        self.files_empty += other.files_empty;
        self.truncated_tails += other.truncated_tails;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
