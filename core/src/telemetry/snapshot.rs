//! telemetry/snapshot.rs
//! Immutable, serializable view of a stream's counters and timers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::StreamCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: StreamCounters,
    pub hits_per_sec: f64,
    pub bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &StreamCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();
        let secs = elapsed.as_secs_f64();

        let (hits_per_sec, bytes_per_sec) = if secs > 0.0 {
            (counters.hits_yielded as f64 / secs, counters.bytes_read as f64 / secs)
        } else {
            (0.0, 0.0)
        };

        Self {
            counters: counters.clone(),
            hits_per_sec,
            bytes_per_sec,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal consistency:
    /// - every decoded record was either yielded or rejected (or is pending)
    /// - measured stages never exceed wall time
    pub fn sanity_check(&self) -> bool {
        let c = &self.counters;
        c.hits_yielded + c.hits_rejected <= c.records_decoded
            && c.files_exhausted <= c.files_opened
            && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
