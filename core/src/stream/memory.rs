//! In-memory hit source, for tests and benchmarks.

use std::collections::VecDeque;

use crate::record::Hit;
use crate::stream::HitSource;
use crate::telemetry::StreamCounters;
use crate::types::HitspoolError;

/// Yields a fixed list of hits in order.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    label: String,
    hits: VecDeque<Hit>,
    yielded: u64,
}

impl VecSource {
    pub fn new(label: impl Into<String>, hits: impl IntoIterator<Item = Hit>) -> Self {
        Self {
            label: label.into(),
            hits: hits.into_iter().collect(),
            yielded: 0,
        }
    }

    /// One hit per timestamp, all from `sensor_id`.
    pub fn from_timestamps(sensor_id: &str, timestamps: &[u64]) -> Self {
        Self::new(sensor_id, timestamps.iter().map(|&ts| Hit::new(sensor_id, ts, 0, 0)))
    }

    pub fn remaining(&self) -> usize {
        self.hits.len()
    }
}

impl HitSource for VecSource {
    fn next_hit(&mut self) -> Result<Option<Hit>, HitspoolError> {
        let hit = self.hits.pop_front();
        if hit.is_some() {
            self.yielded += 1;
        }
        Ok(hit)
    }

    fn counters(&self) -> StreamCounters {
        StreamCounters {
            records_decoded: self.yielded,
            hits_yielded: self.yielded,
            ..Default::default()
        }
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
