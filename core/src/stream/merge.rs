//! stream/merge.rs
//! K-way merge of hit sources into one globally time-ordered stream.
//!
//! Design notes:
//! - One buffered head hit per live source; sources keep registration order.
//! - The earliest head is found by linear scan. Hub counts are in the tens, so a
//!   heap would not pay for itself.
//! - Equal timestamps go to the source registered first.
//! - Each source must already be time-ordered; inversions inside one source are
//!   passed through unchanged.

use std::fmt;

use tracing::{debug, error, info};

use crate::record::Hit;
use crate::stream::HitSource;
use crate::telemetry::{Stage, StageTimes, StreamCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::HitspoolError;

struct Slot<S> {
    source: S,
    head: Hit,
}

pub struct MergeStream<S: HitSource> {
    slots: Vec<Slot<S>>,
    /// Error raised while refilling; reported on the following call.
    deferred: Option<HitspoolError>,
    /// Counters of sources that already finished.
    retired: StreamCounters,
    retired_times: StageTimes,
    timer: TelemetryTimer,
}

impl<S: HitSource> MergeStream<S> {
    /// Seed the merge with one hit from every source.
    ///
    /// Sources that are empty from the start are dropped. Any error while seeding
    /// fails the whole construction.
    pub fn open(sources: impl IntoIterator<Item = S>) -> Result<Self, HitspoolError> {
        Self::with_metrics(sources, false)
    }

    pub fn with_metrics(sources: impl IntoIterator<Item = S>, collect_metrics: bool) -> Result<Self, HitspoolError> {
        let mut merge = Self {
            slots: Vec::new(),
            deferred: None,
            retired: StreamCounters::default(),
            retired_times: StageTimes::default(),
            timer: TelemetryTimer::new(collect_metrics),
        };

        let mut registered = 0usize;
        for mut source in sources {
            registered += 1;
            match source.next_hit()? {
                Some(head) => merge.slots.push(Slot { source, head }),
                None => {
                    debug!(source = %source.label(), "source empty at open, dropped");
                    merge.retire(&source);
                }
            }
        }

        info!(registered, live = merge.slots.len(), "opened merge stream");
        Ok(merge)
    }

    /// Number of sources still holding hits.
    pub fn live_sources(&self) -> usize {
        self.slots.len()
    }

    pub fn is_finished(&self) -> bool {
        self.slots.is_empty() && self.deferred.is_none()
    }

    /// Timestamp of the hit `next_hit` would return.
    pub fn peek_timestamp(&self) -> Option<u64> {
        earliest(&self.slots).map(|i| self.slots[i].head.timestamp())
    }

    /// Next hit in global time order, `Ok(None)` once every source is finished.
    ///
    /// If refilling from a source fails, the already selected hit is still
    /// returned; the error comes on the next call and ends the merge.
    pub fn next_hit(&mut self) -> Result<Option<Hit>, HitspoolError> {
        if let Some(e) = self.deferred.take() {
            self.terminate();
            return Err(e);
        }

        let slots = &self.slots;
        let Some(idx) = self.timer.time(Stage::Merge, || earliest(slots)) else {
            self.timer.finish();
            return Ok(None);
        };

        let slot = &mut self.slots[idx];
        match slot.source.next_hit() {
            Ok(Some(next)) => Ok(Some(std::mem::replace(&mut slot.head, next))),
            Ok(None) => {
                let slot = self.slots.remove(idx);
                debug!(source = %slot.source.label(), live = self.slots.len(), "source finished");
                self.retire(&slot.source);
                Ok(Some(slot.head))
            }
            Err(e) => {
                let slot = self.slots.remove(idx);
                error!(source = %slot.source.label(), error = %e, "source failed, merge will stop");
                self.retire(&slot.source);
                self.deferred = Some(e);
                Ok(Some(slot.head))
            }
        }
    }

    /// Discard every hit earlier than `timestamp`; returns how many were skipped.
    pub fn advance_to(&mut self, timestamp: u64) -> Result<u64, HitspoolError> {
        let mut skipped = 0;
        while self.deferred.is_none() && self.peek_timestamp().is_some_and(|ts| ts < timestamp) {
            if self.next_hit()?.is_some() {
                skipped += 1;
            }
        }
        Ok(skipped)
    }

    /// Counters summed over every source, live and finished.
    pub fn counters(&self) -> StreamCounters {
        let mut total = self.retired.clone();
        for slot in &self.slots {
            total.merge(&slot.source.counters());
        }
        total
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let mut snapshot = TelemetrySnapshot::from(&self.counters(), &self.timer);
        snapshot.stage_times.merge(&self.retired_times);
        for slot in &self.slots {
            if let Some(times) = slot.source.stage_times() {
                snapshot.stage_times.merge(times);
            }
        }
        snapshot
    }

    fn retire(&mut self, source: &S) {
        self.retired.merge(&source.counters());
        if let Some(times) = source.stage_times() {
            self.retired_times.merge(times);
        }
    }

    /// Drop every source, releasing their files.
    fn terminate(&mut self) {
        for slot in std::mem::take(&mut self.slots) {
            self.retire(&slot.source);
        }
        self.timer.finish();
        info!("merge stream terminated");
    }
}

/// Index of the earliest head; the first slot wins ties.
fn earliest<S>(slots: &[Slot<S>]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (i, slot) in slots.iter().enumerate() {
        let ts = slot.head.timestamp();
        match best {
            Some((_, best_ts)) if ts >= best_ts => {}
            _ => best = Some((i, ts)),
        }
    }
    best.map(|(i, _)| i)
}

impl<S: HitSource> Iterator for MergeStream<S> {
    type Item = Result<Hit, HitspoolError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_hit().transpose()
    }
}

impl<S: HitSource> fmt::Debug for MergeStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeStream")
            .field("live_sources", &self.slots.len())
            .field("peek_timestamp", &self.peek_timestamp())
            .field("deferred_error", &self.deferred.is_some())
            .finish()
    }
}
