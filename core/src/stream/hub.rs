//! stream/hub.rs
//! Hit stream over the data files of one hub.
//!
//! Design notes:
//! - Files are listed once at open time and consumed in lexicographic order.
//! - Each decoded record is resolved to a sensor, then passed through the filter.
//! - A record whose sensor cannot be resolved is held back: the stream does not move
//!   past it until the caller explicitly calls `skip_pending`.
//! - Corrupt data and I/O failures close the stream for good.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ReaderConfig;
use crate::lookup::{LookupError, SharedLookup};
use crate::record::{Hit, RawRecord};
use crate::stream::cursor::FileCursor;
use crate::stream::filter::{BoxedFilter, HitFilter};
use crate::stream::io::list_data_files;
use crate::stream::HitSource;
use crate::telemetry::{Stage, StreamCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::HitspoolError;
use crate::utils::format_hardware_id;

pub struct HubStream {
    hub_dir: PathBuf,
    files: Vec<PathBuf>,
    cursor: FileCursor,
    lookup: SharedLookup,
    filter: BoxedFilter,
    pending: Option<RawRecord>,
    /// Set once `Iterator::next` has reported the pending record.
    stalled: bool,
    counters: StreamCounters,
    timer: TelemetryTimer,
}

impl HubStream {
    /// List, sort and open the data files of `hub_dir`.
    ///
    /// A directory without data files gives a stream that is already finished.
    pub fn open(
        hub_dir: impl AsRef<Path>,
        lookup: SharedLookup,
        filter: impl HitFilter + 'static,
        config: &ReaderConfig,
    ) -> Result<Self, HitspoolError> {
        let hub_dir = hub_dir.as_ref().to_path_buf();
        let files = list_data_files(&hub_dir, config)?;
        Self::from_files(hub_dir, files, lookup, filter, config)
    }

    /// Build a stream over an explicit, already ordered file list.
    pub fn from_files(
        hub_dir: PathBuf,
        files: Vec<PathBuf>,
        lookup: SharedLookup,
        filter: impl HitFilter + 'static,
        config: &ReaderConfig,
    ) -> Result<Self, HitspoolError> {
        let filter: BoxedFilter = Box::new(filter);
        let mut counters = StreamCounters::default();
        let cursor = FileCursor::open(files.clone(), &mut counters)?;

        if files.is_empty() {
            warn!(hub = %hub_dir.display(), "hub directory holds no data files");
        } else {
            info!(hub = %hub_dir.display(), files = files.len(), "opened hub stream");
        }

        Ok(Self {
            hub_dir,
            files,
            cursor,
            lookup,
            filter,
            pending: None,
            stalled: false,
            counters,
            timer: TelemetryTimer::new(config.collect_metrics),
        })
    }

    pub fn hub_dir(&self) -> &Path {
        &self.hub_dir
    }

    /// All data files of this hub, in reading order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// File currently open, `None` once finished.
    pub fn current_file(&self) -> Option<&Path> {
        self.cursor.current_path()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_none() && self.cursor.is_exhausted()
    }

    /// Hardware id of a record held back by an unresolved sensor.
    pub fn pending_hardware_id(&self) -> Option<u64> {
        self.pending.as_ref().map(|r| r.header.hardware_id)
    }

    /// Drop the record held back after `UnknownSensor` and carry on past it.
    ///
    /// Returns `true` if a record was discarded.
    pub fn skip_pending(&mut self) -> bool {
        self.stalled = false;
        match self.pending.take() {
            Some(record) => {
                warn!(
                    hub = %self.hub_dir.display(),
                    hardware_id = %format_hardware_id(record.header.hardware_id),
                    "skipping record with unknown sensor"
                );
                true
            }
            None => false,
        }
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    /// Next hit that passes the filter, `Ok(None)` at end of stream.
    pub fn next_hit(&mut self) -> Result<Option<Hit>, HitspoolError> {
        loop {
            let record = match self.pending.take() {
                Some(record) => record,
                None => match self.cursor.next_record(&mut self.counters, &mut self.timer)? {
                    Some(record) => record,
                    None => {
                        self.timer.finish();
                        return Ok(None);
                    }
                },
            };

            let sensor_id = match self.resolve(&record) {
                Ok(id) => id,
                Err(e) => {
                    self.pending = Some(record);
                    return Err(e);
                }
            };
            let hit = Hit::from_record(sensor_id, record);

            let filter = &mut self.filter;
            let accepted = self.timer.time(Stage::Filter, || filter.accept(&hit));
            self.counters.add_filtered(accepted);
            if accepted {
                return Ok(Some(hit));
            }
        }
    }

    fn resolve(&mut self, record: &RawRecord) -> Result<String, HitspoolError> {
        let hardware_id = record.header.hardware_id;
        let key = format_hardware_id(hardware_id);
        let lookup = &self.lookup;

        match self.timer.time(Stage::Resolve, || lookup.resolve(&key)) {
            Ok(info) => Ok(info.location.clone()),
            Err(LookupError::NotFound { .. }) => {
                warn!(hub = %self.hub_dir.display(), hardware_id = %key, "unknown sensor");
                Err(HitspoolError::UnknownSensor { hardware_id })
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl HitSource for HubStream {
    fn next_hit(&mut self) -> Result<Option<Hit>, HitspoolError> {
        HubStream::next_hit(self)
    }

    fn counters(&self) -> StreamCounters {
        self.counters.clone()
    }

    fn stage_times(&self) -> Option<&crate::telemetry::StageTimes> {
        Some(&self.timer.stage_times)
    }

    fn label(&self) -> String {
        self.hub_dir.display().to_string()
    }
}

/// Reports an unknown sensor once, then yields `None` until `skip_pending`
/// is called, so adapters such as `flatten` terminate.
impl Iterator for HubStream {
    type Item = Result<Hit, HitspoolError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stalled {
            return None;
        }
        let item = self.next_hit();
        if matches!(item, Err(HitspoolError::UnknownSensor { .. })) {
            self.stalled = true;
        }
        item.transpose()
    }
}

impl fmt::Debug for HubStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubStream")
            .field("hub_dir", &self.hub_dir)
            .field("files", &self.files.len())
            .field("current_file", &self.cursor.current_path())
            .field("pending", &self.pending.is_some())
            .field("counters", &self.counters)
            .finish()
    }
}
