//! Hit streams.
//!
//! Responsibilities:
//! - Walk one hub's data files in order (`hub`, built on `cursor`)
//! - Merge many hubs into one time-ordered stream (`merge`)
//! - Wire directories into a merged stream (`loader`)
//!
//! Non-responsibilities:
//! - Record layout (see `record`)
//! - Sensor naming (see `lookup`)

pub mod loader;
pub mod cursor;
pub mod filter;
pub mod hub;
pub mod io;
pub mod memory;
pub mod merge;

use crate::record::Hit;
use crate::telemetry::{StageTimes, StreamCounters};
use crate::types::HitspoolError;

pub use filter::{accept_all, BoxedFilter, HitFilter};
pub use hub::HubStream;
pub use memory::VecSource;
pub use merge::MergeStream;

/// Pull-based producer of time-ordered hits, consumed by `MergeStream`.
///
/// `Ok(None)` means the source is finished and will stay finished.
pub trait HitSource: Send {
    fn next_hit(&mut self) -> Result<Option<Hit>, HitspoolError>;

    /// Counters accumulated so far.
    fn counters(&self) -> StreamCounters {
        StreamCounters::default()
    }

    fn stage_times(&self) -> Option<&StageTimes> {
        None
    }

    /// Name used in log lines.
    fn label(&self) -> String {
        String::from("source")
    }
}

impl<S: HitSource + ?Sized> HitSource for Box<S> {
    fn next_hit(&mut self) -> Result<Option<Hit>, HitspoolError> {
        (**self).next_hit()
    }

    fn counters(&self) -> StreamCounters {
        (**self).counters()
    }

    fn stage_times(&self) -> Option<&StageTimes> {
        (**self).stage_times()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}
