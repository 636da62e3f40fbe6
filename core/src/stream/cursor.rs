//! stream/cursor.rs
//! Sequential record reader over an ordered list of files.
//!
//! State machine:
//! - `Current`: one open file plus the files still to visit.
//! - `Exhausted`: nothing open; every later read returns `Ok(None)`.
//!
//! Transitions happen on EOF, on a truncated tail record, and on fatal errors.
//! A file handle is dropped (closed) the moment the cursor leaves it.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::record::{parse_record_header, RawRecord, RecordHeader};
use crate::stream::io::read_exact_or_eof;
use crate::telemetry::{Stage, StreamCounters, TelemetryTimer};
use crate::types::HitspoolError;

enum CursorState {
    Current {
        reader: BufReader<File>,
        path: PathBuf,
        offset: u64,
        remaining: VecDeque<PathBuf>,
    },
    Exhausted,
}

/// What one read attempt on the current file produced.
enum Step {
    Record(RawRecord),
    EndOfFile { empty: bool },
    TruncatedTail { dangling: usize },
    Corrupt { offset: u64, reason: String },
}

pub struct FileCursor {
    state: CursorState,
}

impl FileCursor {
    /// Open the first of `files`; an empty list gives an exhausted cursor.
    pub fn open(files: Vec<PathBuf>, counters: &mut StreamCounters) -> Result<Self, HitspoolError> {
        let mut cursor = Self { state: CursorState::Exhausted };
        cursor.enter(files.into(), counters)?;
        Ok(cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, CursorState::Exhausted)
    }

    /// File currently being read, if any.
    pub fn current_path(&self) -> Option<&Path> {
        match &self.state {
            CursorState::Current { path, .. } => Some(path),
            CursorState::Exhausted => None,
        }
    }

    /// Byte offset of the next record in the current file.
    pub fn offset(&self) -> Option<u64> {
        match &self.state {
            CursorState::Current { offset, .. } => Some(*offset),
            CursorState::Exhausted => None,
        }
    }

    /// Release every handle; the cursor is finished.
    pub fn close(&mut self) {
        self.state = CursorState::Exhausted;
    }

    /// Read the next complete record, crossing file boundaries as needed.
    pub fn next_record(
        &mut self,
        counters: &mut StreamCounters,
        timer: &mut TelemetryTimer,
    ) -> Result<Option<RawRecord>, HitspoolError> {
        loop {
            let read = match &mut self.state {
                CursorState::Exhausted => return Ok(None),
                CursorState::Current { reader, offset, remaining, .. } => {
                    read_step(reader, *offset, remaining.is_empty(), timer)
                }
            };
            let step = match read {
                Ok(step) => step,
                Err(e) => {
                    error!(file = ?self.current_path(), error = %e, "read failed, closing hub files");
                    self.close();
                    return Err(e.into());
                }
            };

            match step {
                Step::Record(record) => {
                    if let CursorState::Current { offset, .. } = &mut self.state {
                        *offset += record.wire_len() as u64;
                    }
                    counters.add_record(record.wire_len());
                    return Ok(Some(record));
                }
                Step::EndOfFile { empty } => {
                    counters.add_file_exhausted(empty);
                    self.advance(counters)?;
                }
                Step::TruncatedTail { dangling } => {
                    warn!(
                        file = ?self.current_path(),
                        offset = ?self.offset(),
                        dangling,
                        "truncated record at end of file, treating file as exhausted"
                    );
                    counters.add_truncated_tail(dangling);
                    counters.add_file_exhausted(false);
                    self.advance(counters)?;
                }
                Step::Corrupt { offset, reason } => {
                    let path = self.current_path().map(Path::to_path_buf).unwrap_or_default();
                    error!(file = %path.display(), offset, %reason, "corrupt record, closing hub files");
                    self.close();
                    return Err(HitspoolError::CorruptRecord { path, offset, reason });
                }
            }
        }
    }

    /// Leave the current file and open the next one in line.
    fn advance(&mut self, counters: &mut StreamCounters) -> Result<(), HitspoolError> {
        let remaining = match std::mem::replace(&mut self.state, CursorState::Exhausted) {
            CursorState::Current { path, remaining, .. } => {
                debug!(file = %path.display(), "closed data file");
                remaining
            }
            CursorState::Exhausted => return Ok(()),
        };
        self.enter(remaining, counters)
    }

    fn enter(&mut self, mut remaining: VecDeque<PathBuf>, counters: &mut StreamCounters) -> Result<(), HitspoolError> {
        let Some(path) = remaining.pop_front() else {
            self.state = CursorState::Exhausted;
            return Ok(());
        };
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                error!(file = %path.display(), error = %e, "cannot open data file, closing hub files");
                return Err(e.into());
            }
        };
        debug!(file = %path.display(), left = remaining.len(), "opened data file");
        counters.add_file_opened();
        self.state = CursorState::Current {
            reader: BufReader::new(file),
            path,
            offset: 0,
            remaining,
        };
        Ok(())
    }
}

fn read_step(
    reader: &mut BufReader<File>,
    offset: u64,
    last_file: bool,
    timer: &mut TelemetryTimer,
) -> std::io::Result<Step> {
    let head = timer.time(Stage::Read, || read_exact_or_eof(reader, RecordHeader::LEN))?;
    if head.is_empty() {
        return Ok(Step::EndOfFile { empty: offset == 0 });
    }
    if head.len() < RecordHeader::LEN {
        return Ok(Step::TruncatedTail { dangling: head.len() });
    }

    let header = match timer.time(Stage::Decode, || parse_record_header(&head)) {
        Ok(h) => h,
        Err(e) => return Ok(Step::Corrupt { offset, reason: e.to_string() }),
    };

    let need = header.trailer_len();
    let trailer: Bytes = timer.time(Stage::Read, || read_exact_or_eof(reader, need))?;
    if trailer.len() < need {
        if last_file {
            return Ok(Step::TruncatedTail { dangling: RecordHeader::LEN + trailer.len() });
        }
        return Ok(Step::Corrupt {
            offset,
            reason: format!(
                "record declares {} bytes but only {} remain before the next file",
                header.record_length,
                RecordHeader::LEN + trailer.len()
            ),
        });
    }

    Ok(Step::Record(RawRecord { header, trailer }))
}
