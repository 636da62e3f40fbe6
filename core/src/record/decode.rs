//! src/record/decode.rs
//!
//! Record decoding utilities.
//!
//! Design notes:
//! - `parse_record_header` reads the fixed 54-byte header only; callers use
//!   `trailer_len()` to know how much more to pull from their reader.
//! - `decode_record` takes a buffer holding at least one complete record.
//! - Field order must match `encode.rs` exactly.

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::constants::HEADER_PADDING_LEN;
use crate::record::types::{RawRecord, RecordError, RecordHeader};

/// Deserialize the big-endian 54-byte header at the start of `wire`.
///
/// # Returns
/// - `Err(RecordError::Truncated)` if fewer than 54 bytes are available.
/// - `Err(RecordError::InvalidLength)` if the declared length is below 54.
#[inline]
pub fn parse_record_header(wire: &[u8]) -> Result<RecordHeader, RecordError> {
    if wire.len() < RecordHeader::LEN {
        return Err(RecordError::Truncated { have: wire.len(), need: RecordHeader::LEN });
    }

    // --- fixed offsets ---
    let mut off = 0;

    let record_length = BigEndian::read_i32(&wire[off..off + 4]);
    off += 4;

    let record_type = BigEndian::read_i32(&wire[off..off + 4]);
    off += 4;

    // Padding precedes hardware_id here; the legacy Python reader unpacked it after.
    off += HEADER_PADDING_LEN;

    let hardware_id = BigEndian::read_u64(&wire[off..off + 8]);
    off += 8;

    let timestamp = BigEndian::read_u64(&wire[off..off + 8]);
    off += 8;

    let unused_a = BigEndian::read_i16(&wire[off..off + 2]);
    off += 2;
    let unused_b = BigEndian::read_i16(&wire[off..off + 2]);
    off += 2;
    let unused_c = BigEndian::read_i16(&wire[off..off + 2]);
    off += 2;

    let unused_d = BigEndian::read_u64(&wire[off..off + 8]);
    off += 8;

    let word0 = BigEndian::read_u32(&wire[off..off + 4]);
    off += 4;

    let word1 = BigEndian::read_u32(&wire[off..off + 4]);
    off += 4;

    debug_assert_eq!(off, RecordHeader::LEN);

    if (record_length as i64) < RecordHeader::LEN as i64 {
        return Err(RecordError::InvalidLength { declared: record_length });
    }

    Ok(RecordHeader {
        record_length,
        record_type,
        hardware_id,
        timestamp,
        unused_a,
        unused_b,
        unused_c,
        unused_d,
        word0,
        word1,
    })
}

/// Decode one complete record from the start of `wire`.
///
/// Bytes past `record_length` are ignored, so a caller can walk a buffer of
/// concatenated records with `wire = &wire[rec.wire_len()..]`.
pub fn decode_record(wire: &[u8]) -> Result<RawRecord, RecordError> {
    let header = parse_record_header(wire)?;

    let total = header.record_length as usize;
    if wire.len() < total {
        return Err(RecordError::Truncated { have: wire.len(), need: total });
    }

    Ok(RawRecord {
        header,
        trailer: Bytes::copy_from_slice(&wire[RecordHeader::LEN..total]),
    })
}

/// Decode every record of an in-memory buffer, in order.
///
/// A trailing partial record is reported as `Truncated`.
pub fn decode_all(mut wire: &[u8]) -> Result<Vec<RawRecord>, RecordError> {
    let mut out = Vec::new();
    while !wire.is_empty() {
        let record = decode_record(wire)?;
        wire = &wire[record.wire_len()..];
        out.push(record);
    }
    Ok(out)
}
