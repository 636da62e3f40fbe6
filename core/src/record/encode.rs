//! src/record/encode.rs
//!
//! Record encoding, the exact inverse of `decode.rs`.
//! Used to produce fixture files; the reader itself never writes.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::HEADER_PADDING_LEN;
use crate::record::types::{RecordError, RecordHeader};

/// Serialize a header into its 54-byte big-endian form.
pub fn encode_record_header(h: &RecordHeader) -> [u8; RecordHeader::LEN] {
    let mut buf = [0u8; RecordHeader::LEN];
    let mut off = 0;

    BigEndian::write_i32(&mut buf[off..off + 4], h.record_length);
    off += 4;
    BigEndian::write_i32(&mut buf[off..off + 4], h.record_type);
    off += 4;

    // padding stays zero
    off += HEADER_PADDING_LEN;

    BigEndian::write_u64(&mut buf[off..off + 8], h.hardware_id);
    off += 8;
    BigEndian::write_u64(&mut buf[off..off + 8], h.timestamp);
    off += 8;

    BigEndian::write_i16(&mut buf[off..off + 2], h.unused_a);
    off += 2;
    BigEndian::write_i16(&mut buf[off..off + 2], h.unused_b);
    off += 2;
    BigEndian::write_i16(&mut buf[off..off + 2], h.unused_c);
    off += 2;
    BigEndian::write_u64(&mut buf[off..off + 8], h.unused_d);
    off += 8;

    BigEndian::write_u32(&mut buf[off..off + 4], h.word0);
    off += 4;
    BigEndian::write_u32(&mut buf[off..off + 4], h.word1);
    off += 4;

    debug_assert_eq!(off, RecordHeader::LEN);
    buf
}

/// Serialize a full record (header + trailer).
///
/// `record_length` must equal `54 + trailer.len()`.
pub fn encode_record(h: &RecordHeader, trailer: &[u8]) -> Result<Vec<u8>, RecordError> {
    let expected = RecordHeader::LEN + trailer.len();
    if h.record_length < 0 || h.record_length as usize != expected {
        return Err(RecordError::Malformed(format!(
            "record_length {} does not match header + trailer ({})",
            h.record_length, expected
        )));
    }

    let mut out = Vec::with_capacity(expected);
    out.extend_from_slice(&encode_record_header(h));
    out.extend_from_slice(trailer);
    Ok(out)
}
