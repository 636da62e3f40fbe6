// Shared fixtures: record bytes, hub directories on disk, and a small sensor table.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hitspool_core::lookup::{NicknameTable, SensorInfo, SharedLookup};
use hitspool_core::record::{encode_record, RecordHeader};
use tracing_subscriber::EnvFilter;

pub const SENSOR_A: u64 = 0x0000_1111_aaaa;
pub const SENSOR_B: u64 = 0x0000_2222_bbbb;
pub const UNKNOWN_SENSOR: u64 = 0x0000_dead_beef;

/// Complete record bytes with a small trailer.
pub fn record(hardware_id: u64, timestamp: u64, word0: u32, word1: u32, trailer: &[u8]) -> Vec<u8> {
    let header = RecordHeader {
        record_length: (RecordHeader::LEN + trailer.len()) as i32,
        word0,
        word1,
        ..RecordHeader::test_header(hardware_id, timestamp)
    };
    encode_record(&header, trailer).unwrap()
}

/// Plain record from sensor A.
pub fn hit_record(timestamp: u64) -> Vec<u8> {
    record(SENSOR_A, timestamp, 0, 0, &[0xAB; 6])
}

/// Record whose header declares `declared` bytes but carries only `actual` trailer bytes.
pub fn short_record(timestamp: u64, declared: usize, actual: usize) -> Vec<u8> {
    let header = RecordHeader {
        record_length: declared as i32,
        ..RecordHeader::test_header(SENSOR_A, timestamp)
    };
    let mut bytes = hitspool_core::record::encode_record_header(&header).to_vec();
    bytes.extend(std::iter::repeat(0u8).take(actual));
    bytes
}

/// Route library logs to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn write_file(dir: &Path, name: &str, records: &[Vec<u8>]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, records.concat()).unwrap();
    path
}

/// One data file per entry, each holding hits at the given timestamps.
pub fn write_hub(dir: &Path, files: &[(&str, &[u64])]) {
    for (name, timestamps) in files {
        let records: Vec<_> = timestamps.iter().map(|&ts| hit_record(ts)).collect();
        write_file(dir, name, &records);
    }
}

pub fn sensor_rows() -> Vec<SensorInfo> {
    vec![
        SensorInfo {
            mbid: format!("{:012x}", SENSOR_A),
            dom_id: "UP5P0001".into(),
            name: "Alpha".into(),
            location: "21-30".into(),
        },
        SensorInfo {
            mbid: format!("{:012x}", SENSOR_B),
            dom_id: "TP6H0002".into(),
            name: "Beta".into(),
            location: "05-01".into(),
        },
    ]
}

pub fn lookup() -> SharedLookup {
    Arc::new(NicknameTable::from_rows(sensor_rows()).unwrap())
}

/// Nicknames file matching `sensor_rows`.
pub fn nicknames_text() -> String {
    sensor_rows()
        .iter()
        .map(|r| format!("{} {} {} {}\n", r.mbid, r.dom_id, r.name, r.location))
        .collect()
}
