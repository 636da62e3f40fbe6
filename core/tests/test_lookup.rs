// Sensor table tests against files on disk.

mod common;

use std::fs;

use hitspool_core::lookup::{LookupError, NicknameTable, SensorLookup};
use hitspool_core::utils::format_hardware_id;

#[test]
fn loads_nicknames_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nicknames.txt");
    let text = format!("mbid domid name location\n{}\n", common::nicknames_text());
    fs::write(&path, text).unwrap();

    let table = NicknameTable::load(&path).unwrap();
    assert_eq!(table.len(), 2);

    let a = table.resolve(&format_hardware_id(common::SENSOR_A)).unwrap();
    assert_eq!(a.location, "21-30");
    assert_eq!(a.hub_number(), Some(21));
    assert_eq!(a.channel_number(), Some(30));
}

#[test]
fn hardware_ids_are_zero_padded_to_twelve_digits() {
    assert_eq!(format_hardware_id(common::SENSOR_A), "00001111aaaa");
    let table = NicknameTable::from_rows(common::sensor_rows()).unwrap();
    assert!(table.resolve(&format_hardware_id(common::SENSOR_B)).is_ok());
    // unpadded keys never match
    assert!(table.resolve("2222bbbb").is_err());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = NicknameTable::load(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, LookupError::Io(_)));
}

#[test]
fn rows_with_bad_shape_are_ignored() {
    let text = "\
00001111aaaa UP5P0001 Alpha 21-30
00001111AAAA UP5P0002 Upper 21-31
00002222bbbb TP6H02 Short 05-01
00003333cccc TP6H0003 NoLoc
";
    let table = NicknameTable::parse(text.as_bytes()).unwrap();
    assert_eq!(table.len(), 1);
    assert!(!table.is_empty());
}

#[test]
fn smart_lookup_by_every_key() {
    let table = NicknameTable::from_rows(common::sensor_rows()).unwrap();
    for key in ["00002222bbbb", "TP6H0002", "05-01", "Beta"] {
        assert_eq!(table.lookup(key).unwrap().name, "Beta", "key {key}");
    }
    assert!(matches!(table.lookup("Gamma"), Err(LookupError::NotFound { .. })));
}

#[test]
fn shared_lookup_is_usable_across_threads() {
    let lookup = common::lookup();
    let key = format_hardware_id(common::SENSOR_A);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lookup = lookup.clone();
            let key = key.clone();
            std::thread::spawn(move || lookup.resolve(&key).map(|s| s.location.clone()).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), "21-30");
    }
}
