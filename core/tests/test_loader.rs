// Entry-point tests: directory lists in, merged hits out.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use hitspool_core::prelude::*;
use hitspool_core::stream::filter::time_window;
use hitspool_core::stream::loader::list_hub_dirs;

fn make_hubs(root: &Path) -> Vec<PathBuf> {
    let hubs = [
        ("ichub21", &[("HitSpool-1.dat", &[10u64, 40][..]), ("HitSpool-2.dat", &[70][..])][..]),
        ("ichub05", &[("HitSpool-1.dat", &[20u64, 50, 60][..])][..]),
    ];
    hubs.iter()
        .map(|(name, files)| {
            let dir = root.join(name);
            fs::create_dir(&dir).unwrap();
            common::write_hub(&dir, files);
            dir
        })
        .collect()
}

fn timestamps(hits: &[Hit]) -> Vec<u64> {
    hits.iter().map(Hit::timestamp).collect()
}

#[test]
fn load_returns_every_hit_in_time_order() {
    let root = tempfile::tempdir().unwrap();
    let hubs = make_hubs(root.path());

    let hits = load(&hubs, Some(common::lookup()), accept_all(), &ReaderConfig::default()).unwrap();
    assert_eq!(timestamps(&hits), [10, 20, 40, 50, 60, 70]);
    assert!(hits.iter().all(|h| h.sensor_id() == "21-30"));
}

#[test]
fn filter_is_applied_per_hub() {
    let root = tempfile::tempdir().unwrap();
    let hubs = make_hubs(root.path());

    let hits = load(&hubs, Some(common::lookup()), time_window(20, 60), &ReaderConfig::default()).unwrap();
    assert_eq!(timestamps(&hits), [20, 40, 50]);
}

#[test]
fn closure_filter_is_cloned_into_each_hub() {
    let root = tempfile::tempdir().unwrap();
    let hubs = make_hubs(root.path());

    let later_than_30 = |hit: &Hit| hit.timestamp() > 30;
    let hits = load(&hubs, Some(common::lookup()), later_than_30, &ReaderConfig::default()).unwrap();
    assert_eq!(timestamps(&hits), [40, 50, 60, 70]);
}

#[test]
fn nickname_path_from_config_is_used() {
    let root = tempfile::tempdir().unwrap();
    let hubs = make_hubs(root.path());
    let nicknames = root.path().join("nicknames.txt");
    fs::write(&nicknames, common::nicknames_text()).unwrap();

    let config = ReaderConfig::default().with_nickname_path(&nicknames).with_metrics(true);
    let mut stream = load_stream(&hubs, None, accept_all(), &config).unwrap();

    assert_eq!(stream.peek_timestamp(), Some(10));
    let hits: Vec<Hit> = stream.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(hits.len(), 6);

    let snap = stream.snapshot();
    assert_eq!(snap.counters.hits_yielded, 6);
    assert_eq!(snap.counters.files_opened, 3);
    assert!(snap.sanity_check());
}

#[test]
fn missing_lookup_is_a_validation_error() {
    let root = tempfile::tempdir().unwrap();
    let hubs = make_hubs(root.path());

    let err = load_stream(&hubs, None, accept_all(), &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, HitspoolError::Validation(_)));
}

#[test]
fn invalid_config_is_rejected_before_opening() {
    let root = tempfile::tempdir().unwrap();
    let hubs = make_hubs(root.path());

    let config = ReaderConfig { data_extension: String::new(), ..ReaderConfig::default() };
    let err = load(&hubs, Some(common::lookup()), accept_all(), &config).unwrap_err();
    assert!(matches!(err, HitspoolError::Config(_)));
}

#[test]
fn no_hubs_gives_no_hits() {
    let hubs: Vec<PathBuf> = Vec::new();
    let hits = load(&hubs, Some(common::lookup()), accept_all(), &ReaderConfig::default()).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn hub_directories_are_listed_sorted() {
    let root = tempfile::tempdir().unwrap();
    make_hubs(root.path());
    fs::write(root.path().join("stray.dat"), b"").unwrap();

    let dirs = list_hub_dirs(root.path()).unwrap();
    let names: Vec<_> = dirs.iter().map(|d| d.file_name().unwrap().to_string_lossy().into_owned()).collect();
    assert_eq!(names, ["ichub05", "ichub21"]);
}
