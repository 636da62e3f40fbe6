// ## loader.rs: stable public entry points
//
// Turns a list of per-hub directories (one hub each, as handed over by the
// archive extraction step) into a single merged stream.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::ReaderConfig;
use crate::lookup::{NicknameTable, SharedLookup};
use crate::record::Hit;
use crate::stream::filter::HitFilter;
use crate::stream::hub::HubStream;
use crate::stream::merge::MergeStream;
use crate::types::HitspoolError;

/// Resolve the lookup to use: the one given, or the table named in the config.
pub fn resolve_lookup(lookup: Option<SharedLookup>, config: &ReaderConfig) -> Result<SharedLookup, HitspoolError> {
    if let Some(lookup) = lookup {
        return Ok(lookup);
    }
    match &config.nickname_path {
        Some(path) => Ok(Arc::new(NicknameTable::load(path)?)),
        None => Err(HitspoolError::Validation(
            "no sensor lookup given and no nickname_path configured".into(),
        )),
    }
}

/// Open one hub stream per directory, each with its own copy of `filter`.
pub fn open_hubs<P, F>(
    hub_dirs: &[P],
    lookup: &SharedLookup,
    filter: F,
    config: &ReaderConfig,
) -> Result<Vec<HubStream>, HitspoolError>
where
    P: AsRef<Path>,
    F: HitFilter + Clone + 'static,
{
    hub_dirs
        .iter()
        .map(|dir| HubStream::open(dir, Arc::clone(lookup), filter.clone(), config))
        .collect()
}

/// Time-ordered stream of every hit in `hub_dirs` that passes `filter`.
pub fn load_stream<P, F>(
    hub_dirs: &[P],
    lookup: Option<SharedLookup>,
    filter: F,
    config: &ReaderConfig,
) -> Result<MergeStream<HubStream>, HitspoolError>
where
    P: AsRef<Path>,
    F: HitFilter + Clone + 'static,
{
    config.validate()?;
    let lookup = resolve_lookup(lookup, config)?;
    let hubs = open_hubs(hub_dirs, &lookup, filter, config)?;
    info!(hubs = hubs.len(), "loading hitspool stream");
    MergeStream::with_metrics(hubs, config.collect_metrics)
}

/// Collect the whole merged stream into memory.
pub fn load<P, F>(
    hub_dirs: &[P],
    lookup: Option<SharedLookup>,
    filter: F,
    config: &ReaderConfig,
) -> Result<Vec<Hit>, HitspoolError>
where
    P: AsRef<Path>,
    F: HitFilter + Clone + 'static,
{
    load_stream(hub_dirs, lookup, filter, config)?.collect()
}

/// Sub-directories of `root`, sorted; each is expected to hold one hub.
pub fn list_hub_dirs(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, HitspoolError> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}
