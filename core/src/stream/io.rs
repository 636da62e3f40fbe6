// ## Hub directory listing + short-read helpers

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::config::ReaderConfig;

const READ_CHUNK: usize = 64 * 1024;

/// List the data files of one hub directory, sorted by file name.
///
/// Sub-directories and files with another extension are ignored.
pub fn list_data_files(dir: &Path, config: &ReaderConfig) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if config.is_data_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read up to `len` bytes, stopping early only at EOF.
///
/// A short result means the reader ran dry; an empty one means it was already dry.
pub fn read_exact_or_eof<R: Read>(r: &mut R, len: usize) -> io::Result<Bytes> {
    // Declared lengths come from the file, so grow the buffer as data arrives.
    let mut buf = Vec::with_capacity(len.min(READ_CHUNK));
    r.take(len as u64).read_to_end(&mut buf)?;
    Ok(Bytes::from(buf))
}
