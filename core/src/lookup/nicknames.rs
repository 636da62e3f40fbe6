//! lookup/nicknames.rs
//! File-backed sensor table ("nicknames" format).
//!
//! Each useful line starts with:
//! `<mbid:12 hex> <dom_id:8> <name> <HH-CC> ...`
//! Anything else (comments, headers, blank lines) is ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use regex::Regex;
use tracing::{debug, info};

use crate::lookup::types::{LookupError, SensorInfo, SensorLookup};

const ROW_PATTERN: &str = r"^([0-9a-f]{12})\s+(\w{8})\s+(\w+)\s+([0-9A-Z]{2}-[0-9]{2})";
const MBID_PATTERN: &str = r"^[0-9a-f]{12}";
const DOM_ID_PATTERN: &str = r"^[ATUX][EP][0-9][HPY][0-9]{4}";
const LOCATION_PATTERN: &str = r"^\w{2}-[0-9]{2}";

/// Key classifiers for `NicknameTable::lookup`.
#[derive(Debug, Clone)]
struct KeyPatterns {
    mbid: Regex,
    dom_id: Regex,
    location: Regex,
}

impl KeyPatterns {
    fn compile() -> Result<Self, LookupError> {
        Ok(Self {
            mbid: Regex::new(MBID_PATTERN)?,
            dom_id: Regex::new(DOM_ID_PATTERN)?,
            location: Regex::new(LOCATION_PATTERN)?,
        })
    }
}

/// Immutable sensor table indexed by every identifier it carries.
#[derive(Debug, Clone)]
pub struct NicknameTable {
    rows: Vec<SensorInfo>,
    by_mbid: HashMap<String, usize>,
    by_dom_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    by_location: HashMap<String, usize>,
    patterns: KeyPatterns,
}

impl NicknameTable {
    /// Load a table from a nicknames file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let table = Self::parse(File::open(path)?)?;
        info!(path = %path.display(), sensors = table.len(), "loaded sensor table");
        Ok(table)
    }

    /// Parse a table from any reader.
    pub fn parse<R: Read>(reader: R) -> Result<Self, LookupError> {
        let row = Regex::new(ROW_PATTERN)?;
        let mut rows = Vec::new();

        for (n, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            match row.captures(&line) {
                Some(caps) => rows.push(SensorInfo {
                    mbid: caps[1].to_string(),
                    dom_id: caps[2].to_string(),
                    name: caps[3].to_string(),
                    location: caps[4].to_string(),
                }),
                None => debug!(line = n + 1, "skipping non-sensor line"),
            }
        }

        Self::from_rows(rows)
    }

    /// Build a table from rows; later rows win on duplicate keys.
    pub fn from_rows(rows: Vec<SensorInfo>) -> Result<Self, LookupError> {
        let mut by_mbid = HashMap::with_capacity(rows.len());
        let mut by_dom_id = HashMap::with_capacity(rows.len());
        let mut by_name = HashMap::with_capacity(rows.len());
        let mut by_location = HashMap::with_capacity(rows.len());

        for (i, r) in rows.iter().enumerate() {
            by_mbid.insert(r.mbid.clone(), i);
            by_dom_id.insert(r.dom_id.clone(), i);
            by_name.insert(r.name.clone(), i);
            by_location.insert(r.location.clone(), i);
        }

        Ok(Self {
            rows,
            by_mbid,
            by_dom_id,
            by_name,
            by_location,
            patterns: KeyPatterns::compile()?,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SensorInfo] {
        &self.rows
    }

    /// Look a sensor up by whatever key is given.
    ///
    /// The key kind is guessed from its shape: mainboard id, then DOM id, then
    /// location; anything else is treated as a name.
    pub fn lookup(&self, key: &str) -> Result<&SensorInfo, LookupError> {
        let index = if self.patterns.mbid.is_match(key) {
            &self.by_mbid
        } else if self.patterns.dom_id.is_match(key) {
            &self.by_dom_id
        } else if self.patterns.location.is_match(key) {
            &self.by_location
        } else {
            &self.by_name
        };

        index
            .get(key)
            .map(|&i| &self.rows[i])
            .ok_or_else(|| LookupError::NotFound { key: key.to_string() })
    }
}

impl SensorLookup for NicknameTable {
    fn resolve(&self, mbid_hex: &str) -> Result<&SensorInfo, LookupError> {
        self.by_mbid
            .get(mbid_hex)
            .map(|&i| &self.rows[i])
            .ok_or_else(|| LookupError::NotFound { key: mbid_hex.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# mbid        domid    name            loc
0123456789ab  UP5P0001 Alpha_Centauri  21-30 extra columns
a1b2c3d4e5f6  TP6H0002 Betelgeuse      05-01
not a sensor line
";

    #[test]
    fn parses_only_matching_rows() {
        let table = NicknameTable::parse(TABLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].location, "21-30");
    }

    #[test]
    fn resolve_by_mbid() {
        let table = NicknameTable::parse(TABLE.as_bytes()).unwrap();
        let info = table.resolve("a1b2c3d4e5f6").unwrap();
        assert_eq!(info.name, "Betelgeuse");
        assert_eq!(info.hub_number(), Some(5));
        assert_eq!(info.channel_number(), Some(1));
    }

    #[test]
    fn resolve_unknown_is_not_found() {
        let table = NicknameTable::parse(TABLE.as_bytes()).unwrap();
        let err = table.resolve("ffffffffffff").unwrap_err();
        assert!(matches!(err, LookupError::NotFound { ref key } if key == "ffffffffffff"));
    }

    #[test]
    fn smart_lookup_dispatches_on_key_shape() {
        let table = NicknameTable::parse(TABLE.as_bytes()).unwrap();
        assert_eq!(table.lookup("0123456789ab").unwrap().name, "Alpha_Centauri");
        assert_eq!(table.lookup("TP6H0002").unwrap().name, "Betelgeuse");
        assert_eq!(table.lookup("21-30").unwrap().dom_id, "UP5P0001");
        assert_eq!(table.lookup("Betelgeuse").unwrap().location, "05-01");
    }
}
