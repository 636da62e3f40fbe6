//! config.rs
//! Reader configuration.
//!
//! Defaults match the layout the DAQ writes: `.dat` files, metrics off.
//! A config can be built in code or loaded from a JSON file:
//!
//! ```json
//! { "data_extension": "dat", "collect_metrics": true, "nickname_path": "/data/nicknames.txt" }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DATA_EXTENSION;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Extension (without the dot) of data files inside a hub directory.
    pub data_extension: String,

    /// Whether to time decode stages.
    /// Counters are always kept; timers only when this is set.
    pub collect_metrics: bool,

    /// Sensor table used by `load_stream` when no lookup is supplied.
    pub nickname_path: Option<PathBuf>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            data_extension: DEFAULT_DATA_EXTENSION.to_string(),
            collect_metrics: false,
            nickname_path: None,
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        self.data_extension = ext.trim_start_matches('.').to_string();
        self
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.collect_metrics = enabled;
        self
    }

    pub fn with_nickname_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.nickname_path = Some(path.into());
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_extension.is_empty() {
            return Err(ConfigError::Invalid("data_extension must not be empty".into()));
        }
        Ok(())
    }

    /// Whether `path` names a data file under this config.
    pub fn is_data_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.data_extension)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let c = ReaderConfig::from_json_str(r#"{ "collect_metrics": true }"#).unwrap();
        assert_eq!(c.data_extension, "dat");
        assert!(c.collect_metrics);
        assert!(c.nickname_path.is_none());
    }

    #[test]
    fn empty_extension_is_rejected() {
        let err = ReaderConfig::from_json_str(r#"{ "data_extension": "" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn loads_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reader.json");
        fs::write(
            &path,
            r#"{ "data_extension": "hs", "collect_metrics": true, "nickname_path": "/data/nicknames.txt" }"#,
        )
        .unwrap();

        let c = ReaderConfig::from_json_file(&path).unwrap();
        assert_eq!(c.data_extension, "hs");
        assert!(c.collect_metrics);
        assert_eq!(c.nickname_path.as_deref(), Some(Path::new("/data/nicknames.txt")));
    }

    #[test]
    fn json_file_errors_keep_their_kind() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ReaderConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let broken = ReaderConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(broken, ConfigError::Json(_)));
    }

    #[test]
    fn extension_match_is_exact() {
        let c = ReaderConfig::default().with_data_extension(".dat");
        assert!(c.is_data_file(Path::new("HitSpool-1.dat")));
        assert!(!c.is_data_file(Path::new("HitSpool-1.dat.bz2")));
        assert!(!c.is_data_file(Path::new("info.txt")));
    }
}
