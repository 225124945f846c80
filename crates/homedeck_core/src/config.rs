//! Dashboard config payloads and persistence collaborators.
//!
//! # Responsibility
//! - Define the `{apps, groups, navigation, theme}` wire shape.
//! - Parse and export the JSON text format used by import/export.
//! - Provide the save-target seam plus a JSON file implementation.
//!
//! # Invariants
//! - Parsing never partially applies; a malformed payload yields no config.
//! - `JsonFileStore::save` replaces the target file atomically.

use crate::model::app::App;
use crate::model::group::Group;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from config parsing, exporting and persistence.
#[derive(Debug)]
pub enum ConfigError {
    /// Import text is not a valid config payload.
    Parse(serde_json::Error),
    /// Export serialization failed.
    Serialize(serde_json::Error),
    /// Filesystem failure inside a store implementation.
    Io(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid config payload: {err}"),
            ConfigError::Serialize(err) => write!(f, "cannot serialize config: {err}"),
            ConfigError::Io(err) => write!(f, "config store io error: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Parse(err) | ConfigError::Serialize(err) => Some(err),
            ConfigError::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

/// Full dashboard configuration as saved to disk and shipped by import.
///
/// `navigation` and `theme` are owned by their own editors; this crate
/// carries them through import, export and save untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub apps: Vec<App>,
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Keybinding and navigation payload, passed through opaquely.
    #[serde(default)]
    pub navigation: Value,
    /// Theme payload, passed through opaquely.
    #[serde(default)]
    pub theme: Value,
}

/// Parses an import payload or a stored config file.
pub fn parse_config(text: &str) -> ConfigResult<DashboardConfig> {
    serde_json::from_str(text).map_err(ConfigError::Parse)
}

/// Serializes a config to the pretty-printed export format.
pub fn export_config(config: &DashboardConfig) -> ConfigResult<String> {
    serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)
}

/// Save target the session writes through once the user confirms.
///
/// The session never persists on its own schedule; implementations decide
/// where and how a confirmed snapshot lands.
pub trait ConfigStore {
    /// Persists one full config snapshot.
    fn save(&mut self, config: &DashboardConfig) -> ConfigResult<()>;
}

/// JSON file store writing through a temp file in the target directory.
///
/// The rename at the end is what makes the write atomic; a crash mid-write
/// leaves the previous config intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored config; `Ok(None)` when no file exists yet.
    pub fn load(&self) -> ConfigResult<Option<DashboardConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        parse_config(&text).map(Some)
    }
}

impl ConfigStore for JsonFileStore {
    fn save(&mut self, config: &DashboardConfig) -> ConfigResult<()> {
        let text = export_config(config)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".homedeck-config-")
            .tempfile_in(&dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|err| ConfigError::Io(err.error))?;
        info!(
            "event=config_write module=config status=ok path={} bytes={}",
            self.path.display(),
            text.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_payload_parses_with_defaults() {
        let config = parse_config("{}").expect("empty object parses");
        assert!(config.apps.is_empty());
        assert!(config.groups.is_empty());
        assert!(config.navigation.is_null());
        assert!(config.theme.is_null());
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        let err = parse_config("{\"apps\": [").expect_err("truncated json rejected");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn export_contains_top_level_sections() {
        let text = export_config(&DashboardConfig::default()).expect("default exports");
        assert!(text.contains("\"apps\""));
        assert!(text.contains("\"groups\""));
        assert!(text.contains("\"navigation\""));
        assert!(text.contains("\"theme\""));
    }
}
