//! Client configuration.
//!
//! Loaded from a TOML file; every section and key is optional and falls back
//! to the defaults of the smartcare deployment.
//!
//! ```toml
//! [node]
//! name = "X"
//! address = "78.46.130.194"
//! port = 10010
//!
//! [storage]
//! data_dir = "/home/alice/.local/share/smartcare"
//!
//! [feedback]
//! person_uri = "Alice"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::session::FeedbackHeader;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub node: NodeConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Header of every new feedback.
    #[serde(default)]
    pub feedback: FeedbackHeader,
}

/// Where the smart space node lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Name of the smart space to join.
    pub name: String,
    pub address: String,
    pub port: u16,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: "X".to_string(),
            address: "78.46.130.194".to_string(),
            port: 10010,
        }
    }
}

/// Local file names and their directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for all files below. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    pub questionnaire_file: String,
    pub feedback_file: String,
    pub preferences_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            questionnaire_file: "questionnaire.json".to_string(),
            feedback_file: "feedback.json".to_string(),
            preferences_file: "accountsettings.toml".to_string(),
        }
    }
}

impl StorageConfig {
    /// The configured data directory, or `<data dir>/smartcare`, or the
    /// working directory when the platform has no data directory.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join("smartcare"))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Full path of the preferences file.
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir().join(&self.preferences_file)
    }
}

impl Config {
    /// `<config dir>/smartcare/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(dir.join("smartcare").join("config.toml"))
    }

    /// Load the configuration at `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            info!(path = %path.display(), "config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!(path = %path.display(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.node.port, 10010);
        assert_eq!(config.storage.questionnaire_file, "questionnaire.json");
        assert_eq!(config.feedback.person_uri, "Student");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[node]\naddress = \"127.0.0.1\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.node.address, "127.0.0.1");
        assert_eq!(config.node.name, "X");
        assert_eq!(config.node.port, 10010);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().join("data"));
        config.feedback.person_uri = "Alice".to_string();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[node\nport = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn explicit_data_dir_wins() {
        let storage = StorageConfig {
            data_dir: Some(PathBuf::from("/tmp/sc")),
            ..StorageConfig::default()
        };
        assert_eq!(
            storage.preferences_path(),
            PathBuf::from("/tmp/sc/accountsettings.toml")
        );
    }
}
