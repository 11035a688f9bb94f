//! Configuration management for sitekit

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
    /// Storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// Author name written to every post
    pub author: String,
    /// Channel language
    pub language: String,
    /// Channel description
    pub description: String,
    /// Generator tag value
    pub generator: String,
    /// Site URL used when a site has neither a production nor a dev URL
    pub fallback_url: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "wxr".to_string(),
            author: "admin".to_string(),
            language: "en-US".to_string(),
            description: "Exported from Content Entry System".to_string(),
            generator: "Content Entry System WordPress Exporter".to_string(),
            fallback_url: "https://example.com".to_string(),
        }
    }
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory (platform data dir when unset)
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.default_format, "wxr");
        assert_eq!(config.export.author, "admin");
        assert_eq!(config.export.fallback_url, "https://example.com");
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[export]"));

        let config2 = Config::from_toml(&toml).unwrap();
        assert_eq!(config.export.language, config2.export.language);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml("[export]\nauthor = \"editor\"\n").unwrap();
        assert_eq!(config.export.author, "editor");
        assert_eq!(config.export.language, "en-US");
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("missing.toml")).unwrap();
        assert_eq!(config.export.default_format, "wxr");
    }

    #[test]
    fn test_load_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "export = 5").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
