//! Configuration loading for the showcase.
//!
//! All settings are loaded from a TOML configuration file. Every section is
//! optional and falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use topic_events::ValidationMode;

use crate::claims::DEFAULT_CLAIM_CAP;

/// Complete showcase configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    /// Where topic documents live
    #[serde(default)]
    pub data: DataConfig,
    /// Document validation settings
    #[serde(default)]
    pub loading: LoadingConfig,
    /// Ordering game settings
    #[serde(default)]
    pub game: GameConfig,
}

impl ShowcaseConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }

    /// Path of the catalog document.
    pub fn index_path(&self) -> PathBuf {
        self.data.dir.join(&self.data.index_file)
    }
}

/// Data location settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the catalog and one sub-directory per topic
    pub dir: PathBuf,
    /// Catalog file name, relative to `dir`
    pub index_file: String,
    /// Topic document name inside each topic directory, used when indexing
    pub topic_file: String,
    /// Cover image name inside each topic directory, used when indexing
    pub cover_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            index_file: "index.json".to_string(),
            topic_file: "new_event.json".to_string(),
            cover_file: "cover.png".to_string(),
        }
    }
}

/// Document loading settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// How strictly bucket partitions are checked
    pub validation: ValidationMode,
}

/// Ordering game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum claims shown in a topic tooltip
    pub max_topic_claims: usize,
    /// Fixed seed for shuffles; entropy is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_topic_claims: DEFAULT_CLAIM_CAP,
            seed: None,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    IoError(std::io::Error),
    /// Error parsing TOML config
    TomlError(toml::de::Error),
}

/// Error that can occur during TOML serialization.
#[derive(Debug)]
pub struct TomlSerializeError(pub toml::ser::Error);

impl std::fmt::Display for TomlSerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TOML serialize error: {}", self.0)
    }
}

impl std::error::Error for TomlSerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
        }
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Showcase Configuration

[data]
dir = "data"
index_file = "index.json"
topic_file = "new_event.json"
cover_file = "cover.png"

[loading]
# "strict" rejects documents whose buckets do not partition the events,
# "lenient" loads them and logs each defect
validation = "strict"

[game]
max_topic_claims = 12
# seed = 42
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShowcaseConfig::default();

        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.data.index_file, "index.json");
        assert_eq!(config.loading.validation, ValidationMode::Strict);
        assert_eq!(config.game.max_topic_claims, 12);
        assert!(config.game.seed.is_none());
    }

    #[test]
    fn test_index_path() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.index_path(), PathBuf::from("data").join("index.json"));
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [data]
            dir = "/srv/topics"

            [loading]
            validation = "lenient"

            [game]
            max_topic_claims = 6
            seed = 7
        "#;

        let config = ShowcaseConfig::from_str(toml).unwrap();

        assert_eq!(config.data.dir, PathBuf::from("/srv/topics"));
        assert_eq!(config.loading.validation, ValidationMode::Lenient);
        assert_eq!(config.game.max_topic_claims, 6);
        assert_eq!(config.game.seed, Some(7));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [game]
            seed = 3
        "#;

        let config = ShowcaseConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.game.seed, Some(3));
        // Default values
        assert_eq!(config.game.max_topic_claims, 12);
        assert_eq!(config.data.index_file, "index.json");
        assert_eq!(config.loading.validation, ValidationMode::Strict);
    }

    #[test]
    fn test_unknown_validation_mode_is_rejected() {
        let toml = r#"
            [loading]
            validation = "paranoid"
        "#;
        assert!(ShowcaseConfig::from_str(toml).is_err());
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config = ShowcaseConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, ShowcaseConfig::default());
    }

    #[test]
    fn test_config_to_toml() {
        let toml = ShowcaseConfig::default().to_toml().unwrap();

        assert!(toml.contains("[data]"));
        assert!(toml.contains("[loading]"));
        assert!(toml.contains("[game]"));
        assert!(toml.contains(r#"validation = "strict""#));
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("showcase.toml");
        std::fs::write(&path, "[game]\nmax_topic_claims = 3\n").unwrap();

        let config = ShowcaseConfig::from_file(&path).unwrap();
        assert_eq!(config.game.max_topic_claims, 3);

        let missing = ShowcaseConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }
}
