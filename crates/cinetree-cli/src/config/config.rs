//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB access settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB access configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API key. Empty means "read `TMDB_API_KEY`".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// Default response language (e.g. `en-US`). Empty sends none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    /// Service root override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

impl TmdbConfig {
    /// Picks the API key: `flag`, then the config file. Empty lets the
    /// session registry fall back to the environment.
    #[must_use]
    pub fn resolve_api_key(&self, flag: Option<&str>) -> String {
        flag.filter(|key| !key.is_empty())
            .map_or_else(|| self.api_key.clone(), String::from)
    }

    /// Picks the response language: `flag`, then the config file.
    #[must_use]
    pub fn resolve_language(&self, flag: Option<&str>) -> String {
        flag.map_or_else(|| self.language.clone(), String::from)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.api_key.is_empty());
        assert!(config.tmdb.base_url.is_none());
    }

    #[test]
    fn test_parse_tmdb_table() {
        // Arrange
        let text = r#"
            [tmdb]
            api_key = "abc"
            language = "ja-JP"
            base_url = "http://localhost:8080/3/"
        "#;

        // Act
        let config: AppConfig = toml::from_str(text).unwrap();

        // Assert
        assert_eq!(config.tmdb.api_key, "abc");
        assert_eq!(config.tmdb.language, "ja-JP");
        assert_eq!(config.tmdb.base_url.as_deref(), Some("http://localhost:8080/3/"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: String::from("abc"),
                language: String::from("en-US"),
                base_url: None,
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_precedence() {
        // Arrange
        let config = TmdbConfig {
            api_key: String::from("from-file"),
            ..TmdbConfig::default()
        };

        // Act & Assert
        assert_eq!(config.resolve_api_key(Some("from-flag")), "from-flag");
        assert_eq!(config.resolve_api_key(Some("")), "from-file");
        assert_eq!(config.resolve_api_key(None), "from-file");
        assert_eq!(TmdbConfig::default().resolve_api_key(None), "");
    }

    #[test]
    fn test_language_precedence() {
        // Arrange
        let config = TmdbConfig {
            language: String::from("ja-JP"),
            ..TmdbConfig::default()
        };

        // Act & Assert
        assert_eq!(config.resolve_language(Some("en")), "en");
        assert_eq!(config.resolve_language(None), "ja-JP");
    }
}
