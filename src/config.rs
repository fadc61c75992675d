// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for cnref
//!
//! Loads configuration from .cnrefrc.toml in current directory or ~/.config/cnref/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::search::DEFAULT_PAGE_SIZE;

/// Output format for results (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration loaded from .cnrefrc.toml or ~/.config/cnref/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search results per page
    pub page_size: Option<usize>,
    /// Default output format (text or json)
    pub default_format: Option<String>,
    /// Preference file location
    pub store_path: Option<PathBuf>,
    /// JSON array of codenames used instead of the built-in catalog
    pub data_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .cnrefrc.toml in current directory
    /// 2. ~/.config/cnref/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_from_path(Path::new(".cnrefrc.toml")) {
            return config;
        }

        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("cnref").join("config.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config");
                None
            }
        }
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.default_format
            .as_ref()
            .and_then(|s| match s.to_lowercase().as_str() {
                "json" => Some(ConfigOutputFormat::Json),
                "text" => Some(ConfigOutputFormat::Text),
                _ => None,
            })
    }

    /// Merge CLI page size with config (CLI wins)
    pub fn merge_page_size(&self, cli_value: Option<usize>) -> usize {
        cli_value
            .or(self.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .max(1)
    }

    /// Merge CLI store path with config (CLI wins)
    pub fn merge_store_path(&self, cli_value: Option<PathBuf>) -> Option<PathBuf> {
        cli_value.or_else(|| self.store_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_known_fields() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "page_size = 25\ndefault_format = \"JSON\"\ndata_path = \"names.json\"\n",
        )
        .expect("write");

        let config = Config::load_from_path(&path).expect("config");
        assert_eq!(config.page_size, Some(25));
        assert_eq!(config.output_format(), Some(ConfigOutputFormat::Json));
        assert_eq!(config.data_path, Some(PathBuf::from("names.json")));
    }

    #[test]
    fn invalid_toml_is_ignored() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = [").expect("write");
        assert!(Config::load_from_path(&path).is_none());
    }

    #[test]
    fn cli_values_win() {
        let config = Config {
            page_size: Some(5),
            ..Config::default()
        };
        assert_eq!(config.merge_page_size(Some(7)), 7);
        assert_eq!(config.merge_page_size(None), 5);
        assert_eq!(Config::default().merge_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(config.merge_page_size(Some(0)), 1);
    }
}
