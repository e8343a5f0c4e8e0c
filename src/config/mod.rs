//! Configuration system for nestseek.
//!
//! This module provides the configuration structure for the `nestseek` binary
//! with sensible defaults and support for serialization/deserialization via
//! serde. Configuration is loaded from a TOML file and merged with
//! command-line arguments, which take precedence.
//!
//! # Example
//!
//! ```
//! use nestseek::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.log_level, "warn");
//! assert_eq!(config.max_results, 0);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: "json".to_string(),
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the nestseek application.
///
/// # Fields
///
/// * `log_level` - Default tracing filter when `RUST_LOG` is unset (default: "warn")
/// * `output_format` - How matches are printed: "yaml" or "json" (default: "yaml")
/// * `max_results` - Stop after this many matches, 0 for no limit (default: 0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default tracing filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output rendering: "yaml" or "json"
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Maximum number of matches to print (0 = unlimited)
    #[serde(default)]
    pub max_results: usize,
}

/// Returns the default log level.
fn default_log_level() -> String {
    "warn".to_string()
}

/// Returns the default output format.
fn default_output_format() -> String {
    "yaml".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_format: default_output_format(),
            max_results: 0,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/nestseek/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("nestseek");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file gives the default configuration. A file that cannot be
    /// read or parsed is an error, so the caller can report it once logging
    /// is set up and continue with defaults.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`; a missing file gives defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.output_format, "yaml");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_results = \"lots\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }
}
