//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the czml-config.toml file.
//! It controls how documents are written out and the opacity given to hex colors
//! that do not spell out an alpha channel.

use crate::color::DEFAULT_HEX_OPACITY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default location of the configuration file.
pub const CONFIG_FILE: &str = "czml-config.toml";

/// Application configuration loaded from czml-config.toml
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// How documents are written out
    #[serde(default)]
    pub output: OutputConfig,
    /// Color parsing defaults
    #[serde(default)]
    pub colors: ColorConfig,
}

/// Output formatting configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Indent the JSON output instead of writing it on one line
    #[serde(default)]
    pub pretty: bool,
}

/// Color parsing configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ColorConfig {
    /// Alpha given to `#RGB` and `#RRGGBB` hex colors (0-255)
    pub default_opacity: u8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig {
            default_opacity: DEFAULT_HEX_OPACITY,
        }
    }
}

impl Config {
    /// Load configuration from czml-config.toml in the working directory.
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config file format in {}: {}", path.display(), e);
                    log::warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No config file at {}, using default configuration", path.display());
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        log::info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.output.pretty);
        assert_eq!(config.colors.default_opacity, 0x3c);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            output: OutputConfig { pretty: true },
            colors: ColorConfig { default_opacity: 200 },
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str("[output]\npretty = true\n").unwrap();
        assert!(parsed.output.pretty);
        assert_eq!(parsed.colors.default_opacity, 0x3c);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "output = [this is not toml").unwrap();
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            output: OutputConfig { pretty: true },
            colors: ColorConfig { default_opacity: 255 },
        };
        config.save_to_path(file.path()).unwrap();
        assert_eq!(Config::load_from_path(file.path()), config);
    }
}
