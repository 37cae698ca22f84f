//! Persistent configuration.
//!
//! Loaded from `<config dir>/markpane/config.toml`. A default file is
//! written on first run so users have something to edit. Command-line flags
//! override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ui::DEFAULT_SPLIT_PERCENT;

/// Color theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect light or dark from the terminal
    #[default]
    Auto,
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color theme for preview code blocks
    pub theme: ThemeMode,
    /// Initial editor pane width as a percentage
    pub split_percent: u16,
    /// Directory exports are written to; defaults to the working directory
    pub export_dir: Option<PathBuf>,
    /// Pandoc binary used for DOCX export
    pub pandoc_bin: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Auto,
            split_percent: DEFAULT_SPLIT_PERCENT,
            export_dir: None,
            pandoc_bin: None,
        }
    }
}

/// Path of the config file, when a config directory exists on this platform.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("markpane").join("config.toml"))
}

/// Load the configuration, writing a default file on first run.
///
/// A missing config directory or an unwritable disk is not fatal; the
/// defaults are used and a warning is logged.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    if path.exists() {
        match read_config(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                Config::default()
            }
        }
    } else {
        let config = Config::default();
        if let Err(err) = write_config(&path, &config) {
            warn!(path = %path.display(), error = %err, "could not write default config");
        }
        config
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Serialize and write the configuration.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(config).context("serializing config")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeMode::Auto);
        assert_eq!(config.split_percent, DEFAULT_SPLIT_PERCENT);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markpane").join("config.toml");
        let config = Config {
            theme: ThemeMode::Dark,
            split_percent: 65,
            export_dir: Some(PathBuf::from("/tmp/exports")),
            pandoc_bin: None,
        };

        write_config(&path, &config).unwrap();
        assert_eq!(read_config(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.split_percent, DEFAULT_SPLIT_PERCENT);
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        assert!(toml::from_str::<Config>("theme = \"sepia\"").is_err());
    }
}
