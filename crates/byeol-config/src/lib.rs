//! Configuration loading for byeol.
//!
//! Reads `config.toml` from the platform config directory. A missing file
//! yields defaults. An unreadable or unparsable file logs a warning and
//! falls back to defaults rather than aborting startup: a degraded scene
//! beats no scene.

use std::fs;
use std::path::{Path, PathBuf};

use byeol_core::{FieldOptions, TrailOptions};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target delay between frames, in milliseconds.
    pub frame_interval_ms: u64,
    /// Start with the trail engine enabled.
    pub trail_enabled: bool,
    /// Ambient field engine options.
    pub field: FieldOptions,
    /// Trail sparkle engine options.
    pub trail: TrailOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_interval_ms: 33,
            trail_enabled: true,
            field: FieldOptions::default(),
            trail: TrailOptions::default(),
        }
    }
}

impl Config {
    /// Load from the default platform location.
    pub fn load() -> Self {
        match default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`, degrading to defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("could not read config {}: {e}", path.display());
                return Self::default();
            }
        };

        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed config {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

/// Default config path: `<platform config dir>/byeol/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "byeol").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use byeol_core::Palette;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/byeol/config.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            frame_interval_ms = 16

            [field]
            count = 50
            palette = "cool"
            "#,
        )
        .unwrap();

        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.field.count, 50);
        assert_eq!(config.field.palette, Palette::Cool);
        // Untouched sections keep their defaults.
        assert_eq!(config.field.respawn_probability, 0.7);
        assert_eq!(config.trail, TrailOptions::default());
        assert!(config.trail_enabled);
    }

    #[test]
    fn test_default_roundtrip() {
        let text = toml::to_string(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_malformed_file_degrades_to_defaults() {
        let path = std::env::temp_dir().join("byeol-config-test-malformed.toml");
        fs::write(&path, "frame_interval_ms = \"not a number\"").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config, Config::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_trail_cap_parses() {
        let config: Config = toml::from_str(
            r#"
            [trail]
            max_live = 500
            color_mode = "hue"
            "#,
        )
        .unwrap();
        assert_eq!(config.trail.max_live, Some(500));
        assert_eq!(config.trail.color_mode, byeol_core::ColorMode::Hue);
    }
}
