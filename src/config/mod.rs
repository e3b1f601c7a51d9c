// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration: toast defaults, timer
//! intervals, and the animation and layout settings of the headless
//! [`Document`](crate::document::Document). Hosts may keep it in a TOML file.
//!
//! # Examples
//!
//! ```no_run
//! use iced_toastify::config::{self, Config};
//! use iced_toastify::toast::Position;
//! use std::path::Path;
//!
//! let path = Path::new("./toasts.toml");
//! let mut config = config::load_from_path(path).unwrap_or_default();
//! config.defaults.position = Position::Center;
//! config::save_to_path(&config, path).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use crate::toast::{Gravity, Position};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub use defaults::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Values merged under every [`ToastOptions`](crate::toast::ToastOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub gravity: Gravity,
    pub position: Position,
    pub stop_on_focus: bool,
    pub oldest_first: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            gravity: Gravity::Top,
            position: Position::Right,
            stop_on_focus: true,
            oldest_first: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub progress_interval_ms: u64,
    pub resize_debounce_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
        }
    }
}

impl Timing {
    /// Interval between two countdown updates, never below
    /// [`MIN_PROGRESS_INTERVAL_MS`].
    #[must_use]
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms.max(MIN_PROGRESS_INTERVAL_MS))
    }

    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enter_ms: u64,
    pub exit_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enter_ms: DEFAULT_ENTER_MS,
            exit_ms: DEFAULT_EXIT_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub char_width: f32,
    pub line_height: f32,
    pub container_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            char_width: DEFAULT_CHAR_WIDTH,
            line_height: DEFAULT_LINE_HEIGHT,
            container_width: DEFAULT_CONTAINER_WIDTH,
        }
    }
}

/// Parses a configuration, failing on malformed TOML.
pub fn from_toml_str(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Loads a configuration file.
///
/// I/O errors are returned; a file that is not valid TOML yields the
/// default configuration.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match from_toml_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Invalid toast config, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_defaults() {
        let mut config = Config::default();
        config.defaults.gravity = Gravity::Bottom;
        config.defaults.position = Position::Center;
        config.defaults.oldest_first = false;
        config.timing.progress_interval_ms = 250;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("toasts.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("toasts.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let config = from_toml_str(
            r#"
            [defaults]
            gravity = "bottom"

            [timing]
            resize_debounce_ms = 250
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.defaults.gravity, Gravity::Bottom);
        assert_eq!(config.defaults.position, Position::Right);
        assert!(config.defaults.stop_on_focus);
        assert_eq!(config.timing.resize_debounce_ms, 250);
        assert_eq!(config.timing.progress_interval_ms, DEFAULT_PROGRESS_INTERVAL_MS);
    }

    #[test]
    fn unknown_gravity_is_rejected() {
        assert!(from_toml_str("[defaults]\ngravity = \"middle\"").is_err());
    }

    #[test]
    fn progress_interval_is_clamped() {
        let timing = Timing {
            progress_interval_ms: 0,
            resize_debounce_ms: 0,
        };
        assert_eq!(
            timing.progress_interval(),
            Duration::from_millis(MIN_PROGRESS_INTERVAL_MS)
        );
        assert_eq!(timing.resize_debounce(), Duration::ZERO);
    }
}
