//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Camera projection settings.
    pub camera: CameraConfig,
    /// Navigation feel: durations, offsets, clearances.
    pub navigation: NavigationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Camera projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Initial viewport width in logical pixels.
    pub viewport_width: f32,
    /// Initial viewport height in logical pixels.
    pub viewport_height: f32,
}

/// Navigation tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Camera travel animation duration in milliseconds.
    pub tween_duration_ms: f32,
    /// Camera distance in front of a snapped node.
    pub snap_offset: f32,
    /// Camera distance in front of a selected node.
    pub camera_offset: f32,
    /// Extra framing clearance for elevation fits.
    pub fit_clearance_elevation: f32,
    /// Extra framing clearance for plan fits.
    pub fit_clearance_plan: f32,
    /// Framing distance floor when detouring to a selection.
    pub selection_distance: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 70.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            tween_duration_ms: 400.0,
            snap_offset: 1.0,
            camera_offset: 1.0,
            fit_clearance_elevation: 4.0,
            fit_clearance_plan: 2.0,
            selection_distance: 2.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            info!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            info!("created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
