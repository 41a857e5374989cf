//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window / viewport settings.
    pub window: WindowConfig,
    /// Camera projection, home pose, and idle orbit settings.
    pub camera: CameraConfig,
    /// Fly-to-target and fly-home animation settings.
    pub flight: FlightConfig,
    /// Scene manifest settings.
    pub scene: SceneConfig,
    /// Journal data settings.
    pub journal: JournalConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Camera position when resting at home.
    pub home_position: [f32; 3],
    /// Look target when resting at home.
    pub home_target: [f32; 3],
    /// Start with idle auto-rotation enabled.
    pub auto_rotate: bool,
    /// Idle auto-rotation speed in radians per second.
    pub auto_rotate_speed: f32,
    /// Orbit radians per pixel of pointer drag.
    pub orbit_sensitivity: f32,
    /// Distance multiplier applied per wheel line (< 1 zooms in on positive delta).
    pub zoom_step: f32,
    /// Closest the user may zoom to the look target.
    pub min_distance: f32,
    /// Farthest the user may zoom from the look target.
    pub max_distance: f32,
}

/// Camera flight configuration. Durations are wall-clock seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    /// Duration of a fly-to-target animation in seconds.
    pub to_target_secs: f32,
    /// Duration of a fly-home animation in seconds.
    pub home_secs: f32,
    /// Standoff distance as a multiple of the picked body's bounding radius.
    pub standoff_factor: f32,
    /// Minimum standoff distance; also used for degenerate bounding spheres.
    pub min_standoff: f32,
    /// Maximum standoff distance.
    pub max_standoff: f32,
}

/// Scene manifest configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the scene manifest.
    pub model_path: String,
    /// Uniform scale applied to the loaded model.
    pub model_scale: f32,
}

/// Journal data configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalConfig {
    /// Path to the journal data fixture.
    pub data_path: String,
    /// Upper bound on a journal-entries query, in milliseconds.
    pub query_timeout_ms: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log the camera pose every rendered frame.
    pub trace_camera: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 5000.0,
            home_position: [0.0, 50.0, 200.0],
            home_target: [0.0, 0.0, 0.0],
            auto_rotate: true,
            // One revolution every 30 seconds.
            auto_rotate_speed: std::f32::consts::TAU / 30.0,
            orbit_sensitivity: 0.005,
            zoom_step: 0.95,
            min_distance: 2.0,
            max_distance: 500.0,
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            to_target_secs: 1.0,
            home_secs: 1.0,
            standoff_factor: 4.0,
            min_standoff: 2.0,
            max_standoff: 150.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_path: "assets/solar_system.ron".to_string(),
            model_scale: 10.0,
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            data_path: "assets/journal.ron".to_string(),
            query_timeout_ms: 8000,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trace_camera: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
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

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("query_timeout_ms: 8000"));
    }

    #[test]
    fn test_default_standoff_range_is_sane() {
        let flight = FlightConfig::default();
        assert!(flight.min_standoff > 0.0);
        assert!(flight.max_standoff > flight.min_standoff);
        assert!(flight.to_target_secs > 0.0 && flight.home_secs > 0.0);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), camera: (), scene: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.flight, FlightConfig::default());
        assert_eq!(config.journal, JournalConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let ron_str = "(flight: (home_secs: 2.5))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert!((config.flight.home_secs - 2.5).abs() < 1e-6);
        assert!((config.flight.to_target_secs - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.camera.home_position = [0.0, 10.0, 80.0];
        config.journal.query_timeout_ms = 250;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.flight.to_target_secs = 0.5;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert!((result.unwrap().flight.to_target_secs - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
