//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Free-look camera settings.
    pub camera: CameraConfig,
    /// Movement boundary around the hologram.
    pub hub: HubConfig,
    /// Earth hologram settings.
    pub globe: GlobeConfig,
    /// Interface transitions and close-up behaviour.
    pub interface: InterfaceConfig,
    /// Initial observer position on Earth.
    pub viewer: ViewerConfig,
    /// Satellite/planet polling settings.
    pub feed: FeedConfig,
    /// Pointing robot motor settings.
    pub motors: MotorConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Free-look camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians of angular velocity per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Exponential smoothing factor applied to yaw/pitch rates.
    pub smooth_factor: f32,
    /// Walking speed in world units per second.
    pub move_speed: f32,
    /// Absolute pitch limit in radians.
    pub pitch_limit: f32,
    /// Camera position at startup.
    pub start_position: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

/// Circular movement boundary, centred on the globe origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HubConfig {
    /// Boundary radius in world units.
    pub radius: f32,
}

/// Earth hologram configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Resting centre of the hologram.
    pub origin: [f32; 3],
    /// Hologram radius in world units.
    pub radius: f32,
    /// Axial tilt in degrees.
    pub tilt_deg: f32,
    /// Globe yaw (radians) per pixel of horizontal drag.
    pub drag_sensitivity: f32,
    /// Height of surface markers above the hologram surface.
    pub marker_offset: f32,
    /// World point the pointing arrow is drawn from.
    pub arrow_source: [f32; 3],
}

/// Interface transition configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InterfaceConfig {
    /// Shared interpolation rate for every smoothed visual value.
    pub lerp_rate: f32,
    /// Distance along the anchor ray where the opened globe is placed.
    pub earth_anchor_distance: f32,
    /// Screen-space fraction (x, y) of the ray used to anchor the opened globe.
    pub earth_anchor_screen: [f32; 2],
    /// Distance along the centre ray where the opened terminal is placed.
    pub terminal_anchor_distance: f32,
    /// Camera distance from the globe centre, in globe radii, while focused.
    pub focus_distance: f32,
    /// Press durations shorter than this (seconds) count as a click.
    pub drag_threshold_s: f32,
    /// Distance under which an interpolated value counts as arrived.
    pub converge_epsilon: f32,
    /// Absolute limit of the globe drag pitch, in degrees.
    pub globe_pitch_limit_deg: f32,
    /// Resting centre of the terminal screen.
    pub terminal_rest: [f32; 3],
    /// Resting inclination of the terminal screen, in degrees.
    pub terminal_rest_yaw_deg: f32,
    /// Half extents of the terminal screen along its local X and Z axes.
    pub terminal_half_extents: [f32; 2],
}

/// Observer position used at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Latitude in degrees.
    pub latitude: f32,
    /// Longitude in degrees (east positive).
    pub longitude: f32,
}

/// Polling intervals for the external position feeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Seconds between satellite position requests.
    pub satellite_interval_s: f32,
    /// Seconds between planet position requests.
    pub planet_interval_s: f32,
}

/// Stepper motor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotorConfig {
    /// Steps for one full revolution.
    pub steps_per_revolution: f32,
    /// The pan motor is mounted upside down and turns the other way.
    pub invert_pan: bool,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Multiplier on top of `camera.mouse_sensitivity`.
    pub mouse_sensitivity: f32,
    /// Invert Y axis for camera.
    pub invert_y: bool,
    /// Keybinding overrides (action name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.003,
            smooth_factor: 15.0,
            move_speed: 8.0,
            pitch_limit: 1.5,
            start_position: [3.0, 2.5, 3.0],
            fov_y_deg: 60.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { radius: 8.0 }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            origin: [-3.5, 2.0, 0.2],
            radius: 0.8,
            tilt_deg: 23.44,
            drag_sensitivity: 0.005,
            marker_offset: 0.1,
            arrow_source: [-3.5, 4.0, 0.2],
        }
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            lerp_rate: 3.0,
            earth_anchor_distance: 2.5,
            earth_anchor_screen: [1.0 / 3.0, 0.5],
            terminal_anchor_distance: 1.0,
            focus_distance: 1.15,
            drag_threshold_s: 0.2,
            converge_epsilon: 0.1,
            globe_pitch_limit_deg: 30.0,
            terminal_rest: [-10.1, 1.7, -0.16],
            terminal_rest_yaw_deg: 40.0,
            terminal_half_extents: [0.45, 0.8],
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            latitude: 46.94,
            longitude: 6.99,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            satellite_interval_s: 2.0,
            planet_interval_s: 5.0,
        }
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: 1000.0,
            invert_pan: true,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.0,
            invert_y: false,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform default config directory (`<config_dir>/holoscope`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join("holoscope"))
            .ok_or(ConfigError::NoConfigDir)
    }

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
