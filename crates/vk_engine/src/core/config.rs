//! # Engine Configuration
//!
//! Settings for every subsystem the engine brings up: the window, the Vulkan
//! instance and device selection, frame timing and logging. Every section is
//! `#[serde(default)]`, so a config file only needs the keys it changes.
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//!
//! [graphics]
//! enable_validation = true
//! device_preference = "prefer_discrete"
//! ```

use crate::config::{Config, Deserialize, Serialize};
use std::path::Path;

/// Layer requested when validation is enabled
pub const KHRONOS_VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// Root engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window creation settings
    pub window: WindowConfig,
    /// Vulkan instance and device settings
    pub graphics: GraphicsConfig,
    /// Frame timing settings
    pub timing: TimingConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Configuration for a window of the given size, everything else default
    pub fn with_window_size(width: u32, height: u32) -> Self {
        let mut config = Self::default();
        config.window.width = width;
        config.window.height = height;
        config
    }

    /// Load configuration from a file, falling back to defaults if it is
    /// missing or malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                log::debug!("Config: {:?}", config);
                config
            }
            Err(e) => {
                log::warn!("Failed to load {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in screen coordinates
    pub width: u32,
    /// Window height in screen coordinates
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Window".to_string(),
            width: 640,
            height: 480,
            resizable: false,
        }
    }
}

/// How physical devices are ranked during selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePreference {
    /// Only discrete GPUs are acceptable; the first one enumerated wins
    #[default]
    DiscreteOnly,
    /// Any GPU is acceptable, ranked discrete > integrated > virtual > cpu
    PreferDiscrete,
}

/// Vulkan instance and device settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Application name reported to the driver
    pub application_name: String,
    /// Application version (major, minor, patch)
    pub application_version: (u32, u32, u32),
    /// Engine name reported to the driver
    pub engine_name: String,
    /// Engine version (major, minor, patch)
    pub engine_version: (u32, u32, u32),
    /// Requested Vulkan API version (major, minor)
    pub api_version: (u32, u32),
    /// Enable validation layers and the debug messenger
    pub enable_validation: bool,
    /// Layers requested when validation is enabled
    pub validation_layers: Vec<String>,
    /// Physical device ranking policy
    pub device_preference: DevicePreference,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            application_name: "Hello Triangle".to_string(),
            application_version: (1, 0, 0),
            engine_name: "No Engine".to_string(),
            engine_version: (1, 0, 0),
            api_version: (1, 0),
            enable_validation: cfg!(debug_assertions),
            validation_layers: vec![KHRONOS_VALIDATION_LAYER.to_string()],
            device_preference: DevicePreference::default(),
        }
    }
}

/// Frame timing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds of accumulated frame time between FPS samples
    pub fps_report_interval: f64,
    /// Log each FPS sample
    pub report_fps: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps_report_interval: 1.0,
            report_fps: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
