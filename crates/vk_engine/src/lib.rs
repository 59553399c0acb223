//! # VK Engine
//!
//! A minimal Vulkan bootstrap on top of GLFW: open a window, create an
//! instance (with validation layers in debug builds), pick a GPU, create a
//! logical device and a window surface, then run a frame loop that reports
//! FPS until the window closes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vk_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let config = EngineConfig::load_or_default("engine.toml");
//!     logging::init(&config.logging.level);
//!     Engine::launch(config)
//! }
//! ```
//!
//! All native objects are released in reverse order of creation when the
//! engine is dropped, including when bring-up fails partway.

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::{DevicePreference, EngineConfig, GraphicsConfig},
        foundation::{
            logging,
            time::{FpsSample, FrameTimer},
        },
        render::{
            AshBackend, GlfwWindow, GraphicsBackend, VulkanContext, VulkanError, WindowError,
            WindowSurface,
        },
        Engine, EngineError,
    };
}
