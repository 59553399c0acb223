//! # Core Engine Module
//!
//! Shared configuration types used by every subsystem.

pub mod config;

pub use config::{
    DevicePreference, EngineConfig, GraphicsConfig, LoggingConfig, TimingConfig, WindowConfig,
    KHRONOS_VALIDATION_LAYER,
};
