//! Vulkan-specific error types

use ash::vk;
use thiserror::Error;

/// Errors raised while bringing up or tearing down Vulkan objects
#[derive(Error, Debug)]
pub enum VulkanError {
    /// The Vulkan loader library could not be found or loaded
    #[error("Failed to load Vulkan: {0}")]
    LoaderUnavailable(String),

    /// Instance creation was rejected or could not be prepared
    #[error("Failed to create Vulkan instance: {0}")]
    InstanceCreation(String),

    /// The debug messenger could not be installed
    #[error("Failed to set up debug messenger: {0:?}")]
    DebugMessengerSetup(vk::Result),

    /// The instance reports no physical devices at all
    #[error("No Vulkan-capable GPU found")]
    NoDevice,

    /// Physical devices exist, but none passed the device scorer
    #[error("No suitable GPU found among {candidates} device(s)")]
    NoSuitableDevice {
        /// Number of devices that were evaluated
        candidates: usize,
    },

    /// The selected device has no queue family with graphics support
    #[error("No graphics queue family on device '{device}'")]
    NoGraphicsQueue {
        /// Name of the selected physical device
        device: String,
    },

    /// The driver rejected logical device creation
    #[error("Failed to create logical device: {0:?}")]
    DeviceCreation(vk::Result),

    /// The window surface could not be created
    #[error("Failed to create window surface: {0}")]
    SurfaceCreation(String),

    /// General Vulkan API error with result code
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;

impl From<vk::Result> for VulkanError {
    fn from(result: vk::Result) -> Self {
        Self::Api(result)
    }
}
