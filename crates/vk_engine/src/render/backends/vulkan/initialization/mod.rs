//! Vulkan bring-up: validation checks, device selection and the context
//! that owns the resulting objects

pub mod context;
pub mod device_selection;
pub mod validation;

pub use context::{VulkanContext, DEBUG_UTILS_EXTENSION};
pub use device_selection::{
    choose_device, scorer_for, select_physical_device, DeviceCandidate, DeviceScorer,
    DiscreteOnly, PreferDiscrete, QueueFamilyIndices, SelectedDevice,
};
pub use validation::{layers_supported, missing_layers, ValidationSupport};
