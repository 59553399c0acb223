//! Vulkan backend
//!
//! The native API is reached through [`GraphicsBackend`]; [`AshBackend`] is
//! the implementation used outside of tests.

pub mod ash_backend;
pub mod backend;
pub mod error;
pub mod initialization;
#[cfg(test)]
pub(crate) mod mock;
pub mod scoped;

pub use ash_backend::{AshBackend, AshMessenger, AshSurface};
pub use backend::{DeviceProperties, DeviceRequest, GraphicsBackend, InstanceRequest};
pub use error::{VulkanError, VulkanResult};
pub use initialization::{VulkanContext, ValidationSupport};
pub use scoped::Scoped;
