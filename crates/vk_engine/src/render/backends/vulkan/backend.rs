//! Native graphics backend seam
//!
//! Every native Vulkan call the bootstrap makes goes through
//! [`GraphicsBackend`]. The production implementation wraps `ash`
//! ([`super::AshBackend`]); tests substitute a recording backend so device
//! selection and teardown order can be checked without a GPU.
//!
//! Handles are plain associated types. Ownership of created handles passes
//! to the caller, which hands them back to the matching `destroy_*` call
//! exactly once.

use super::error::VulkanResult;
use crate::render::window::WindowSurface;
use ash::vk;
use std::fmt;

/// Everything needed to create an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRequest {
    /// Application name reported to the driver
    pub application_name: String,
    /// Packed application version
    pub application_version: u32,
    /// Engine name reported to the driver
    pub engine_name: String,
    /// Packed engine version
    pub engine_version: u32,
    /// Packed Vulkan API version
    pub api_version: u32,
    /// Instance extensions to enable
    pub extensions: Vec<String>,
    /// Instance layers to enable
    pub layers: Vec<String>,
}

/// Logical device creation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRequest {
    /// Queue family the device queues come from
    pub queue_family_index: u32,
    /// One priority per requested queue
    pub queue_priorities: Vec<f32>,
}

impl DeviceRequest {
    /// One queue at full priority, no features, no extensions
    pub fn single_queue(queue_family_index: u32) -> Self {
        Self {
            queue_family_index,
            queue_priorities: vec![1.0],
        }
    }
}

/// Properties of a physical device relevant to selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProperties {
    /// Driver-reported device name
    pub name: String,
    /// Discrete, integrated, virtual, CPU or other
    pub device_type: vk::PhysicalDeviceType,
    /// Highest Vulkan version the device supports
    pub api_version: u32,
}

/// Native graphics backend
pub trait GraphicsBackend: 'static {
    /// Instance handle
    type Instance;
    /// Debug messenger handle
    type Messenger;
    /// Physical device reference, owned by the backend
    type PhysicalDevice: Copy + fmt::Debug;
    /// Logical device handle
    type Device;
    /// Device queue, owned by its logical device
    type Queue: Copy + fmt::Debug;
    /// Window surface handle
    type Surface;

    /// Names of every instance layer known to the loader
    fn available_layers(&self) -> VulkanResult<Vec<String>>;

    /// Create an instance
    fn create_instance(&self, request: &InstanceRequest) -> VulkanResult<Self::Instance>;

    /// Destroy an instance; every child object must already be gone
    fn destroy_instance(&self, instance: Self::Instance);

    /// Install a debug messenger on `instance`
    fn create_debug_messenger(&self, instance: &Self::Instance) -> VulkanResult<Self::Messenger>;

    /// Remove a debug messenger
    fn destroy_debug_messenger(&self, messenger: Self::Messenger);

    /// Physical devices visible to `instance`, in driver order
    fn enumerate_physical_devices(
        &self,
        instance: &Self::Instance,
    ) -> VulkanResult<Vec<Self::PhysicalDevice>>;

    /// Name, type and API version of a physical device
    fn device_properties(
        &self,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> DeviceProperties;

    /// Queue families of a physical device, indexed by family index
    fn queue_family_properties(
        &self,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties>;

    /// Create a logical device
    fn create_device(
        &self,
        instance: &Self::Instance,
        physical_device: Self::PhysicalDevice,
        request: &DeviceRequest,
    ) -> VulkanResult<Self::Device>;

    /// Fetch a queue created together with `device`
    fn device_queue(&self, device: &Self::Device, family: u32, index: u32) -> Self::Queue;

    /// Destroy a logical device and with it all of its queues
    fn destroy_device(&self, device: Self::Device);

    /// Bind `window` to the graphics backend for presentation
    fn create_surface(
        &self,
        instance: &Self::Instance,
        window: &mut dyn WindowSurface,
    ) -> VulkanResult<Self::Surface>;

    /// Whether queue family `family` can present to `surface`
    fn surface_support(
        &self,
        physical_device: Self::PhysicalDevice,
        family: u32,
        surface: &Self::Surface,
    ) -> VulkanResult<bool>;

    /// Destroy a window surface
    fn destroy_surface(&self, surface: Self::Surface);
}
