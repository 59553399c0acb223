//! Recording backend for tests
//!
//! [`MockBackend`] hands out opaque handles and appends every call to a
//! shared log, so tests can assert on selection behavior and on the exact
//! order resources are released in.

use super::backend::{DeviceProperties, DeviceRequest, GraphicsBackend, InstanceRequest};
use super::error::{VulkanError, VulkanResult};
use crate::render::window::WindowSurface;
use ash::vk;
use std::cell::RefCell;
use std::rc::Rc;

/// One native call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AvailableLayers,
    CreateInstance { extensions: Vec<String>, layers: Vec<String> },
    DestroyInstance,
    CreateMessenger,
    DestroyMessenger,
    EnumerateDevices,
    Properties(usize),
    QueueFamilies(usize),
    CreateDevice { device: usize, family: u32 },
    DeviceQueue { family: u32 },
    DestroyDevice,
    CreateSurface,
    SurfaceSupport { family: u32 },
    DestroySurface,
}

/// A fake physical device
#[derive(Debug, Clone)]
pub struct MockDevice {
    name: String,
    device_type: vk::PhysicalDeviceType,
    families: Vec<vk::QueueFlags>,
}

impl MockDevice {
    pub fn new(name: &str, device_type: vk::PhysicalDeviceType) -> Self {
        Self {
            name: name.to_string(),
            device_type,
            families: vec![
                vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE | vk::QueueFlags::TRANSFER,
            ],
        }
    }

    pub fn discrete(name: &str) -> Self {
        Self::new(name, vk::PhysicalDeviceType::DISCRETE_GPU)
    }

    pub fn integrated(name: &str) -> Self {
        Self::new(name, vk::PhysicalDeviceType::INTEGRATED_GPU)
    }

    pub fn with_families(mut self, families: &[vk::QueueFlags]) -> Self {
        self.families = families.to_vec();
        self
    }
}

#[derive(Debug)]
pub struct MockInstance;

#[derive(Debug)]
pub struct MockMessenger;

#[derive(Debug)]
pub struct MockDeviceHandle;

#[derive(Debug)]
pub struct MockSurface;

/// Scriptable backend that records every call
#[derive(Debug, Default)]
pub struct MockBackend {
    layers: Vec<String>,
    devices: Vec<MockDevice>,
    fail_instance: bool,
    fail_messenger: bool,
    fail_device: bool,
    no_present_support: bool,
    log: Rc<RefCell<Vec<Call>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layers(mut self, layers: &[&str]) -> Self {
        self.layers = layers.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_device(mut self, device: MockDevice) -> Self {
        self.devices.push(device);
        self
    }

    pub fn failing_instance(mut self) -> Self {
        self.fail_instance = true;
        self
    }

    pub fn failing_messenger(mut self) -> Self {
        self.fail_messenger = true;
        self
    }

    pub fn failing_device(mut self) -> Self {
        self.fail_device = true;
        self
    }

    pub fn without_present_support(mut self) -> Self {
        self.no_present_support = true;
        self
    }

    /// A minimal request for tests that only need some instance
    pub fn any_instance_request(&self) -> InstanceRequest {
        InstanceRequest {
            application_name: "test".to_string(),
            application_version: 0,
            engine_name: "test".to_string(),
            engine_version: 0,
            api_version: vk::API_VERSION_1_0,
            extensions: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Snapshot of the call log
    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    /// Only the calls that release something, in order
    pub fn releases(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::DestroySurface
                        | Call::DestroyDevice
                        | Call::DestroyMessenger
                        | Call::DestroyInstance
                )
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl GraphicsBackend for MockBackend {
    type Instance = MockInstance;
    type Messenger = MockMessenger;
    type PhysicalDevice = usize;
    type Device = MockDeviceHandle;
    type Queue = u32;
    type Surface = MockSurface;

    fn available_layers(&self) -> VulkanResult<Vec<String>> {
        self.record(Call::AvailableLayers);
        Ok(self.layers.clone())
    }

    fn create_instance(&self, request: &InstanceRequest) -> VulkanResult<Self::Instance> {
        self.record(Call::CreateInstance {
            extensions: request.extensions.clone(),
            layers: request.layers.clone(),
        });
        if self.fail_instance {
            return Err(VulkanError::InstanceCreation(
                "ERROR_INCOMPATIBLE_DRIVER".to_string(),
            ));
        }
        Ok(MockInstance)
    }

    fn destroy_instance(&self, _instance: Self::Instance) {
        self.record(Call::DestroyInstance);
    }

    fn create_debug_messenger(&self, _instance: &Self::Instance) -> VulkanResult<Self::Messenger> {
        self.record(Call::CreateMessenger);
        if self.fail_messenger {
            return Err(VulkanError::DebugMessengerSetup(
                vk::Result::ERROR_EXTENSION_NOT_PRESENT,
            ));
        }
        Ok(MockMessenger)
    }

    fn destroy_debug_messenger(&self, _messenger: Self::Messenger) {
        self.record(Call::DestroyMessenger);
    }

    fn enumerate_physical_devices(
        &self,
        _instance: &Self::Instance,
    ) -> VulkanResult<Vec<Self::PhysicalDevice>> {
        self.record(Call::EnumerateDevices);
        Ok((0..self.devices.len()).collect())
    }

    fn device_properties(
        &self,
        _instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> DeviceProperties {
        self.record(Call::Properties(device));
        let mock = &self.devices[device];
        DeviceProperties {
            name: mock.name.clone(),
            device_type: mock.device_type,
            api_version: vk::API_VERSION_1_0,
        }
    }

    fn queue_family_properties(
        &self,
        _instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        self.record(Call::QueueFamilies(device));
        self.devices[device]
            .families
            .iter()
            .map(|&queue_flags| vk::QueueFamilyProperties {
                queue_flags,
                queue_count: 1,
                ..Default::default()
            })
            .collect()
    }

    fn create_device(
        &self,
        _instance: &Self::Instance,
        physical_device: Self::PhysicalDevice,
        request: &DeviceRequest,
    ) -> VulkanResult<Self::Device> {
        self.record(Call::CreateDevice {
            device: physical_device,
            family: request.queue_family_index,
        });
        if self.fail_device {
            return Err(VulkanError::DeviceCreation(
                vk::Result::ERROR_INITIALIZATION_FAILED,
            ));
        }
        Ok(MockDeviceHandle)
    }

    fn device_queue(&self, _device: &Self::Device, family: u32, _index: u32) -> Self::Queue {
        self.record(Call::DeviceQueue { family });
        family
    }

    fn destroy_device(&self, _device: Self::Device) {
        self.record(Call::DestroyDevice);
    }

    fn create_surface(
        &self,
        _instance: &Self::Instance,
        window: &mut dyn WindowSurface,
    ) -> VulkanResult<Self::Surface> {
        self.record(Call::CreateSurface);
        window
            .create_vulkan_surface(vk::Instance::null())
            .map_err(|e| VulkanError::SurfaceCreation(e.to_string()))?;
        Ok(MockSurface)
    }

    fn surface_support(
        &self,
        _physical_device: Self::PhysicalDevice,
        family: u32,
        _surface: &Self::Surface,
    ) -> VulkanResult<bool> {
        self.record(Call::SurfaceSupport { family });
        Ok(!self.no_present_support)
    }

    fn destroy_surface(&self, _surface: Self::Surface) {
        self.record(Call::DestroySurface);
    }
}
