//! `ash` implementation of the graphics backend

use super::backend::{DeviceProperties, DeviceRequest, GraphicsBackend, InstanceRequest};
use super::error::{VulkanError, VulkanResult};
use crate::render::window::WindowSurface;
use ash::extensions::{ext::DebugUtils, khr};
use ash::{vk, Entry};
use std::ffi::{c_char, CStr, CString};

/// Graphics backend backed by the system Vulkan loader
pub struct AshBackend {
    entry: Entry,
}

/// Debug messenger together with the loader that destroys it
pub struct AshMessenger {
    loader: DebugUtils,
    handle: vk::DebugUtilsMessengerEXT,
}

/// Window surface together with the loader that destroys it
pub struct AshSurface {
    loader: khr::Surface,
    handle: vk::SurfaceKHR,
}

impl AshBackend {
    /// Load the Vulkan library
    pub fn load() -> VulkanResult<Self> {
        let entry = unsafe { Entry::load() }.map_err(|e| {
            VulkanError::LoaderUnavailable(format!("{}. Is Vulkan installed?", e))
        })?;
        Ok(Self { entry })
    }
}

fn to_cstrings(names: &[String]) -> VulkanResult<Vec<CString>> {
    names
        .iter()
        .map(|name| {
            CString::new(name.as_str()).map_err(|e| {
                VulkanError::InstanceCreation(format!("invalid name '{}': {}", name, e))
            })
        })
        .collect()
}

fn fixed_str(raw: &[c_char]) -> String {
    unsafe { CStr::from_ptr(raw.as_ptr()) }.to_string_lossy().into_owned()
}

impl GraphicsBackend for AshBackend {
    type Instance = ash::Instance;
    type Messenger = AshMessenger;
    type PhysicalDevice = vk::PhysicalDevice;
    type Device = ash::Device;
    type Queue = vk::Queue;
    type Surface = AshSurface;

    fn available_layers(&self) -> VulkanResult<Vec<String>> {
        let layers = self.entry.enumerate_instance_layer_properties()?;
        Ok(layers.iter().map(|layer| fixed_str(&layer.layer_name)).collect())
    }

    fn create_instance(&self, request: &InstanceRequest) -> VulkanResult<Self::Instance> {
        let app_name = to_cstrings(std::slice::from_ref(&request.application_name))?;
        let engine_name = to_cstrings(std::slice::from_ref(&request.engine_name))?;
        let extensions = to_cstrings(&request.extensions)?;
        let layers = to_cstrings(&request.layers)?;

        let extension_ptrs: Vec<*const c_char> = extensions.iter().map(|e| e.as_ptr()).collect();
        let layer_ptrs: Vec<*const c_char> = layers.iter().map(|l| l.as_ptr()).collect();

        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name[0])
            .application_version(request.application_version)
            .engine_name(&engine_name[0])
            .engine_version(request.engine_version)
            .api_version(request.api_version);

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs)
            .enabled_layer_names(&layer_ptrs);

        unsafe { self.entry.create_instance(&create_info, None) }
            .map_err(|e| VulkanError::InstanceCreation(format!("{:?}", e)))
    }

    fn destroy_instance(&self, instance: Self::Instance) {
        unsafe { instance.destroy_instance(None) };
    }

    fn create_debug_messenger(&self, instance: &Self::Instance) -> VulkanResult<Self::Messenger> {
        let loader = DebugUtils::new(&self.entry, instance);

        let create_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
                    | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            )
            .pfn_user_callback(Some(debug_callback));

        let handle = unsafe { loader.create_debug_utils_messenger(&create_info, None) }
            .map_err(VulkanError::DebugMessengerSetup)?;

        Ok(AshMessenger { loader, handle })
    }

    fn destroy_debug_messenger(&self, messenger: Self::Messenger) {
        unsafe {
            messenger
                .loader
                .destroy_debug_utils_messenger(messenger.handle, None);
        }
    }

    fn enumerate_physical_devices(
        &self,
        instance: &Self::Instance,
    ) -> VulkanResult<Vec<Self::PhysicalDevice>> {
        Ok(unsafe { instance.enumerate_physical_devices() }?)
    }

    fn device_properties(
        &self,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> DeviceProperties {
        let properties = unsafe { instance.get_physical_device_properties(device) };
        DeviceProperties {
            name: fixed_str(&properties.device_name),
            device_type: properties.device_type,
            api_version: properties.api_version,
        }
    }

    fn queue_family_properties(
        &self,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        unsafe { instance.get_physical_device_queue_family_properties(device) }
    }

    fn create_device(
        &self,
        instance: &Self::Instance,
        physical_device: Self::PhysicalDevice,
        request: &DeviceRequest,
    ) -> VulkanResult<Self::Device> {
        let queue_info = vk::DeviceQueueCreateInfo::builder()
            .queue_family_index(request.queue_family_index)
            .queue_priorities(&request.queue_priorities)
            .build();

        let create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(std::slice::from_ref(&queue_info));

        unsafe { instance.create_device(physical_device, &create_info, None) }
            .map_err(VulkanError::DeviceCreation)
    }

    fn device_queue(&self, device: &Self::Device, family: u32, index: u32) -> Self::Queue {
        unsafe { device.get_device_queue(family, index) }
    }

    fn destroy_device(&self, device: Self::Device) {
        unsafe {
            // Ensure device is idle before destruction
            let _ = device.device_wait_idle();
            device.destroy_device(None);
        }
    }

    fn create_surface(
        &self,
        instance: &Self::Instance,
        window: &mut dyn WindowSurface,
    ) -> VulkanResult<Self::Surface> {
        let handle = window
            .create_vulkan_surface(instance.handle())
            .map_err(|e| VulkanError::SurfaceCreation(e.to_string()))?;
        let loader = khr::Surface::new(&self.entry, instance);
        Ok(AshSurface { loader, handle })
    }

    fn surface_support(
        &self,
        physical_device: Self::PhysicalDevice,
        family: u32,
        surface: &Self::Surface,
    ) -> VulkanResult<bool> {
        Ok(unsafe {
            surface
                .loader
                .get_physical_device_surface_support(physical_device, family, surface.handle)
        }?)
    }

    fn destroy_surface(&self, surface: Self::Surface) {
        unsafe { surface.loader.destroy_surface(surface.handle, None) };
    }
}

/// Debug callback for validation layers
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    if callback_data.is_null() || (*callback_data).p_message.is_null() {
        return vk::FALSE;
    }
    let message = CStr::from_ptr((*callback_data).p_message).to_string_lossy();

    if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::ERROR {
        log::error!("[Vulkan] {:?} - {}", message_type, message);
    } else if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::WARNING {
        log::warn!("[Vulkan] {:?} - {}", message_type, message);
    } else {
        log::debug!("[Vulkan] {:?} - {}", message_type, message);
    }

    vk::FALSE
}
