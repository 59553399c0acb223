//! Vulkan context bring-up and teardown
//!
//! [`VulkanContext`] owns every native object the bootstrap creates. Each one
//! is wrapped in a [`Scoped`] guard as soon as it exists, so a failure
//! partway through [`VulkanContext::new`] releases exactly what was already
//! acquired, newest first.
//!
//! Teardown order on drop: surface, logical device, debug messenger,
//! instance. The window outlives the context and is released by its owner.

use super::device_selection::{select_physical_device, DeviceScorer, SelectedDevice};
use super::validation::ValidationSupport;
use crate::core::GraphicsConfig;
use crate::render::backends::vulkan::{
    DeviceRequest, GraphicsBackend, InstanceRequest, Scoped, VulkanError, VulkanResult,
};
use crate::render::window::WindowSurface;
use ash::vk;
use std::rc::Rc;

/// Instance extension that carries the debug messenger
pub const DEBUG_UTILS_EXTENSION: &str = "VK_EXT_debug_utils";

/// Live Vulkan objects for one window
///
/// Fields drop in declaration order, which is the required release order.
pub struct VulkanContext<B: GraphicsBackend> {
    surface: Scoped<B::Surface>,
    graphics_queue: B::Queue,
    device: Scoped<B::Device>,
    selected: SelectedDevice<B::PhysicalDevice>,
    messenger: Option<Scoped<B::Messenger>>,
    instance: Scoped<B::Instance>,
    backend: Rc<B>,
    validation_enabled: bool,
}

impl<B: GraphicsBackend> VulkanContext<B> {
    /// Bring up instance, messenger, device, queue and surface for `window`
    pub fn new(
        backend: Rc<B>,
        window: &mut dyn WindowSurface,
        config: &GraphicsConfig,
        scorer: &dyn DeviceScorer,
    ) -> VulkanResult<Self> {
        let validation_enabled = config.enable_validation && {
            let support = ValidationSupport::query(&*backend, &config.validation_layers)?;
            if !support.all_supported() {
                log::warn!("Validation layers requested, but not available!");
                log::warn!("Missing layers: {:?}", support.missing);
            }
            support.all_supported()
        };

        let mut extensions = window
            .required_instance_extensions()
            .map_err(|e| VulkanError::InstanceCreation(e.to_string()))?;
        let layers = if validation_enabled {
            extensions.push(DEBUG_UTILS_EXTENSION.to_string());
            config.validation_layers.clone()
        } else {
            Vec::new()
        };
        log::debug!("Instance extensions: {:?}", extensions);
        log::debug!("Instance layers: {:?}", layers);

        let (app_major, app_minor, app_patch) = config.application_version;
        let (engine_major, engine_minor, engine_patch) = config.engine_version;
        let (api_major, api_minor) = config.api_version;
        let request = InstanceRequest {
            application_name: config.application_name.clone(),
            application_version: vk::make_api_version(0, app_major, app_minor, app_patch),
            engine_name: config.engine_name.clone(),
            engine_version: vk::make_api_version(0, engine_major, engine_minor, engine_patch),
            api_version: vk::make_api_version(0, api_major, api_minor, 0),
            extensions,
            layers,
        };

        let instance = {
            let handle = backend.create_instance(&request)?;
            let releaser = Rc::clone(&backend);
            Scoped::new("instance", handle, move |i| releaser.destroy_instance(i))
        };
        log::info!("Vulkan instance created for '{}'", config.application_name);

        let messenger = if validation_enabled {
            let handle = backend.create_debug_messenger(&instance)?;
            let releaser = Rc::clone(&backend);
            Some(Scoped::new("debug messenger", handle, move |m| {
                releaser.destroy_debug_messenger(m);
            }))
        } else {
            None
        };

        let mut selected = select_physical_device(&*backend, &*instance, scorer)?;
        let graphics_family = selected.graphics_family();

        let device = {
            let request = DeviceRequest::single_queue(graphics_family);
            let handle = backend.create_device(&instance, selected.handle(), &request)?;
            let releaser = Rc::clone(&backend);
            Scoped::new("logical device", handle, move |d| releaser.destroy_device(d))
        };
        let graphics_queue = backend.device_queue(&device, graphics_family, 0);
        log::info!("Logical device created with graphics family {}", graphics_family);

        let surface = {
            let handle = backend.create_surface(&instance, window)?;
            let releaser = Rc::clone(&backend);
            Scoped::new("surface", handle, move |s| releaser.destroy_surface(s))
        };

        let physical_device = selected.handle();
        selected
            .queue_families
            .resolve_present(selected.queue_family_count, |family| {
                backend.surface_support(physical_device, family, &*surface)
            })?;
        match selected.queue_families.present {
            Some(family) => log::info!("Present family: {}", family),
            None => log::warn!("No queue family can present to the window surface"),
        }

        Ok(Self {
            surface,
            graphics_queue,
            device,
            selected,
            messenger,
            instance,
            backend,
            validation_enabled,
        })
    }

    /// Backend that owns the native objects
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Instance handle
    pub fn instance(&self) -> &B::Instance {
        &self.instance
    }

    /// Logical device handle
    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Queue from the graphics family
    pub fn graphics_queue(&self) -> B::Queue {
        self.graphics_queue
    }

    /// Window surface
    pub fn surface(&self) -> &B::Surface {
        &self.surface
    }

    /// The physical device in use and its queue families
    pub fn selected_device(&self) -> &SelectedDevice<B::PhysicalDevice> {
        &self.selected
    }

    /// Whether validation layers and the debug messenger are active
    pub fn validation_enabled(&self) -> bool {
        self.validation_enabled
    }

    /// Whether a debug messenger is installed
    pub fn has_debug_messenger(&self) -> bool {
        self.messenger.is_some()
    }
}

impl<B: GraphicsBackend> Drop for VulkanContext<B> {
    fn drop(&mut self) {
        log::info!("Tearing down Vulkan context");
    }
}
