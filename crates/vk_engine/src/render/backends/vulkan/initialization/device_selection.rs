//! Physical device selection and queue family resolution
//!
//! Selection runs in three steps, stopping at the first failure:
//!
//! 1. **Enumerate** every physical device the instance can see
//!    ([`VulkanError::NoDevice`] if there are none).
//! 2. **Select** the best device according to a [`DeviceScorer`]
//!    ([`VulkanError::NoSuitableDevice`] if every device is rejected).
//! 3. **Resolve** the queue families of the chosen device only
//!    ([`VulkanError::NoGraphicsQueue`] without a graphics family).
//!
//! Enumeration order is whatever the driver reports. Selection is
//! deterministic relative to that order: among equal scores the earlier
//! device wins.

use crate::core::DevicePreference;
use crate::render::backends::vulkan::{
    DeviceProperties, GraphicsBackend, VulkanError, VulkanResult,
};
use ash::vk;

/// Queue family index for each queue role the engine knows about
///
/// Each role is resolved independently and stays `None` until a family
/// providing it is found. The lowest qualifying index always wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    /// First family with graphics support
    pub graphics: Option<u32>,
    /// First family that can present to the window surface
    pub present: Option<u32>,
    /// First family with compute support
    pub compute: Option<u32>,
    /// First family with transfer support
    pub transfer: Option<u32>,
}

impl QueueFamilyIndices {
    /// Scan queue families in order, stopping once every capability role is
    /// filled
    pub fn from_families(families: &[vk::QueueFamilyProperties]) -> Self {
        let mut indices = Self::default();

        for (index, family) in (0u32..).zip(families) {
            let flags = family.queue_flags;
            if indices.graphics.is_none() && flags.contains(vk::QueueFlags::GRAPHICS) {
                indices.graphics = Some(index);
            }
            if indices.compute.is_none() && flags.contains(vk::QueueFlags::COMPUTE) {
                indices.compute = Some(index);
            }
            if indices.transfer.is_none() && flags.contains(vk::QueueFlags::TRANSFER) {
                indices.transfer = Some(index);
            }

            if indices.graphics.is_some() && indices.compute.is_some() && indices.transfer.is_some()
            {
                break;
            }
        }

        indices
    }

    /// Fill the present role with the first family `supports_present`
    /// accepts
    pub fn resolve_present<F>(
        &mut self,
        family_count: u32,
        mut supports_present: F,
    ) -> VulkanResult<()>
    where
        F: FnMut(u32) -> VulkanResult<bool>,
    {
        for index in 0..family_count {
            if supports_present(index)? {
                self.present = Some(index);
                return Ok(());
            }
        }
        Ok(())
    }

    /// A logical device can be created once the graphics family is known
    pub fn is_complete(&self) -> bool {
        self.graphics.is_some()
    }
}

/// A physical device as seen by a [`DeviceScorer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCandidate<P> {
    /// Backend handle
    pub handle: P,
    /// Position in the driver's enumeration order
    pub index: usize,
    /// Name, type and API version
    pub properties: DeviceProperties,
}

/// Ranks physical devices
///
/// `None` rejects a device outright; otherwise higher scores win.
pub trait DeviceScorer {
    /// Score one device
    fn score(&self, device: &DeviceProperties) -> Option<u32>;
}

/// Accepts discrete GPUs only, all equal, so the first one enumerated wins
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteOnly;

impl DeviceScorer for DiscreteOnly {
    fn score(&self, device: &DeviceProperties) -> Option<u32> {
        (device.device_type == vk::PhysicalDeviceType::DISCRETE_GPU).then_some(1)
    }
}

/// Accepts any device, preferring discrete over integrated over virtual over
/// CPU implementations
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferDiscrete;

impl DeviceScorer for PreferDiscrete {
    fn score(&self, device: &DeviceProperties) -> Option<u32> {
        let score = match device.device_type {
            vk::PhysicalDeviceType::DISCRETE_GPU => 1000,
            vk::PhysicalDeviceType::INTEGRATED_GPU => 100,
            vk::PhysicalDeviceType::VIRTUAL_GPU => 10,
            vk::PhysicalDeviceType::CPU => 2,
            _ => 1,
        };
        Some(score)
    }
}

/// The scorer implementing a configured preference
pub fn scorer_for(preference: DevicePreference) -> Box<dyn DeviceScorer> {
    match preference {
        DevicePreference::DiscreteOnly => Box::new(DiscreteOnly),
        DevicePreference::PreferDiscrete => Box::new(PreferDiscrete),
    }
}

/// Pick the highest-scoring candidate; ties keep the earliest
pub fn choose_device<'a, P>(
    candidates: &'a [DeviceCandidate<P>],
    scorer: &dyn DeviceScorer,
) -> Option<&'a DeviceCandidate<P>> {
    let mut best: Option<(&DeviceCandidate<P>, u32)> = None;

    for candidate in candidates {
        let device = &candidate.properties;
        let Some(score) = scorer.score(device) else {
            log::debug!("Rejected GPU '{}' ({:?})", device.name, device.device_type);
            continue;
        };
        log::debug!("GPU '{}' ({:?}) scored {}", device.name, device.device_type, score);

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// A selected physical device with its resolved queue families
#[derive(Debug, Clone)]
pub struct SelectedDevice<P> {
    /// The chosen candidate
    pub candidate: DeviceCandidate<P>,
    /// Queue roles resolved for the candidate
    pub queue_families: QueueFamilyIndices,
    /// Number of queue families the device exposes
    pub queue_family_count: u32,
}

impl<P: Copy> SelectedDevice<P> {
    /// Backend handle of the selected device
    pub fn handle(&self) -> P {
        self.candidate.handle
    }

    /// Graphics family index; always present on a selected device
    pub fn graphics_family(&self) -> u32 {
        self.queue_families.graphics.unwrap_or_default()
    }
}

/// Enumerate, select and resolve queue families in one pass
pub fn select_physical_device<B: GraphicsBackend>(
    backend: &B,
    instance: &B::Instance,
    scorer: &dyn DeviceScorer,
) -> VulkanResult<SelectedDevice<B::PhysicalDevice>> {
    let devices = backend.enumerate_physical_devices(instance)?;
    if devices.is_empty() {
        return Err(VulkanError::NoDevice);
    }
    log::info!("Found {} physical device(s)", devices.len());

    let candidates: Vec<_> = devices
        .iter()
        .enumerate()
        .map(|(index, &handle)| DeviceCandidate {
            handle,
            index,
            properties: backend.device_properties(instance, handle),
        })
        .collect();

    let candidate = choose_device(&candidates, scorer)
        .cloned()
        .ok_or(VulkanError::NoSuitableDevice {
            candidates: candidates.len(),
        })?;

    let families = backend.queue_family_properties(instance, candidate.handle);
    let queue_families = QueueFamilyIndices::from_families(&families);
    if !queue_families.is_complete() {
        return Err(VulkanError::NoGraphicsQueue {
            device: candidate.properties.name,
        });
    }

    let properties = &candidate.properties;
    log::info!(
        "Selected GPU: {} ({:?}, Vulkan {}.{}.{})",
        properties.name,
        properties.device_type,
        vk::api_version_major(properties.api_version),
        vk::api_version_minor(properties.api_version),
        vk::api_version_patch(properties.api_version)
    );
    log::debug!("Queue families: {:?}", queue_families);

    Ok(SelectedDevice {
        candidate,
        queue_families,
        queue_family_count: u32::try_from(families.len()).unwrap_or(u32::MAX),
    })
}
