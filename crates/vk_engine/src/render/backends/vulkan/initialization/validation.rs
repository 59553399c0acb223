//! Validation layer support queries

use crate::render::backends::vulkan::{GraphicsBackend, VulkanResult};

/// Result of checking requested validation layers against the loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSupport {
    /// Layers that were asked for
    pub requested: Vec<String>,
    /// Requested layers the loader does not know about
    pub missing: Vec<String>,
    supported: bool,
}

impl ValidationSupport {
    /// Enumerate the loader's layers and compare them with `requested`
    pub fn query<B: GraphicsBackend>(backend: &B, requested: &[String]) -> VulkanResult<Self> {
        let available = backend.available_layers()?;
        log::debug!("Available instance layers: {:?}", available);

        Ok(Self {
            requested: requested.to_vec(),
            missing: missing_layers(&available, requested),
            supported: layers_supported(&available, requested),
        })
    }

    /// True when every requested layer is available
    pub fn all_supported(&self) -> bool {
        self.supported
    }
}

/// True only if every requested layer name is present in `available`
///
/// Names are compared exactly. An empty request is trivially supported.
pub fn layers_supported(available: &[String], requested: &[String]) -> bool {
    requested.iter().all(|layer| available.contains(layer))
}

/// Requested layer names that do not appear in `available`
pub fn missing_layers(available: &[String], requested: &[String]) -> Vec<String> {
    requested
        .iter()
        .filter(|layer| !available.contains(layer))
        .cloned()
        .collect()
}
