//! Rendering subsystem: windows and the graphics backend behind them

pub mod backends;
pub mod window;

pub use backends::vulkan::{AshBackend, GraphicsBackend, VulkanContext, VulkanError, VulkanResult};
pub use window::{GlfwWindow, WindowError, WindowResult, WindowSurface};
