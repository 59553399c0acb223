//! Backend-agnostic window trait
//!
//! The engine drives its window only through [`WindowSurface`], so the run
//! loop and the Vulkan context can be exercised against a scripted window in
//! tests while the real application uses GLFW.

use ash::vk;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The native window could not be created
    #[error("Window creation failed")]
    CreationFailed,

    /// Any other windowing library failure
    #[error("GLFW error: {0}")]
    Glfw(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// A native window the graphics context can present to
///
/// # Contract
/// - `poll_events` never blocks; it drains whatever is pending.
/// - `time` is monotonic for the lifetime of the window.
/// - Dropping the implementor releases the native window and, for the last
///   window, the windowing library itself.
pub trait WindowSurface {
    /// Whether the user or the application asked the window to close
    fn should_close(&self) -> bool;

    /// Request or cancel window closure
    fn set_should_close(&mut self, should_close: bool);

    /// Drain pending window and input events without blocking
    fn poll_events(&mut self);

    /// Present the current framebuffer
    fn present(&mut self);

    /// Seconds since the windowing library was initialized
    fn time(&self) -> f64;

    /// Instance extensions needed to present to this window
    fn required_instance_extensions(&self) -> WindowResult<Vec<String>>;

    /// Create a Vulkan surface bound to this window
    fn create_vulkan_surface(&mut self, instance: vk::Instance) -> WindowResult<vk::SurfaceKHR>;
}
