//! Window management subsystem
//!
//! ```text
//! ┌─────────────────────────────┐
//! │ Engine / VulkanContext      │
//! └──────────────┬──────────────┘
//!                │ uses
//!      ┌─────────▼─────────┐
//!      │ WindowSurface     │ ← trait (backend.rs)
//!      └─────────┬─────────┘
//!                │ implemented by
//!      ┌─────────▼─────────┐
//!      │ GlfwWindow        │ ← GLFW backend (glfw_window.rs)
//!      └───────────────────┘
//! ```

pub mod backend;
pub mod glfw_window;
#[cfg(test)]
pub(crate) mod mock;

pub use backend::{WindowError, WindowResult, WindowSurface};
pub use glfw_window::GlfwWindow;
