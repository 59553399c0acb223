//! Window management using GLFW
//!
//! Provides cross-platform window creation and event handling for Vulkan

use super::backend::{WindowError, WindowResult, WindowSurface};
use ash::vk;
use glfw::{Action, Key, WindowEvent};

/// GLFW window wrapper with proper resource management
///
/// Field order matters for drop: the window goes before the GLFW handle.
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    glfw: glfw::Glfw,
}

impl GlfwWindow {
    /// Initialize GLFW and open a window without a client API
    pub fn new(title: &str, width: u32, height: u32, resizable: bool) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::log_errors).map_err(|e| {
            log::error!("Failed to initialize GLFW: {:?}", e);
            WindowError::InitializationFailed
        })?;

        if !glfw.vulkan_supported() {
            log::warn!("GLFW reports no Vulkan loader; instance creation will likely fail");
        }

        // Configure for Vulkan (no OpenGL context)
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(resizable));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                log::error!("Failed to create {}x{} window '{}'", width, height, title);
                WindowError::CreationFailed
            })?;

        window.set_key_polling(true);
        window.set_close_polling(true);

        log::info!("Created {}x{} window '{}'", width, height, title);

        Ok(Self { window, events, glfw })
    }
}

impl WindowSurface for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    log::info!("Escape pressed, closing window");
                    self.window.set_should_close(true);
                }
                WindowEvent::Close => log::info!("Close requested"),
                other => log::trace!("Window event: {:?}", other),
            }
        }
    }

    fn present(&mut self) {
        // Nothing to present until a swapchain exists. The window has no
        // client API, so glfwSwapBuffers would only raise an error.
    }

    fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or_else(|| WindowError::Glfw("Failed to get required extensions".to_string()))
    }

    fn create_vulkan_surface(&mut self, instance: vk::Instance) -> WindowResult<vk::SurfaceKHR> {
        let mut surface = vk::SurfaceKHR::null();
        let result = self.window.create_window_surface(instance, std::ptr::null(), &mut surface);

        if result == vk::Result::SUCCESS {
            Ok(surface)
        } else {
            Err(WindowError::Glfw(format!("Failed to create Vulkan surface: {:?}", result)))
        }
    }
}
