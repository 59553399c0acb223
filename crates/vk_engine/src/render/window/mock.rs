//! Scripted window for tests

use super::backend::{WindowError, WindowResult, WindowSurface};
use ash::vk;
use std::cell::Cell;

/// Window whose clock advances a fixed step per event poll and which asks to
/// close after a set number of polls
#[derive(Debug)]
pub struct MockWindow {
    clock: Cell<f64>,
    frame_time: f64,
    close_after: Option<usize>,
    should_close: bool,
    extensions: Vec<String>,
    fail_surface: bool,
    pub polls: usize,
    pub presents: usize,
    pub surfaces_created: usize,
}

impl MockWindow {
    pub fn new() -> Self {
        Self {
            clock: Cell::new(0.0),
            frame_time: 0.25,
            close_after: None,
            should_close: false,
            extensions: vec!["VK_KHR_surface".to_string()],
            fail_surface: false,
            polls: 0,
            presents: 0,
            surfaces_created: 0,
        }
    }

    pub fn closing_after(mut self, polls: usize) -> Self {
        self.close_after = Some(polls);
        self
    }

    pub fn with_frame_time(mut self, seconds: f64) -> Self {
        self.frame_time = seconds;
        self
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(ToString::to_string).collect();
        self
    }

    pub fn failing_surface(mut self) -> Self {
        self.fail_surface = true;
        self
    }
}

impl WindowSurface for MockWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn poll_events(&mut self) {
        self.polls += 1;
        self.clock.set(self.clock.get() + self.frame_time);
        if self.close_after.is_some_and(|limit| self.polls >= limit) {
            self.should_close = true;
        }
    }

    fn present(&mut self) {
        self.presents += 1;
    }

    fn time(&self) -> f64 {
        self.clock.get()
    }

    fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        Ok(self.extensions.clone())
    }

    fn create_vulkan_surface(&mut self, _instance: vk::Instance) -> WindowResult<vk::SurfaceKHR> {
        if self.fail_surface {
            return Err(WindowError::Glfw("surface unsupported".to_string()));
        }
        self.surfaces_created += 1;
        Ok(vk::SurfaceKHR::null())
    }
}
