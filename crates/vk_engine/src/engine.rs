//! Core engine implementation

use crate::{
    config::{Config, ConfigError},
    core::EngineConfig,
    foundation::{
        logging,
        time::{FpsSample, FrameTimer},
    },
    render::{
        backends::vulkan::{initialization::scorer_for, AshBackend},
        GlfwWindow, GraphicsBackend, VulkanContext, VulkanError, WindowError, WindowSurface,
    },
};
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Main engine struct
///
/// Owns the window, the Vulkan context bound to it and the frame timer, and
/// drives the main loop. The context is declared first so it is torn down
/// while the window it presents to still exists.
pub struct Engine<B: GraphicsBackend, W: WindowSurface> {
    /// Vulkan objects
    context: VulkanContext<B>,

    /// Frame timing
    timer: FrameTimer,

    /// Engine configuration
    config: EngineConfig,

    /// The window; released last
    window: W,
}

impl<B: GraphicsBackend, W: WindowSurface> Engine<B, W> {
    /// Create a new engine around an open window
    pub fn new(config: EngineConfig, mut window: W, backend: Rc<B>) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let scorer = scorer_for(config.graphics.device_preference);
        let context = VulkanContext::new(backend, &mut window, &config.graphics, scorer.as_ref())?;
        let timer = FrameTimer::with_interval(window.time(), config.timing.fps_report_interval);

        log::info!("Engine initialized");
        Ok(Self {
            context,
            timer,
            config,
            window,
        })
    }

    /// Run until the window asks to close
    pub fn run(&mut self) {
        log::info!("Starting main loop...");

        while !self.window.should_close() {
            self.input();
            self.update();
            self.render();
        }

        log::info!(
            "Main loop finished after {} frames ({:.2}s)",
            self.timer.frame_count(),
            self.timer.total_time()
        );
    }

    /// Process pending window events
    pub fn input(&mut self) {
        self.window.poll_events();
    }

    /// Advance the frame timer, returning an FPS sample once per report
    /// interval
    pub fn update(&mut self) -> Option<FpsSample> {
        let sample = self.timer.tick(self.window.time())?;
        if self.config.timing.report_fps {
            log::info!("FPS: {:.1}", sample.fps);
        }
        Some(sample)
    }

    /// Present the current frame
    pub fn render(&mut self) {
        self.window.present();
    }

    /// Frame timer
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Vulkan context
    pub fn context(&self) -> &VulkanContext<B> {
        &self.context
    }

    /// The window
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Mutable access to the window
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// Configuration the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Engine<AshBackend, GlfwWindow> {
    /// Open a GLFW window, load Vulkan and run until the window closes
    pub fn launch(config: EngineConfig) -> Result<(), EngineError> {
        let window = GlfwWindow::new(
            &config.window.title,
            config.window.width,
            config.window.height,
            config.window.resizable,
        )?;
        let backend = Rc::new(AshBackend::load()?);

        let mut engine = Self::new(config, window, backend)?;
        engine.run();

        log::info!("Shutting down");
        Ok(())
    }

    /// Load configuration from `path`, initialize logging from it and launch
    ///
    /// Unlike [`EngineConfig::load_or_default`], a missing or malformed file
    /// is an error.
    pub fn launch_from_file(path: impl AsRef<Path>) -> Result<(), EngineError> {
        let config = EngineConfig::load_from_file(path)?;
        logging::init(&config.logging.level);
        Self::launch(config)
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window creation or windowing library failure
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Vulkan bring-up failure
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] VulkanError),

    /// Configuration loading failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
