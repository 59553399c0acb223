//! Sandbox application
//!
//! Opens a window, brings up Vulkan and reports FPS until the window is
//! closed or Escape is pressed. With a config file argument the file must
//! load; without one `engine.toml` is tried and defaults are used if it is
//! missing (see `sandbox_app/engine.toml`).

use vk_engine::prelude::*;

fn main() {
    let result = match std::env::args().nth(1) {
        Some(path) => Engine::launch_from_file(path),
        None => {
            let config = EngineConfig::load_or_default("engine.toml");
            logging::init(&config.logging.level);
            Engine::launch(config)
        }
    };

    if let Err(e) = result {
        // No-op unless the config file itself failed to load
        logging::init("info");
        log::error!("Sandbox failed: {}", e);
        std::process::exit(1);
    }
    log::info!("Sandbox exited cleanly");
}
