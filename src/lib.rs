pub mod application;
pub mod date_utils;
pub mod domain;
pub mod format_utils;
pub mod view_state;

#[cfg(target_arch = "wasm32")]
pub mod infrastructure;
#[cfg(target_arch = "wasm32")]
pub mod presentation;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Wire up the browser-backed logger and clock before any page code runs.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    domain::logging::get_logger().info(
        domain::logging::LogComponent::Presentation("Initialize"),
        "🚀 Dashboard core initialized",
    );
}
