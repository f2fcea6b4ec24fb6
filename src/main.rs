#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use config::RenderConfig;
use logging::init_logging;

mod config;
mod error;
mod frame_driver;
mod host;
mod logging;
mod rendering;
mod rotation;

fn main() {
    init_logging();
    let config = RenderConfig::default();
    log::info!("starting \"{}\" at {}x{}", config.title, config.width, config.height);
    host::run(config);
}
