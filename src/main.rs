#![warn(clippy::all, rust_2018_idioms)]
// hide console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use sketchpad::{SketchApp, SketchConfig};

/// Environment variable naming an optional JSON config file
const CONFIG_ENV: &str = "SKETCH_CONFIG";

fn load_config() -> SketchConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return SketchConfig::default();
    };
    SketchConfig::load(&path).unwrap_or_else(|err| {
        log::warn!("Ignoring {}: {}", std::path::Path::new(&path).display(), err);
        SketchConfig::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sketchpad")
            .with_inner_size([config.viewport_width + 240.0, config.viewport_height + 24.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sketchpad",
        options,
        Box::new(|cc| Ok(Box::new(SketchApp::new(cc, config)?))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
