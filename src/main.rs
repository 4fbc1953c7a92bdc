// main.rs
#![cfg_attr(all(target_os = "windows", not(debug_assertions)), windows_subsystem = "windows")]

mod app;

use app::App;
use eframe::NativeOptions;
use office_file_converter::config::Settings;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load();
    let native_options = NativeOptions {
        initial_window_size: Some(egui::Vec2::new(settings.window.width, settings.window.height)),
        resizable: true,
        ..Default::default()
    };
    eframe::run_native(
        "File Converter",
        native_options,
        Box::new(|_cc| Box::new(App::new(settings))),
    );
}
