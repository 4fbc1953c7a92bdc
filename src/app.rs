// app.rs
pub mod file_dialogs;
pub mod gui;

use eframe::egui;
use eframe::App as EframeApp;
use office_file_converter::config::Settings;
use office_file_converter::utils::Logger;
use office_file_converter::Converter;
use parking_lot::Mutex;
use std::sync::Arc;

pub const FORMAT_PLACEHOLDER: &str = "Select...";

pub struct App {
    pub selected_format: String,
    pub status: Option<Status>,
    pub log_messages: Arc<Mutex<Vec<String>>>,
    pub logger: Logger,
    pub converter: Converter,
    pub settings: Settings,
}

/// Last outcome, shown under the buttons.
#[derive(Clone, Debug)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let log_messages = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new(log_messages.clone());
        let converter = Converter::new(settings.office_path.clone());
        let selected_format = settings
            .last_format
            .clone()
            .unwrap_or_else(|| FORMAT_PLACEHOLDER.to_string());

        Self {
            selected_format,
            status: None,
            log_messages,
            logger,
            converter,
            settings,
        }
    }
}

impl EframeApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        gui::render(self, ctx);
    }
}
