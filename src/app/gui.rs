use crate::app::file_dialogs;
use crate::app::{App, Status};
use egui::{Color32, Frame, RichText, Rounding, Stroke};
use office_file_converter::utils::measure_time;
use office_file_converter::{ConversionRequest, FormatLabel};
use std::path::{Path, PathBuf};

const ACCENT: Color32 = Color32::from_rgb(100, 200, 250);

pub fn render(app: &mut App, ctx: &egui::Context) {
    let frame = Frame {
        fill: Color32::from_rgb(30, 30, 40),
        rounding: Rounding::same(10.0),
        stroke: Stroke::new(1.0, ACCENT),
        inner_margin: egui::style::Margin::same(20.0),
        ..Default::default()
    };

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Welcome!").size(24.0).color(ACCENT));
            ui.add_space(10.0);
            ui.label(RichText::new("What would you like to convert to?").size(16.0));
            ui.add_space(5.0);

            egui::ComboBox::from_id_source("target_format")
                .selected_text(app.selected_format.as_str())
                .width(200.0)
                .show_ui(ui, |ui| {
                    for label in FormatLabel::ALL {
                        ui.selectable_value(&mut app.selected_format, label.as_str().to_string(), label.as_str());
                    }
                });

            ui.add_space(10.0);
            if ui.add_sized([200.0, 30.0], egui::Button::new("Select File")).clicked() {
                if let Some(path) = file_dialogs::select_file(app.settings.last_directory.as_deref()) {
                    start_conversion(app, path);
                    ctx.request_repaint();
                }
            }

            ui.add_space(5.0);
            if let Some(status) = &app.status {
                let color = if status.is_error { Color32::RED } else { Color32::GREEN };
                ui.label(RichText::new(&status.text).color(color));
            }
        });

        ui.add_space(20.0);

        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Conversion Log").size(16.0).color(ACCENT));

            egui::ScrollArea::vertical()
                .max_height(200.0)
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let logs = app.log_messages.lock();
                    for log in logs.iter() {
                        if log.contains("error") || log.contains("failed") {
                            ui.label(RichText::new(log).color(Color32::RED));
                        } else {
                            ui.label(log);
                        }
                    }
                });
        });
    });
}

/// Runs on the UI thread; the window stays blocked until the conversion returns.
fn start_conversion(app: &mut App, input_path: PathBuf) {
    app.settings.last_directory = input_path.parent().map(Path::to_path_buf);
    if FormatLabel::from_label(&app.selected_format).is_some() {
        app.settings.last_format = Some(app.selected_format.clone());
    }
    app.settings.save();

    let request = ConversionRequest::new(input_path, app.selected_format.clone());
    app.logger.log(format!(
        "Converting {} to {}",
        request.input_path().display(),
        request.target_format_label()
    ));

    let (outcome, duration) = measure_time(|| app.converter.run(&request));

    if let Some(error) = &outcome.error {
        app.logger.log(format!("Conversion failed: {error}"));
        app.status = Some(Status {
            text: error.to_string(),
            is_error: true,
        });
        file_dialogs::show_error(error);
    } else if let Some(text) = outcome.success_message() {
        app.logger.log(format!("{} (took {:?})", text, duration));
        app.status = Some(Status { text, is_error: false });
    }
}
