// file_dialogs.rs
use office_file_converter::ConvertError;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::{Path, PathBuf};

/// Any file; the dialog has no extension filter.
pub fn select_file(start_directory: Option<&Path>) -> Option<PathBuf> {
    let dialog = FileDialog::new().set_title("Select File");
    match start_directory {
        Some(dir) if dir.is_dir() => dialog.set_directory(dir).pick_file(),
        _ => dialog.pick_file(),
    }
}

pub fn show_error(error: &ConvertError) {
    let (level, title, description) = match error {
        ConvertError::InvalidFormatSelection { .. } => (
            MessageLevel::Warning,
            "Warning",
            "Please select a valid output format.".to_string(),
        ),
        ConvertError::UnsupportedConversion { input, output }
        | ConvertError::UnimplementedConversion { input, output } => (
            MessageLevel::Error,
            "Error",
            format!(".{input} file cannot be converted to {output} format."),
        ),
        ConvertError::ConversionFailed { message } => (
            MessageLevel::Error,
            "Conversion Error",
            format!("Conversion failed.\nError: {message}"),
        ),
    };

    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(&description)
        .set_buttons(MessageButtons::Ok)
        .show();
}
