// config.rs
//! Settings persisted between runs.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "office-file-converter";
const FILE_NAME: &str = "settings.json";

fn default_window_width() -> f32 {
    600.0
}
fn default_window_height() -> f32 {
    400.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Dropdown label restored at startup.
    #[serde(default)]
    pub last_format: Option<String>,
    /// Directory the file dialog opens in.
    #[serde(default)]
    pub last_directory: Option<PathBuf>,
    /// Explicit LibreOffice executable; looked up on `PATH` when unset.
    #[serde(default)]
    pub office_path: Option<PathBuf>,
    #[serde(default)]
    pub window: WindowSettings,
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Loads from the user config directory, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable settings");
                }
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Err(err) = self.save_to(&path) {
            tracing::warn!(path = %path.display(), error = %err, "failed to save settings");
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
