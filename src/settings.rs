use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_START_X, DEFAULT_START_Y, GameConfig,
};

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Raw, unclamped values as written in the settings file.
///
/// Fields are signed and wide so that out-of-range numbers still parse and
/// get clamped by [`GameConfig::clamped`] instead of being rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: i64,
    pub height: i64,
    pub start_x: i64,
    pub start_y: i64,
    pub teleport_walls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: i64::from(DEFAULT_GRID_WIDTH),
            height: i64::from(DEFAULT_GRID_HEIGHT),
            start_x: i64::from(DEFAULT_START_X),
            start_y: i64::from(DEFAULT_START_Y),
            teleport_walls: true,
        }
    }
}

impl Settings {
    /// Produces the clamped session configuration.
    #[must_use]
    pub fn to_config(self) -> GameConfig {
        GameConfig::clamped(
            self.width,
            self.height,
            self.start_x,
            self.start_y,
            self.teleport_walls,
        )
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `path`.
///
/// Returns defaults when the file does not exist. Returns `Err` when the file
/// exists but cannot be read or parsed, so the caller can warn before
/// entering raw terminal mode.
pub fn load_settings_from_path(path: &Path) -> Result<Settings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            log::info!("no settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str::<Settings>(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
