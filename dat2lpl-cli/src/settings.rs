//! Optional defaults from `~/.config/dat2lpl/settings.toml`.
//!
//! ```toml
//! [defaults]
//! input_path = "/mnt/roms/snes"
//! archive_format = ".zip"
//! storage_mode = "Split"
//! map = "/home/me/regions.json"
//! ```
//!
//! Command-line flags always win over these values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use dat2lpl_core::{ArchiveFormat, StorageMode};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Defaults {
    pub input_path: Option<PathBuf>,
    pub archive_format: Option<String>,
    pub storage_mode: Option<String>,
    pub map: Option<PathBuf>,
}

/// Canonical path to the settings file: `~/.config/dat2lpl/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("dat2lpl").join("settings.toml")
}

/// Load settings from the canonical location.
pub(crate) fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`. A missing file yields the defaults; an
/// unreadable or invalid one is reported and ignored.
pub(crate) fn load_settings_from(path: &Path) -> Settings {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
        Err(e) => {
            log::warn!("Ignoring settings file {}: {e}", path.display());
            return Settings::default();
        }
    };

    match toml::from_str(&contents) {
        Ok(settings) => {
            log::debug!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            log::warn!("Ignoring settings file {}: {e}", path.display());
            Settings::default()
        }
    }
}

impl Defaults {
    pub(crate) fn archive_format(&self) -> Option<ArchiveFormat> {
        parse_or_warn(self.archive_format.as_deref(), "archive_format")
    }

    pub(crate) fn storage_mode(&self) -> Option<StorageMode> {
        parse_or_warn(self.storage_mode.as_deref(), "storage_mode")
    }
}

fn parse_or_warn<T>(value: Option<&str>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = value?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("Ignoring defaults.{key} in settings: {e}");
            None
        }
    }
}
