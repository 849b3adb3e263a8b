//! RetroArch `.lpl` playlist documents (JSON format, version 1.5).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlaylistError;

pub const PLAYLIST_VERSION: &str = "1.5";

/// Core path/name telling RetroArch to pick a core when the entry is launched.
pub const DETECT: &str = "DETECT";

/// A complete playlist. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    pub version: String,
    pub default_core_path: String,
    pub default_core_name: String,
    pub label_display_mode: u32,
    pub right_thumbnail_mode: u32,
    pub left_thumbnail_mode: u32,
    pub thumbnail_match_mode: u32,
    pub sort_mode: u32,
    pub items: Vec<PlaylistItem>,
}

/// One launchable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub path: String,
    pub label: String,
    pub core_path: String,
    pub core_name: String,
    /// Uppercase CRC32 followed by `|crc`.
    pub crc32: String,
    pub db_name: String,
}

impl PlaylistDocument {
    pub fn new(items: Vec<PlaylistItem>) -> Self {
        Self {
            version: PLAYLIST_VERSION.to_string(),
            default_core_path: String::new(),
            default_core_name: String::new(),
            label_display_mode: 0,
            right_thumbnail_mode: 0,
            left_thumbnail_mode: 0,
            thumbnail_match_mode: 0,
            sort_mode: 0,
            items,
        }
    }
}

impl Default for PlaylistDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Serialize a playlist as pretty-printed JSON (two-space indent).
pub fn to_json(doc: &PlaylistDocument) -> Result<String, PlaylistError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Write a playlist to `path`, creating parent directories as needed.
///
/// The document is serialized in full before the file is touched.
pub fn write_playlist(doc: &PlaylistDocument, path: &Path) -> Result<(), PlaylistError> {
    let json = to_json(doc)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    log::debug!(
        "Wrote {} ({} item(s))",
        path.display(),
        doc.items.len()
    );
    Ok(())
}
