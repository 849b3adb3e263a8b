use dat2lpl_core::GameRecord;

use crate::lpl::{DETECT, PlaylistDocument, PlaylistItem};
use crate::path::PathResolver;

/// `db_name` used when the DAT header has no description.
pub const FALLBACK_DB_NAME: &str = "playlist.lpl";

/// Database name written into every item: `"{description}.lpl"`, or
/// [`FALLBACK_DB_NAME`] when the description is missing or empty.
pub fn db_name(description: Option<&str>) -> String {
    match description {
        Some(desc) if !desc.is_empty() => format!("{desc}.lpl"),
        _ => FALLBACK_DB_NAME.to_string(),
    }
}

/// Turns game records into playlist documents.
#[derive(Debug, Clone)]
pub struct PlaylistBuilder {
    resolver: PathResolver,
    db_name: String,
}

impl PlaylistBuilder {
    pub fn new(resolver: PathResolver, description: Option<&str>) -> Self {
        Self {
            resolver,
            db_name: db_name(description),
        }
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Build a playlist from `games`, in the order given.
    ///
    /// Records without ROMs are skipped.
    pub fn build<'a>(&self, games: impl IntoIterator<Item = &'a GameRecord>) -> PlaylistDocument {
        let items = games.into_iter().filter_map(|game| self.item(game)).collect();
        PlaylistDocument::new(items)
    }

    /// Playlist entry for a single record, using its first ROM.
    pub fn item(&self, game: &GameRecord) -> Option<PlaylistItem> {
        let Some(rom) = game.primary_rom() else {
            log::debug!("Skipping '{}': no ROM entries", game.name);
            return None;
        };

        Some(PlaylistItem {
            path: self.resolver.resolve(game, rom),
            label: game.name.clone(),
            core_path: DETECT.to_string(),
            core_name: DETECT.to_string(),
            crc32: rom.playlist_crc(),
            db_name: self.db_name.clone(),
        })
    }
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
