use serde::Serialize;

use crate::region::classify_regions;

/// A parsed DAT catalog: the header description plus every game in
/// document order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    /// Text of `header/description`. `None` when the header or the
    /// description element is missing; `Some("")` when it is empty.
    pub description: Option<String>,
    pub games: Vec<GameRecord>,
}

/// A single `game` entry from a DAT catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Display name, e.g. "Super Game (USA, Europe) (Rev 1)".
    pub name: String,
    /// Catalog-unique id, if the DAT provides one.
    pub id: Option<String>,
    /// Id of the parent game when this record is a clone.
    pub clone_of_id: Option<String>,
    pub roms: Vec<RomRecord>,
    /// Region tags taken from the display name.
    pub regions: Vec<String>,
}

/// A single `rom` entry within a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RomRecord {
    /// File name within the game's directory or archive.
    pub name: String,
    /// CRC32 as written in the DAT (hex, any case).
    pub crc: Option<String>,
}

impl GameRecord {
    /// Create a record with its regions classified from `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let regions = classify_regions(&name);
        Self {
            name,
            id: None,
            clone_of_id: None,
            roms: Vec::new(),
            regions,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_clone_of(mut self, clone_of_id: impl Into<String>) -> Self {
        self.clone_of_id = Some(clone_of_id.into());
        self
    }

    pub fn with_rom(mut self, rom: RomRecord) -> Self {
        self.roms.push(rom);
        self
    }

    /// The rom used for the playlist entry: the first one listed.
    pub fn primary_rom(&self) -> Option<&RomRecord> {
        self.roms.first()
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }
}

impl RomRecord {
    pub fn new(name: impl Into<String>, crc: Option<&str>) -> Self {
        Self {
            name: name.into(),
            crc: crc.map(str::to_string),
        }
    }

    /// CRC in the playlist's `crc32` notation: uppercase hex followed by
    /// `|crc`, or just `|crc` when the DAT has no checksum.
    pub fn playlist_crc(&self) -> String {
        match self.crc.as_deref() {
            Some(crc) if !crc.is_empty() => format!("{}|crc", crc.to_uppercase()),
            _ => "|crc".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_classifies_regions() {
        let game = GameRecord::new("Mega Game (USA, Europe) (Rev 1)");
        assert_eq!(game.regions, vec!["USA", "Europe"]);
        assert!(game.has_region("Europe"));
        assert!(!game.has_region("Japan"));
    }

    #[test]
    fn test_primary_rom_is_first() {
        let game = GameRecord::new("Foo")
            .with_rom(RomRecord::new("a.bin", None))
            .with_rom(RomRecord::new("b.bin", None));
        assert_eq!(game.primary_rom().map(|r| r.name.as_str()), Some("a.bin"));
        assert!(GameRecord::new("Bar").primary_rom().is_none());
    }

    #[test]
    fn test_playlist_crc_uppercases() {
        assert_eq!(
            RomRecord::new("a.bin", Some("b19ed489")).playlist_crc(),
            "B19ED489|crc"
        );
    }

    #[test]
    fn test_playlist_crc_missing_or_empty() {
        assert_eq!(RomRecord::new("a.bin", None).playlist_crc(), "|crc");
        assert_eq!(RomRecord::new("a.bin", Some("")).playlist_crc(), "|crc");
    }
}
