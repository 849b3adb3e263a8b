use std::path::Path;

use dat2lpl_core::{ArchiveFormat, Catalog, StorageMode};
use dat2lpl_dat::parse_dat;
use dat2lpl_playlist::{
    CloneIndex, PathResolver, PlaylistBuilder, PlaylistDocument, RegionMap, partition,
    write_playlist,
};

const DAT: &str = r#"<?xml version="1.0"?>
<datafile>
    <header>
        <name>Sega - Mega Drive - Genesis</name>
        <description>Sega - Mega Drive - Genesis</description>
    </header>
    <game name="Mega Game (USA, Europe)" id="0001">
        <rom name="Mega Game (USA, Europe).md" size="524288" crc="1a2b3c4d"/>
    </game>
    <game name="Mega Game (Japan) (Rev 1)" id="0002" cloneofid="0001">
        <rom name="Mega Game (Japan) (Rev 1).md" size="524288" crc="ABCDEF01"/>
    </game>
    <game name="Missing Parts (Brazil)" id="0003"/>
    <game name="Homebrew Demo" id="0004">
        <rom name="Homebrew Demo.md" size="1024"/>
    </game>
    <game name="Everywhere (World)" id="0005">
        <rom name="Everywhere (World).md" size="2048" crc="00112233"/>
    </game>
</datafile>"#;

fn catalog() -> Catalog {
    parse_dat(DAT.as_bytes()).unwrap()
}

fn builder(catalog: &Catalog, archive: ArchiveFormat, mode: StorageMode) -> PlaylistBuilder {
    let resolver = PathResolver::new(
        "/roms/megadrive",
        archive,
        mode,
        CloneIndex::build(&catalog.games),
    );
    PlaylistBuilder::new(resolver, catalog.description.as_deref())
}

fn read_back(path: &Path) -> PlaylistDocument {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_single_playlist_skips_games_without_roms() {
    let catalog = catalog();
    let doc = builder(&catalog, ArchiveFormat::SevenZip, StorageMode::Merged).build(&catalog.games);

    let labels: Vec<&str> = doc.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Mega Game (USA, Europe)",
            "Mega Game (Japan) (Rev 1)",
            "Homebrew Demo",
            "Everywhere (World)",
        ]
    );
    assert!(doc
        .items
        .iter()
        .all(|i| i.db_name == "Sega - Mega Drive - Genesis.lpl"));
    assert_eq!(doc.items[0].crc32, "1A2B3C4D|crc");
    assert_eq!(doc.items[2].crc32, "|crc");
}

#[cfg(unix)]
#[test]
fn test_merged_clone_points_into_parent_archive() {
    let catalog = catalog();
    let doc = builder(&catalog, ArchiveFormat::SevenZip, StorageMode::Merged).build(&catalog.games);
    assert_eq!(
        doc.items[1].path,
        "/roms/megadrive/Mega Game (USA, Europe).7z#Mega Game (Japan) (Rev 1).md"
    );
}

#[cfg(unix)]
#[test]
fn test_split_clone_keeps_its_own_archive() {
    let catalog = catalog();
    let doc = builder(&catalog, ArchiveFormat::Zip, StorageMode::Split).build(&catalog.games);
    assert_eq!(doc.items[1].path, "/roms/megadrive/Mega Game (Japan) (Rev 1).zip");
}

#[test]
fn test_region_split_writes_one_file_per_bucket() {
    let catalog = catalog();
    let map = RegionMap::from_pairs([("USA", "America"), ("Europe", "Europe"), ("Japan", "Japan")]);
    let builder = builder(&catalog, ArchiveFormat::SevenZip, StorageMode::Merged);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("megadrive.lpl");
    let parts = partition(&catalog.games, &map);
    for planned in parts.planned_outputs(&output) {
        write_playlist(&builder.build(planned.games.iter().copied()), &planned.path).unwrap();
    }

    let america = read_back(&dir.path().join("megadrive (America).lpl"));
    let labels: Vec<&str> = america.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Mega Game (USA, Europe)", "Everywhere (World)"]);

    // The clone's parent lives in another bucket but still names the archive.
    let japan = read_back(&dir.path().join("megadrive (Japan).lpl"));
    assert_eq!(japan.items[0].label, "Mega Game (Japan) (Rev 1)");
    assert!(japan.items[0].path.contains("Mega Game (USA, Europe).7z#"));

    // A Brazil bucket exists, but its only game has no ROMs.
    let brazil = read_back(&dir.path().join("megadrive (Brazil).lpl"));
    assert!(brazil.items.is_empty());

    let no_region = read_back(&dir.path().join("megadrive (No Region).lpl"));
    let labels: Vec<&str> = no_region.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Homebrew Demo"]);

    assert!(!dir.path().join("megadrive.lpl").exists());
}
