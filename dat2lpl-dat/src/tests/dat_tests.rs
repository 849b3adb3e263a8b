use super::*;

const SAMPLE_XML_DAT: &str = r#"<?xml version="1.0"?>
<!DOCTYPE datafile SYSTEM "http://www.logiqx.com/Dats/datafile.dtd">
<datafile>
    <header>
        <name>Nintendo - Super Nintendo Entertainment System</name>
        <description>Nintendo - Super Nintendo Entertainment System (20240101-000000)</description>
        <version>20240101-000000</version>
    </header>
    <game name="Super Mario World (USA)" id="0001">
        <description>Super Mario World (USA)</description>
        <rom name="Super Mario World (USA).sfc" size="524288" crc="b19ed489"/>
    </game>
    <game name="Super Mario World (Europe) (Rev 1)" id="0002" cloneofid="0001">
        <rom name="Super Mario World (Europe) (Rev 1).sfc" size="524288" crc="CDD3C8C3"/>
        <rom name="Super Mario World (Europe) (Rev 1).txt" size="12"/>
    </game>
    <game name="Empty Game (Japan)" id="0003"/>
</datafile>"#;

#[test]
fn test_parse_xml_dat() {
    let catalog = parse_dat(SAMPLE_XML_DAT.as_bytes()).unwrap();
    assert_eq!(
        catalog.description.as_deref(),
        Some("Nintendo - Super Nintendo Entertainment System (20240101-000000)")
    );
    assert_eq!(catalog.games.len(), 3);

    let smw = &catalog.games[0];
    assert_eq!(smw.name, "Super Mario World (USA)");
    assert_eq!(smw.id.as_deref(), Some("0001"));
    assert_eq!(smw.clone_of_id, None);
    assert_eq!(smw.regions, vec!["USA"]);
    assert_eq!(smw.roms.len(), 1);
    assert_eq!(smw.roms[0].name, "Super Mario World (USA).sfc");
    assert_eq!(smw.roms[0].crc.as_deref(), Some("b19ed489"));
}

#[test]
fn test_clone_and_rom_order() {
    let catalog = parse_dat(SAMPLE_XML_DAT.as_bytes()).unwrap();
    let clone = &catalog.games[1];
    assert_eq!(clone.clone_of_id.as_deref(), Some("0001"));
    assert_eq!(clone.regions, vec!["Europe"]);
    assert_eq!(clone.roms.len(), 2);
    assert_eq!(clone.roms[0].crc.as_deref(), Some("CDD3C8C3"));
    assert_eq!(clone.roms[1].name, "Super Mario World (Europe) (Rev 1).txt");
    assert_eq!(clone.roms[1].crc, None);
}

#[test]
fn test_self_closing_game_has_no_roms() {
    let catalog = parse_dat(SAMPLE_XML_DAT.as_bytes()).unwrap();
    let empty = &catalog.games[2];
    assert_eq!(empty.name, "Empty Game (Japan)");
    assert!(empty.roms.is_empty());
}

#[test]
fn test_game_description_does_not_override_header() {
    let xml = r#"<datafile>
    <game name="A"><description>Not the header</description></game>
</datafile>"#;
    let catalog = parse_dat(xml.as_bytes()).unwrap();
    assert_eq!(catalog.description, None);
    assert_eq!(catalog.games.len(), 1);
}

#[test]
fn test_missing_header() {
    let xml = r#"<datafile><game name="A"><rom name="a.bin"/></game></datafile>"#;
    let catalog = parse_dat(xml.as_bytes()).unwrap();
    assert_eq!(catalog.description, None);
}

#[test]
fn test_empty_description() {
    let xml = r#"<datafile><header><description></description></header></datafile>"#;
    let catalog = parse_dat(xml.as_bytes()).unwrap();
    assert_eq!(catalog.description.as_deref(), Some(""));
    assert!(catalog.games.is_empty());
}

#[test]
fn test_empty_root_is_valid() {
    let xml = r#"<?xml version="1.0"?><datafile></datafile>"#;
    let catalog = parse_dat(xml.as_bytes()).unwrap();
    assert!(catalog.games.is_empty());
}

#[test]
fn test_entities_are_unescaped() {
    let xml = r#"<datafile>
    <header><description>Tom &amp; Jerry Collection</description></header>
    <game name="Tom &amp; Jerry (USA)"><rom name="Tom &amp; Jerry (USA).nes" crc="01234567"/></game>
</datafile>"#;
    let catalog = parse_dat(xml.as_bytes()).unwrap();
    assert_eq!(catalog.description.as_deref(), Some("Tom & Jerry Collection"));
    assert_eq!(catalog.games[0].name, "Tom & Jerry (USA)");
    assert_eq!(catalog.games[0].roms[0].name, "Tom & Jerry (USA).nes");
}

#[test]
fn test_nested_games_are_not_top_level() {
    let xml = r#"<datafile>
    <group><game name="Hidden"><rom name="h.bin"/></game></group>
    <game name="Visible"><rom name="v.bin"/><extra><rom name="nested.bin"/></extra></game>
</datafile>"#;
    let catalog = parse_dat(xml.as_bytes()).unwrap();
    assert_eq!(catalog.games.len(), 1);
    assert_eq!(catalog.games[0].name, "Visible");
    assert_eq!(catalog.games[0].roms.len(), 1);
}

#[test]
fn test_rom_with_end_tag() {
    let xml = r#"<datafile><game name="A"><rom name="a.bin" crc="aa"></rom></game></datafile>"#;
    let catalog = parse_dat(xml.as_bytes()).unwrap();
    assert_eq!(catalog.games[0].roms[0].crc.as_deref(), Some("aa"));
}

#[test]
fn test_mismatched_tags_fail() {
    let xml = r#"<datafile><game name="A"></datafile>"#;
    assert!(parse_dat(xml.as_bytes()).is_err());
}

#[test]
fn test_unterminated_document_fails() {
    let xml = r#"<datafile><game name="A"><rom name="a.bin"/></game>"#;
    assert!(parse_dat(xml.as_bytes()).is_err());
}

#[test]
fn test_empty_document_fails() {
    assert!(parse_dat("".as_bytes()).is_err());
    assert!(parse_dat("   \n".as_bytes()).is_err());
}

#[test]
fn test_second_root_fails() {
    let xml = r#"<datafile></datafile><datafile></datafile>"#;
    assert!(matches!(
        parse_dat(xml.as_bytes()),
        Err(DatError::InvalidDat(_))
    ));
}

#[test]
fn test_game_without_name_fails() {
    let xml = r#"<datafile><game id="1"><rom name="a.bin"/></game></datafile>"#;
    assert!(matches!(
        parse_dat(xml.as_bytes()),
        Err(DatError::InvalidDat(_))
    ));
}

#[test]
fn test_rom_without_name_fails() {
    let xml = r#"<datafile><game name="A"><rom crc="00"/></game></datafile>"#;
    assert!(matches!(
        parse_dat(xml.as_bytes()),
        Err(DatError::InvalidDat(_))
    ));
}

#[test]
fn test_parse_dat_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.dat");
    std::fs::write(&path, SAMPLE_XML_DAT).unwrap();
    let catalog = parse_dat_file(&path).unwrap();
    assert_eq!(catalog.games.len(), 3);
}

#[test]
fn test_parse_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_dat_file(&dir.path().join("missing.dat"));
    assert!(matches!(result, Err(DatError::Io(_))));
}

#[test]
fn test_latin1_declared_encoding() {
    let mut xml = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n".to_vec();
    xml.extend_from_slice(b"<datafile><header><description>Caf\xE9 Collection</description></header>");
    xml.extend_from_slice(b"<game name=\"Caf\xE9 (France)\" id=\"1\">");
    xml.extend_from_slice(b"<rom name=\"Caf\xE9 (France).bin\" crc=\"0a0b0c0d\"/></game></datafile>");

    let catalog = parse_dat(xml.as_slice()).unwrap();
    assert_eq!(catalog.description.as_deref(), Some("Caf\u{e9} Collection"));
    assert_eq!(catalog.games[0].name, "Caf\u{e9} (France)");
    assert_eq!(catalog.games[0].regions, vec!["France"]);
    assert_eq!(catalog.games[0].roms[0].name, "Caf\u{e9} (France).bin");
}

#[test]
fn test_utf8_with_bom() {
    let mut xml = b"\xEF\xBB\xBF".to_vec();
    xml.extend_from_slice("<datafile><game name=\"Caf\u{e9}\"/></datafile>".as_bytes());
    let catalog = parse_dat(xml.as_slice()).unwrap();
    assert_eq!(catalog.games[0].name, "Caf\u{e9}");
}
