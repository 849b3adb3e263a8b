use std::io::BufRead;
use std::path::Path;

use quick_xml::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use dat2lpl_core::{Catalog, GameRecord, RomRecord};

use crate::error::DatError;

/// Parse a Logiqx-style XML DAT into a [`Catalog`].
///
/// Only `header/description`, root-level `game` elements and the `rom`
/// elements directly inside them are read; everything else is skipped.
/// Games keep document order and each game keeps its rom order. Text and
/// attribute values are decoded with the encoding the XML declaration names.
pub fn parse_dat<R: BufRead>(reader: R) -> Result<Catalog, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut parser = CatalogParser::default();

    loop {
        let decoder = xml.decoder();
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => parser.open(e, decoder)?,
            Event::Empty(ref e) => {
                parser.open(e, decoder)?;
                parser.close()?;
            }
            Event::End(_) => parser.close()?,
            Event::Text(ref e) => {
                let text = e.unescape()?;
                parser.text(&text)?;
            }
            Event::CData(ref e) => {
                let text = e.decode().map_err(quick_xml::Error::from)?;
                parser.text(&text)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    parser.finish()
}

/// Parse a DAT file from a file path.
pub fn parse_dat_file(path: &Path) -> Result<Catalog, DatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_dat(reader)
}

/// Where an open element sits in the DAT structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Root,
    Header,
    Description,
    Game,
    Rom,
    Other,
}

#[derive(Default)]
struct CatalogParser {
    catalog: Catalog,
    stack: Vec<Node>,
    seen_root: bool,
    seen_header: bool,
    current_game: Option<GameRecord>,
}

impl CatalogParser {
    fn open(&mut self, e: &BytesStart<'_>, decoder: Decoder) -> Result<(), DatError> {
        let node = match self.stack.last().copied() {
            None => {
                if self.seen_root {
                    return Err(DatError::invalid_dat(format!(
                        "Unexpected element <{}> after the root element",
                        tag_name(e)
                    )));
                }
                self.seen_root = true;
                Node::Root
            }
            Some(Node::Root) => match e.name().as_ref() {
                b"header" if !self.seen_header => {
                    self.seen_header = true;
                    Node::Header
                }
                b"game" => {
                    self.current_game = Some(parse_game_attributes(e, decoder)?);
                    Node::Game
                }
                _ => Node::Other,
            },
            Some(Node::Header)
                if e.name().as_ref() == b"description" && self.catalog.description.is_none() =>
            {
                self.catalog.description = Some(String::new());
                Node::Description
            }
            Some(Node::Game) if e.name().as_ref() == b"rom" => {
                let rom = parse_rom_attributes(e, decoder)?;
                if let Some(ref mut game) = self.current_game {
                    game.roms.push(rom);
                }
                Node::Rom
            }
            Some(_) => Node::Other,
        };
        self.stack.push(node);
        Ok(())
    }

    fn close(&mut self) -> Result<(), DatError> {
        match self.stack.pop() {
            Some(Node::Game) => {
                if let Some(game) = self.current_game.take() {
                    self.catalog.games.push(game);
                }
                Ok(())
            }
            Some(_) => Ok(()),
            None => Err(DatError::invalid_dat("Closing tag without a matching start")),
        }
    }

    fn text(&mut self, text: &str) -> Result<(), DatError> {
        match self.stack.last() {
            Some(Node::Description) => {
                if let Some(ref mut description) = self.catalog.description {
                    description.push_str(text);
                }
                Ok(())
            }
            Some(_) => Ok(()),
            None => Err(DatError::invalid_dat("Text found outside the root element")),
        }
    }

    fn finish(self) -> Result<Catalog, DatError> {
        if !self.stack.is_empty() {
            return Err(DatError::invalid_dat(format!(
                "Unexpected end of document ({} element(s) left open)",
                self.stack.len()
            )));
        }
        if !self.seen_root {
            return Err(DatError::invalid_dat("No root element found"));
        }
        Ok(self.catalog)
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn parse_game_attributes(e: &BytesStart<'_>, decoder: Decoder) -> Result<GameRecord, DatError> {
    let mut name = None;
    let mut id = None;
    let mut clone_of_id = None;

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.decode_and_unescape_value(decoder)?.to_string();
        match attr.key.as_ref() {
            b"name" => name = Some(value),
            b"id" => id = Some(value),
            b"cloneofid" => clone_of_id = Some(value),
            _ => {}
        }
    }

    let name =
        name.ok_or_else(|| DatError::invalid_dat("<game> element without a name attribute"))?;
    let mut game = GameRecord::new(name);
    game.id = id;
    game.clone_of_id = clone_of_id;
    Ok(game)
}

fn parse_rom_attributes(e: &BytesStart<'_>, decoder: Decoder) -> Result<RomRecord, DatError> {
    let mut name = None;
    let mut crc = None;

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.decode_and_unescape_value(decoder)?.to_string();
        match attr.key.as_ref() {
            b"name" => name = Some(value),
            b"crc" => crc = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| DatError::invalid_dat("<rom> element without a name attribute"))?;
    Ok(RomRecord { name, crc })
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
