//! Pre-flight validation of DAT documents.
//!
//! Every document is checked for well-formedness. When the root element
//! names an XML schema through `xsi:schemaLocation`, the schema can also be
//! fetched and checked against the document, but only when network access
//! has been explicitly allowed. The schema check is structural: the root
//! element must be a global element declaration of the schema and every
//! element used directly under the root must be declared by it.

use std::collections::HashSet;
use std::path::Path;

use quick_xml::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DatError;

/// Namespace bound to the `xsi` prefix in DAT headers.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Options controlling how far validation goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Allow downloading the schema named by `xsi:schemaLocation`.
    pub enable_network: bool,
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// No schema referenced; only well-formedness was checked.
    WellFormed,
    /// A schema is referenced but network access is disabled.
    SchemaSkipped { url: String },
    /// The document matched the referenced schema.
    SchemaValid { url: String },
}

/// Source of schema documents.
pub trait SchemaFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DatError>;
}

/// Fetches schemas over HTTP. A single attempt, no retries.
#[derive(Debug, Default)]
pub struct HttpSchemaFetcher;

impl SchemaFetcher for HttpSchemaFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DatError> {
        log::debug!("Fetching schema from {url}");
        let response = reqwest::blocking::get(url)
            .map_err(|e| DatError::download(format!("{url}: {e}")))?;
        if !response.status().is_success() {
            return Err(DatError::download(format!(
                "HTTP {} for {url}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .map_err(|e| DatError::download(format!("{url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Validate a DAT file on disk. See [`validate_dat`].
pub fn validate_dat_file(
    path: &Path,
    options: ValidationOptions,
    fetcher: &dyn SchemaFetcher,
) -> Result<Validation, DatError> {
    let bytes = std::fs::read(path)?;
    validate_dat(&bytes, options, fetcher)
}

/// Validate a DAT document held in memory.
pub fn validate_dat(
    bytes: &[u8],
    options: ValidationOptions,
    fetcher: &dyn SchemaFetcher,
) -> Result<Validation, DatError> {
    let outline = DocumentOutline::scan(bytes)?;

    let Some(url) = outline.schema_location() else {
        log::debug!("No schema referenced, only checked for well-formed XML");
        return Ok(Validation::WellFormed);
    };

    if !options.enable_network {
        log::warn!(
            "Document references a schema, but network validation is not enabled. \
             Skipping schema validation."
        );
        log::debug!("Would fetch schema from {url} if network validation was enabled");
        return Ok(Validation::SchemaSkipped { url });
    }

    let schema_bytes = fetcher.fetch(&url)?;
    let schema = SchemaDeclarations::parse(&schema_bytes)?;
    schema.check(&outline)?;
    log::debug!("Document is valid against schema {url}");
    Ok(Validation::SchemaValid { url })
}

/// The parts of a document the schema check looks at.
#[derive(Debug, Default)]
struct DocumentOutline {
    root: String,
    root_attributes: Vec<(String, String)>,
    /// Distinct element names directly under the root, first-seen order.
    children: Vec<String>,
}

impl DocumentOutline {
    /// Walk the whole document, failing on anything that isn't well-formed.
    fn scan(bytes: &[u8]) -> Result<Self, DatError> {
        let mut xml = Reader::from_reader(bytes);
        xml.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut outline = DocumentOutline::default();
        let mut depth = 0usize;
        let mut seen_root = false;

        loop {
            let decoder = xml.decoder();
            let event = xml.read_event_into(&mut buf)?;
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    if depth == 0 {
                        if seen_root {
                            return Err(DatError::invalid_dat(
                                "Unexpected element after the root element",
                            ));
                        }
                        seen_root = true;
                        outline.root = qualified_name(e, decoder)?;
                        for attr in e.attributes() {
                            let attr = attr?;
                            let key = decoder
                                .decode(attr.key.as_ref())
                                .map_err(quick_xml::Error::from)?
                                .into_owned();
                            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
                            outline.root_attributes.push((key, value));
                        }
                    } else if depth == 1 {
                        let name = qualified_name(e, decoder)?;
                        if !outline.children.contains(&name) {
                            outline.children.push(name);
                        }
                    }
                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                    }
                }
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| DatError::invalid_dat("Closing tag without a matching start"))?;
                }
                Event::Text(ref e) => {
                    e.unescape()?;
                    if depth == 0 {
                        return Err(DatError::invalid_dat("Text found outside the root element"));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if depth != 0 {
            return Err(DatError::invalid_dat(format!(
                "Unexpected end of document ({depth} element(s) left open)"
            )));
        }
        if !seen_root {
            return Err(DatError::invalid_dat("No root element found"));
        }
        Ok(outline)
    }

    /// Schema URL from `xsi:schemaLocation="namespace url"`.
    fn schema_location(&self) -> Option<String> {
        let prefix = self.root_attributes.iter().find_map(|(key, value)| {
            if value == XSI_NAMESPACE {
                key.strip_prefix("xmlns:")
            } else {
                None
            }
        })?;
        let location_key = format!("{prefix}:schemaLocation");
        let (_, location) = self
            .root_attributes
            .iter()
            .find(|(key, _)| *key == location_key)?;

        let parts: Vec<&str> = location.split_whitespace().collect();
        match parts.as_slice() {
            [_, url] => Some((*url).to_string()),
            _ => None,
        }
    }
}

/// Element names declared by an XML schema.
#[derive(Debug, Default)]
struct SchemaDeclarations {
    global: HashSet<String>,
    all: HashSet<String>,
}

impl SchemaDeclarations {
    fn parse(bytes: &[u8]) -> Result<Self, DatError> {
        let mut xml = Reader::from_reader(bytes);
        xml.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut decls = SchemaDeclarations::default();
        let mut depth = 0usize;

        loop {
            let decoder = xml.decoder();
            let event = xml
                .read_event_into(&mut buf)
                .map_err(|e| DatError::schema_invalid(format!("schema is not well-formed: {e}")))?;
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let name = qualified_name(e, decoder)
                        .map_err(|e| DatError::schema_invalid(e.to_string()))?;
                    if depth == 0 && local_name(&name) != "schema" {
                        return Err(DatError::schema_invalid(format!(
                            "expected an XML schema, found <{name}>"
                        )));
                    }
                    if local_name(&name) == "element" {
                        if let Some(declared) = name_attribute(e, decoder)? {
                            if depth == 1 {
                                decls.global.insert(declared.clone());
                            }
                            decls.all.insert(declared);
                        }
                    }
                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if decls.global.is_empty() {
            return Err(DatError::schema_invalid("schema declares no global elements"));
        }
        Ok(decls)
    }

    fn check(&self, outline: &DocumentOutline) -> Result<(), DatError> {
        let root = local_name(&outline.root);
        if !self.global.contains(root) {
            return Err(DatError::schema_invalid(format!(
                "root element <{root}> is not declared by the schema"
            )));
        }
        for child in &outline.children {
            let child = local_name(child);
            if !self.all.contains(child) {
                return Err(DatError::schema_invalid(format!(
                    "element <{child}> is not declared by the schema"
                )));
            }
        }
        Ok(())
    }
}

fn qualified_name(e: &BytesStart<'_>, decoder: Decoder) -> Result<String, DatError> {
    let name = decoder
        .decode(e.name().as_ref())
        .map_err(quick_xml::Error::from)?
        .into_owned();
    Ok(name)
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

fn name_attribute(e: &BytesStart<'_>, decoder: Decoder) -> Result<Option<String>, DatError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| DatError::schema_invalid(e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(|e| DatError::schema_invalid(e.to_string()))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "tests/schema_tests.rs"]
mod tests;
