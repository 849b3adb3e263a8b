//! The conversion run: validate, parse, build, write.

use std::fs;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use dat2lpl_core::{ArchiveFormat, Catalog, StorageMode};
use dat2lpl_dat::{SchemaFetcher, ValidationOptions, parse_dat, validate_dat};
use dat2lpl_playlist::{
    CloneIndex, PathResolver, PlaylistBuilder, PlaylistDocument, RegionMap, partition, to_json,
    write_playlist,
};

use crate::cli_types::Cli;
use crate::error::CliError;
use crate::settings::Settings;

/// Fully resolved options for one run.
#[derive(Debug, Clone)]
pub(crate) struct ConvertOptions {
    pub input: PathBuf,
    pub input_path: PathBuf,
    pub archive_format: ArchiveFormat,
    pub storage_mode: StorageMode,
    pub output: PathBuf,
    pub region_split: bool,
    pub map: Option<PathBuf>,
    pub enable_network_validation: bool,
}

impl ConvertOptions {
    /// Merge command-line flags with settings defaults (flags win).
    pub(crate) fn resolve(cli: Cli, settings: &Settings) -> Result<Self, CliError> {
        let defaults = &settings.defaults;

        let input_path = cli
            .input_path
            .or_else(|| defaults.input_path.clone())
            .ok_or_else(|| {
                CliError::config("--input-path is required (or set defaults.input_path in settings)")
            })?;

        Ok(Self {
            input: cli.input,
            input_path,
            archive_format: cli
                .archive_format
                .or_else(|| defaults.archive_format())
                .unwrap_or_default(),
            storage_mode: cli
                .storage_mode
                .or_else(|| defaults.storage_mode())
                .unwrap_or_default(),
            output: cli.output,
            region_split: cli.region_split,
            map: cli.map.or_else(|| defaults.map.clone()),
            enable_network_validation: cli.enable_network_validation,
        })
    }
}

/// Run a conversion. Returns the playlist files written, in write order.
pub(crate) fn run_convert(
    opts: &ConvertOptions,
    fetcher: &dyn SchemaFetcher,
) -> Result<Vec<PathBuf>, CliError> {
    let bytes = fs::read(&opts.input)
        .map_err(|e| CliError::input(format!("{}: {e}", opts.input.display())))?;

    let validation = ValidationOptions {
        enable_network: opts.enable_network_validation,
    };
    validate_dat(&bytes, validation, fetcher).map_err(CliError::Validation)?;

    let catalog = parse_dat(bytes.as_slice())?;
    log_catalog(&catalog);

    // Loaded before any bucket is computed so a bad map writes nothing.
    let region_map = if opts.region_split {
        match opts.map {
            Some(ref path) => Some(RegionMap::load(path)?),
            None => Some(RegionMap::default()),
        }
    } else {
        if let Some(ref path) = opts.map {
            log::warn!(
                "Ignoring region map {}: --region-split is not set",
                path.display()
            );
        }
        None
    };

    let resolver = PathResolver::new(
        opts.input_path.clone(),
        opts.archive_format,
        opts.storage_mode,
        CloneIndex::build(&catalog.games),
    );
    log::debug!(
        "Resolving ROM paths under {} ({} storage, archive format {})",
        resolver.input_path().display(),
        resolver.storage_mode(),
        resolver.archive_format()
    );
    let builder = PlaylistBuilder::new(resolver, catalog.description.as_deref());
    log::debug!("Playlist db_name: {}", builder.db_name());

    let mut written = Vec::new();
    match region_map {
        None => {
            let doc = builder.build(&catalog.games);
            write_document(&doc, &opts.output, None)?;
            written.push(opts.output.clone());
        }
        Some(map) => {
            let parts = partition(&catalog.games, &map);
            log::debug!(
                "Partitioned into {} region playlist(s), {} game(s) without region",
                parts.buckets.len(),
                parts.no_region.len()
            );
            for planned in parts.planned_outputs(&opts.output) {
                let doc = builder.build(planned.games.iter().copied());
                write_document(&doc, &planned.path, Some(&planned.label))?;
                written.push(planned.path);
            }
        }
    }

    Ok(written)
}

fn log_catalog(catalog: &Catalog) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    log::debug!("Header description: {:?}", catalog.description);
    log::debug!("Found {} games.", catalog.games.len());
    for game in &catalog.games {
        match serde_json::to_string(game) {
            Ok(json) => log::debug!("{json}"),
            Err(_) => log::debug!("{game:?}"),
        }
    }
}

fn write_document(doc: &PlaylistDocument, path: &Path, label: Option<&str>) -> Result<(), CliError> {
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("LPL output object:\n{}", to_json(doc)?);
    }
    write_playlist(doc, path)?;

    let label = label
        .map(|l| format!(" [{l}]"))
        .unwrap_or_default();
    log::info!(
        "Wrote {}{} ({} items)",
        path.display().if_supports_color(Stdout, |t| t.bold()),
        label.if_supports_color(Stdout, |t| t.cyan()),
        doc.items.len()
    );
    Ok(())
}

#[cfg(test)]
#[path = "tests/convert_tests.rs"]
mod tests;
