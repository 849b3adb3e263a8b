//! Splitting a catalog into one playlist per output region.
//!
//! A region map is a flat JSON object from region tag to output name:
//!
//! ```json
//! { "USA": "Americas", "Brazil": "Americas", "Europe": "Europe", "Japan": "Japan" }
//! ```
//!
//! Regions missing from the map are their own output. Games tagged `World`
//! are copied into every output named by the map (except one called
//! `World`), and games without any region tag get a playlist of their own.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use dat2lpl_core::GameRecord;

use crate::error::PlaylistError;

/// Region tag that fans a game out to every configured output.
pub const WORLD_REGION: &str = "World";

/// Label of the playlist collecting games without region tags.
pub const NO_REGION_LABEL: &str = "No Region";

/// Characters that can't appear in a playlist file name.
const UNSAFE_FILENAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Region tag → output name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RegionMap {
    entries: IndexMap<String, String>,
}

impl RegionMap {
    /// Load a region map from a JSON file.
    pub fn load(path: &Path) -> Result<Self, PlaylistError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PlaylistError::region_map(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&text).map_err(|e| {
            PlaylistError::region_map(format!("failed to load {}: {e}", path.display()))
        })
    }

    pub fn from_json(text: &str) -> Result<Self, PlaylistError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Output name for `region`; unmapped regions map to themselves.
    pub fn map<'a>(&'a self, region: &'a str) -> &'a str {
        self.entries.get(region).map(String::as_str).unwrap_or(region)
    }

    /// Distinct, non-empty output names in declaration order.
    pub fn output_values(&self) -> IndexSet<&str> {
        self.entries
            .values()
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Games grouped by output region.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    /// Output name → games, in order of first use. No bucket holds two
    /// games with the same name.
    pub buckets: IndexMap<String, Vec<&'a GameRecord>>,
    /// Games without any region tag.
    pub no_region: Vec<&'a GameRecord>,
}

/// One playlist file to be written in region-split mode.
#[derive(Debug, Clone)]
pub struct PlannedPlaylist<'a> {
    pub label: String,
    pub path: PathBuf,
    pub games: Vec<&'a GameRecord>,
}

/// Group `games` by output region according to `map`.
pub fn partition<'a>(
    games: impl IntoIterator<Item = &'a GameRecord>,
    map: &RegionMap,
) -> Partition<'a> {
    let outputs = map.output_values();
    let mut result = Partition::default();

    for game in games {
        if game.regions.is_empty() {
            result.no_region.push(game);
            continue;
        }

        if game.has_region(WORLD_REGION) {
            for &output in outputs.iter().filter(|&&o| o != WORLD_REGION) {
                result.push(output, game);
            }
            continue;
        }

        for region in &game.regions {
            let output = map.map(region);
            if !output.is_empty() {
                result.push(output, game);
            }
        }
    }

    for bucket in result.buckets.values_mut() {
        dedup_by_name(bucket);
    }

    result
}

impl<'a> Partition<'a> {
    fn push(&mut self, output: &str, game: &'a GameRecord) {
        self.buckets.entry(output.to_string()).or_default().push(game);
    }

    /// Files to write for base output path `output`: every region bucket in
    /// order, then the no-region playlist when it has any games.
    pub fn planned_outputs(&self, output: &Path) -> Vec<PlannedPlaylist<'a>> {
        let mut planned: Vec<PlannedPlaylist<'a>> = self
            .buckets
            .iter()
            .map(|(label, games)| PlannedPlaylist {
                label: label.clone(),
                path: bucket_output_path(output, label),
                games: games.clone(),
            })
            .collect();

        if !self.no_region.is_empty() {
            planned.push(PlannedPlaylist {
                label: NO_REGION_LABEL.to_string(),
                path: bucket_output_path(output, NO_REGION_LABEL),
                games: self.no_region.clone(),
            });
        }

        planned
    }
}

/// Keep the first record of each name.
fn dedup_by_name(games: &mut Vec<&GameRecord>) {
    let mut seen = HashSet::new();
    games.retain(|game| seen.insert(game.name.clone()));
}

/// Remove characters that are not allowed in file names.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c))
        .collect()
}

/// Sibling of `output` named `"{stem} ({label}){.ext}"`.
///
/// ```
/// use std::path::Path;
/// use dat2lpl_playlist::bucket_output_path;
///
/// let path = bucket_output_path(Path::new("out/snes.lpl"), "USA/Canada");
/// assert_eq!(path, Path::new("out/snes (USACanada).lpl"));
/// ```
pub fn bucket_output_path(output: &Path, label: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let label = sanitize_label(label);
    let file_name = match output.extension() {
        Some(ext) => format!("{stem} ({label}).{}", ext.to_string_lossy()),
        None => format!("{stem} ({label})"),
    };
    output.with_file_name(file_name)
}

#[cfg(test)]
#[path = "tests/partition_tests.rs"]
mod tests;
