//! Where a game's primary ROM lives under the ROM root.
//!
//! | storage          | archive | path                              |
//! |------------------|---------|-----------------------------------|
//! | non-merged/split | none    | `root/game/rom`                   |
//! | non-merged/split | `.zip`  | `root/game.zip`                   |
//! | merged           | none    | `root/container/rom`              |
//! | merged           | `.7z`   | `root/container.7z#rom`           |
//!
//! Under merged storage the container is the parent game's name when the
//! record is a clone whose parent is in the catalog, otherwise the record's
//! own name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dat2lpl_core::{ArchiveFormat, GameRecord, RomRecord, StorageMode};

/// Immutable id → name lookup for resolving clone parents. Resolution is a
/// single hop: a clone of a clone resolves to its direct parent.
#[derive(Debug, Clone, Default)]
pub struct CloneIndex {
    names: HashMap<String, String>,
}

impl CloneIndex {
    /// Index every record that carries a non-empty id. A repeated id maps to
    /// the last record declaring it.
    pub fn build<'a>(games: impl IntoIterator<Item = &'a GameRecord>) -> Self {
        let names = games
            .into_iter()
            .filter_map(|game| match game.id.as_deref() {
                Some(id) if !id.is_empty() => Some((id.to_string(), game.name.clone())),
                _ => None,
            })
            .collect();
        Self { names }
    }

    /// Name of the record's parent, if its clone id resolves.
    pub fn parent_name(&self, game: &GameRecord) -> Option<&str> {
        let id = game.clone_of_id.as_deref().filter(|id| !id.is_empty())?;
        self.names.get(id).map(String::as_str)
    }

    /// Directory or archive name holding the record under merged storage.
    pub fn container_name<'a>(&'a self, game: &'a GameRecord) -> &'a str {
        self.parent_name(game).unwrap_or(&game.name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Computes playlist paths for one storage layout.
#[derive(Debug, Clone)]
pub struct PathResolver {
    input_path: PathBuf,
    archive_format: ArchiveFormat,
    storage_mode: StorageMode,
    clones: CloneIndex,
}

impl PathResolver {
    pub fn new(
        input_path: impl Into<PathBuf>,
        archive_format: ArchiveFormat,
        storage_mode: StorageMode,
        clones: CloneIndex,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            archive_format,
            storage_mode,
            clones,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn archive_format(&self) -> ArchiveFormat {
        self.archive_format
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.storage_mode
    }

    /// Path of `rom` (a ROM of `game`) as the frontend should open it.
    pub fn resolve(&self, game: &GameRecord, rom: &RomRecord) -> String {
        match self.storage_mode {
            StorageMode::NonMerged | StorageMode::Split => {
                if self.archive_format.is_archive() {
                    path_string(&self.archive_path(&game.name))
                } else {
                    path_string(&self.input_path.join(&game.name).join(&rom.name))
                }
            }
            StorageMode::Merged => {
                let container = self.clones.container_name(game);
                if self.archive_format.is_archive() {
                    // The member qualifier is never separator-normalized.
                    format!("{}#{}", path_string(&self.archive_path(container)), rom.name)
                } else {
                    path_string(&self.input_path.join(container).join(&rom.name))
                }
            }
        }
    }

    fn archive_path(&self, container: &str) -> PathBuf {
        self.input_path
            .join(format!("{container}{}", self.archive_format.extension()))
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
#[path = "tests/path_tests.rs"]
mod tests;
