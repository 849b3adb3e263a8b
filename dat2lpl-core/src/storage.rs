//! How a ROM set is laid out on disk.

/// Container format wrapping each game's ROMs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArchiveFormat {
    /// Loose files in a per-game directory.
    None,
    Zip,
    #[default]
    SevenZip,
}

/// ROM set merge convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageMode {
    /// Every game carries all of its own ROMs.
    NonMerged,
    /// Clones carry only the ROMs that differ from their parent.
    Split,
    /// Clones live inside the parent's archive or directory.
    #[default]
    Merged,
}

impl ArchiveFormat {
    /// All formats, in the order they are offered on the command line.
    pub fn all() -> &'static [ArchiveFormat] {
        &[Self::None, Self::Zip, Self::SevenZip]
    }

    /// File extension appended to the container name ("" for loose files).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Zip => ".zip",
            Self::SevenZip => ".7z",
        }
    }

    pub fn is_archive(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Name used on the command line and in settings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Zip => ".zip",
            Self::SevenZip => ".7z",
        }
    }
}

impl StorageMode {
    pub fn all() -> &'static [StorageMode] {
        &[Self::NonMerged, Self::Split, Self::Merged]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NonMerged => "Non-merged",
            Self::Split => "Split",
            Self::Merged => "Merged",
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when parsing an unrecognized archive format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown archive format: '{0}' (expected None, .zip or .7z)")]
pub struct ArchiveFormatParseError(pub String);

/// Error returned when parsing an unrecognized storage mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage mode: '{0}' (expected Non-merged, Split or Merged)")]
pub struct StorageModeParseError(pub String);

impl std::str::FromStr for ArchiveFormat {
    type Err = ArchiveFormatParseError;

    /// Case-insensitive; the leading dot is optional for archive types.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_start_matches('.') {
            "none" => Ok(Self::None),
            "zip" => Ok(Self::Zip),
            "7z" => Ok(Self::SevenZip),
            _ => Err(ArchiveFormatParseError(s.to_string())),
        }
    }
}

impl std::str::FromStr for StorageMode {
    type Err = StorageModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "non-merged" | "nonmerged" | "non_merged" => Ok(Self::NonMerged),
            "split" => Ok(Self::Split),
            "merged" => Ok(Self::Merged),
            _ => Err(StorageModeParseError(s.to_string())),
        }
    }
}
