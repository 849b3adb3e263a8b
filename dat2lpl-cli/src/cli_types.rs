//! CLI type definitions.

use std::path::PathBuf;

use clap::Parser;

use dat2lpl_core::{ArchiveFormat, StorageMode};

#[derive(Parser, Debug)]
#[command(name = "dat2lpl", version)]
#[command(about = "Convert DAT XML catalogs to RetroArch LPL playlists", long_about = None)]
pub(crate) struct Cli {
    /// Input DAT XML file
    pub input: PathBuf,

    /// Root path where the ROM files or archives live
    /// (required unless set in settings.toml)
    #[arg(long)]
    pub input_path: Option<PathBuf>,

    /// Archive format for ROMs: None, .zip or .7z [default: .7z]
    #[arg(long)]
    pub archive_format: Option<ArchiveFormat>,

    /// ROM storage mode: Non-merged, Split or Merged [default: Merged]
    #[arg(short, long)]
    pub storage_mode: Option<StorageMode>,

    /// Output LPL file (region playlists are written next to it)
    #[arg(short, long, default_value = "output.lpl")]
    pub output: PathBuf,

    /// Write a separate playlist for each output region
    #[arg(short, long)]
    pub region_split: bool,

    /// JSON file mapping region tags to output names (used with --region-split)
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,

    /// Allow network access for XML schema validation
    #[arg(long)]
    pub enable_network_validation: bool,
}
