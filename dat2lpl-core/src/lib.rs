//! Shared data model for dat2lpl: catalog records, storage policy and
//! region classification.

pub mod game;
pub mod region;
pub mod storage;

pub use game::{Catalog, GameRecord, RomRecord};
pub use region::classify_regions;
pub use storage::{ArchiveFormat, ArchiveFormatParseError, StorageMode, StorageModeParseError};
