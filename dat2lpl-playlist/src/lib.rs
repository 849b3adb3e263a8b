pub mod builder;
pub mod error;
pub mod lpl;
pub mod partition;
pub mod path;

pub use builder::{PlaylistBuilder, db_name};
pub use error::PlaylistError;
pub use lpl::{PlaylistDocument, PlaylistItem, to_json, write_playlist};
pub use partition::{
    NO_REGION_LABEL, Partition, PlannedPlaylist, RegionMap, WORLD_REGION, bucket_output_path,
    partition, sanitize_label,
};
pub use path::{CloneIndex, PathResolver};
