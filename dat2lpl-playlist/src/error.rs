/// Errors that can occur while building or writing playlists.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Region map error: {0}")]
    RegionMap(String),
}

impl PlaylistError {
    pub fn region_map(msg: impl Into<String>) -> Self {
        Self::RegionMap(msg.into())
    }
}
