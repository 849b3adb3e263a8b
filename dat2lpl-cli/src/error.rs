use thiserror::Error;

use dat2lpl_dat::DatError;
use dat2lpl_playlist::PlaylistError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Input file could not be read
    #[error("Cannot read input: {0}")]
    Input(String),

    /// Well-formedness or schema check failed
    #[error("Input XML is not valid: {0}")]
    Validation(DatError),

    /// DAT file error
    #[error("DAT error: {0}")]
    Dat(#[from] DatError),

    /// Playlist building, mapping or writing failed
    #[error("{0}")]
    Playlist(#[from] PlaylistError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
