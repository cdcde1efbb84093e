//! Crate-wide error type.
//!
//! Each concern has its own error enum; `BdmuxError` is what the high-level
//! operations (listing, splicing, chapter printing, command synthesis)
//! return so a caller can report any failure with its context.

use thiserror::Error;

use crate::buffer::BufferError;
use crate::config::ConfigError;
use crate::playlist::{PlaylistId, PlaylistIdError};
use crate::provider::ProviderError;
use crate::splice::SpliceError;

/// Top-level error for bdmux operations.
#[derive(Error, Debug)]
pub enum BdmuxError {
    /// The textual playlist identifier is malformed.
    #[error(transparent)]
    InvalidPlaylistIdentifier(#[from] PlaylistIdError),

    /// The identifier is well formed but the disc has no such playlist.
    #[error("playlist '{0}' not found")]
    PlaylistNotFound(PlaylistId),

    /// Text output could not be built (allocation failure).
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// The metadata provider failed for another reason.
    #[error(transparent)]
    Provider(ProviderError),

    /// Relaying the raw stream failed.
    #[error(transparent)]
    Splice(#[from] SpliceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ProviderError> for BdmuxError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(id) => Self::PlaylistNotFound(id),
            other => Self::Provider(other),
        }
    }
}

/// Result type for bdmux operations.
pub type BdmuxResult<T> = Result<T, BdmuxError>;
