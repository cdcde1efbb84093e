//! Playlist metadata providers.
//!
//! A provider is the only component that knows how a disc is laid out. The
//! rest of the crate consumes the [`PlaylistMetadata`] snapshots and raw
//! stream readers it hands out.
//!
//! # Architecture
//!
//! - **MetadataProvider**: lookup of playlist metadata, title listings and
//!   the raw transport stream of a playlist
//! - **DiscIndex**: provider backed by a JSON index of the disc written by a
//!   scanner, with clip files resolved relative to the index

mod disc_index;

use std::io::{self, Read};
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{PlaylistMetadata, TitleSelector, TitleSummary};
use crate::playlist::PlaylistId;

pub use disc_index::{ClipRecord, DiscIndex, DiscIndexFile, PlaylistRecord, StreamRecord, INDEX_FILE_NAME};

/// Errors reported by metadata providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No playlist with this identifier.
    #[error("playlist '{0}' not found")]
    NotFound(PlaylistId),

    /// The playlist exists but references no clips.
    #[error("playlist '{0}' has no clips")]
    NoClips(PlaylistId),

    #[error("could not open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse disc index {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Source of playlist metadata and raw playlist streams.
pub trait MetadataProvider {
    /// Metadata for one playlist, or [`ProviderError::NotFound`].
    fn playlist_metadata(&self, id: PlaylistId) -> ProviderResult<PlaylistMetadata>;

    /// Summaries of the titles selected by `selector`, in disc order.
    fn title_summaries(&self, selector: TitleSelector) -> ProviderResult<Vec<TitleSummary>>;

    /// The playlist's transport stream: its clips, concatenated in order.
    fn open_playlist_stream(&self, id: PlaylistId) -> ProviderResult<Box<dyn Read + '_>>;
}
