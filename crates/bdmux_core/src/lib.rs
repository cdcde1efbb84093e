//! bdmux Core - Blu-ray playlist inspection and remux command synthesis
//!
//! This crate contains the logic behind the `bdmux` command line tool with
//! no process or terminal handling of its own: playlist identifiers, disc
//! metadata lookup, stream splicing, chapter export and the ffmpeg command
//! that ties them together.

pub mod buffer;
pub mod chapters;
pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod models;
pub mod playlist;
pub mod provider;
pub mod remux;
pub mod shell;
pub mod splice;

pub use buffer::{BufferError, BufferResult, GrowableBuffer};
pub use error::{BdmuxError, BdmuxResult};
pub use playlist::{resolve, PlaylistId, PlaylistIdError};
pub use provider::{DiscIndex, MetadataProvider};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
