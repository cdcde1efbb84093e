//! Remux command synthesis.
//!
//! This module turns a playlist's metadata into a shell command line that
//! remuxes it into a Matroska file with ffmpeg.
//!
//! # Architecture
//!
//! - **command_builder**: Converts a `PlaylistMetadata` into the command text
//! - **synthesize**: Resolves and looks up the playlist first, so a bad
//!   identifier or unknown playlist never produces partial output

mod command_builder;

use std::path::Path;

pub use command_builder::RemuxCommandBuilder;

use crate::buffer::GrowableBuffer;
use crate::error::BdmuxResult;
use crate::playlist::resolve;
use crate::provider::MetadataProvider;

/// External remuxing tool. Trusted constant, emitted unquoted.
pub const REMUX_TOOL: &str = "ffmpeg";

/// Sub-command that writes a playlist's raw stream to stdout.
pub const SPLICE_COMMAND: &str = "splice";

/// Sub-command that prints a playlist's chapters as `FFMETADATA`.
pub const CHAPTERS_COMMAND: &str = "print-ff-chapters";

/// Resolve `playlist`, fetch its metadata and build the remux command.
///
/// `invocation` is the path this program was started by; the command
/// re-invokes it to splice the stream and print chapters.
pub fn synthesize(
    provider: &dyn MetadataProvider,
    invocation: &Path,
    source: &Path,
    playlist: &str,
    output_path: &Path,
) -> BdmuxResult<GrowableBuffer> {
    let id = resolve(playlist)?;
    let metadata = provider.playlist_metadata(id)?;

    tracing::debug!(
        "Synthesizing remux command for playlist {}: {} video, {} audio, {} subtitle streams, {} chapters",
        id,
        metadata.video.len(),
        metadata.audio.len(),
        metadata.subtitles.len(),
        metadata.chapter_count()
    );

    let command = RemuxCommandBuilder::new(invocation, source, &metadata, output_path).build()?;
    Ok(command)
}
