//! ffmpeg remux command builder.
//!
//! Builds a single shell command line that remuxes one playlist into a
//! Matroska file:
//!
//! ```text
//! ffmpeg -i <('bdmux' '/mnt/bd' splice 1) \
//!        -i <('bdmux' '/mnt/bd' print-ff-chapters 1) -map_chapters 1 \
//!        -map 0:i:0x1011 -c copy -disposition:v:0 default -metadata:s:v:0 language=eng \
//!        -map 0:i:0x1100 -c copy -disposition:a:0 0 -metadata:s:a:0 language=eng \
//!        'out.mkv'
//! ```
//!
//! Both inputs are process substitutions that re-invoke this program, so the
//! line must be evaluated by a shell that supports `<(...)` (bash, zsh).
//! The children get no `--config`; they read the default settings file and
//! never create or rewrite it.
//!
//! # Disposition policy
//!
//! Only the first video stream is flagged `default`; every other stream,
//! including all audio and subtitle streams, is explicitly cleared. Left to
//! itself ffmpeg flags every stream as default, and players then pick the
//! last subtitle stream automatically.

use std::path::Path;

use crate::buffer::{BufferResult, GrowableBuffer};
use crate::models::{PlaylistMetadata, StreamDescriptor, StreamKind};
use crate::shell::{append_escaped, is_bare_word, os_bytes};

use super::{CHAPTERS_COMMAND, REMUX_TOOL, SPLICE_COMMAND};

/// Builder for the remux command line of one playlist.
pub struct RemuxCommandBuilder<'a> {
    /// Path this program is invoked by, for the process substitutions.
    invocation: &'a Path,
    /// Disc root handed back to the re-invoked program.
    source: &'a Path,
    metadata: &'a PlaylistMetadata,
    output_path: &'a Path,
}

impl<'a> RemuxCommandBuilder<'a> {
    /// Create a new command builder.
    pub fn new(
        invocation: &'a Path,
        source: &'a Path,
        metadata: &'a PlaylistMetadata,
        output_path: &'a Path,
    ) -> Self {
        Self {
            invocation,
            source,
            metadata,
            output_path,
        }
    }

    /// Build the command line into a new buffer.
    pub fn build(&self) -> BufferResult<GrowableBuffer> {
        let mut buf = GrowableBuffer::new();
        self.write_into(&mut buf)?;
        Ok(buf)
    }

    /// Append the command line to `buf`.
    ///
    /// Every fragment ends with one space except the final output token.
    pub fn write_into(&self, buf: &mut GrowableBuffer) -> BufferResult<()> {
        write!(buf, "{} ", REMUX_TOOL)?;

        self.add_self_input(buf, SPLICE_COMMAND)?;

        if self.metadata.chapter_count() > 0 {
            self.add_self_input(buf, CHAPTERS_COMMAND)?;
            buf.append_text("-map_chapters 1 ")?;
        }

        for kind in StreamKind::ALL {
            for stream in self.metadata.streams(kind) {
                self.add_stream(buf, stream)?;
            }
        }

        append_escaped(buf, &os_bytes(self.output_path.as_os_str()))
    }

    /// `-i <('self' 'source' <command> <playlist>) `
    fn add_self_input(&self, buf: &mut GrowableBuffer, command: &str) -> BufferResult<()> {
        buf.append_text("-i <(")?;
        append_escaped(buf, &os_bytes(self.invocation.as_os_str()))?;
        buf.append_text(" ")?;
        append_escaped(buf, &os_bytes(self.source.as_os_str()))?;
        write!(buf, " {} {}) ", command, self.metadata.playlist.get())
    }

    /// Mapping, disposition and language clauses for one stream.
    fn add_stream(&self, buf: &mut GrowableBuffer, stream: &StreamDescriptor) -> BufferResult<()> {
        let specifier = stream.kind.specifier();
        let index = stream.ordinal;

        write!(buf, "-map 0:i:0x{:x} -c copy ", stream.pid)?;
        write!(
            buf,
            "-disposition:{}:{} {} ",
            specifier,
            index,
            disposition(stream)
        )?;

        if let Some(ref lang) = stream.lang {
            write!(buf, "-metadata:s:{}:{} ", specifier, index)?;
            if is_bare_word(lang.as_str().as_bytes()) {
                write!(buf, "language={} ", lang)?;
            } else {
                let token = format!("language={}", lang);
                append_escaped(buf, token.as_bytes())?;
                buf.append_text(" ")?;
            }
        }

        tracing::debug!(
            "ffmpeg mapping for {} stream {} (pid 0x{:x}, lang {:?}): disposition {}",
            stream.kind,
            index,
            stream.pid,
            stream.lang.as_ref().map(|l| l.as_str()),
            disposition(stream)
        );

        Ok(())
    }
}

/// `default` for the first video stream, `0` for everything else.
fn disposition(stream: &StreamDescriptor) -> &'static str {
    if stream.kind == StreamKind::Video && stream.ordinal == 0 {
        "default"
    } else {
        "0"
    }
}
