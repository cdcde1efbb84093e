//! Raw transport stream relay.
//!
//! Copies a playlist stream to a writer in fixed-size chunks. A write that
//! cannot be completed aborts the relay and reports how much of the chunk
//! made it out.

use std::io::{self, ErrorKind, Read, Write};

use thiserror::Error;

use crate::error::BdmuxResult;
use crate::playlist::resolve;
use crate::provider::MetadataProvider;

/// Bytes moved per read/write cycle (a multiple of the 192-byte packet size).
pub const SPLICE_CHUNK_SIZE: usize = 192 * 1024;

/// Errors raised while relaying a stream.
#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("read failure after {relayed} bytes: {source}")]
    Read {
        relayed: u64,
        #[source]
        source: io::Error,
    },

    #[error("write failure: wrote only {written} of {chunk} bytes: {source}")]
    Write {
        written: usize,
        chunk: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to flush output: {0}")]
    Flush(#[source] io::Error),
}

/// Copy everything from `reader` to `writer`. Returns the bytes relayed.
pub fn relay<R, W>(reader: &mut R, writer: &mut W) -> Result<u64, SpliceError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut chunk = vec![0u8; SPLICE_CHUNK_SIZE];
    let mut relayed: u64 = 0;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(SpliceError::Read { relayed, source }),
        };

        write_chunk(writer, &chunk[..n])?;
        relayed += n as u64;
    }

    writer.flush().map_err(SpliceError::Flush)?;
    Ok(relayed)
}

fn write_chunk<W: Write + ?Sized>(writer: &mut W, chunk: &[u8]) -> Result<(), SpliceError> {
    let mut written = 0;
    while written < chunk.len() {
        match writer.write(&chunk[written..]) {
            Ok(0) => {
                return Err(SpliceError::Write {
                    written,
                    chunk: chunk.len(),
                    source: ErrorKind::WriteZero.into(),
                })
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(source) => {
                return Err(SpliceError::Write {
                    written,
                    chunk: chunk.len(),
                    source,
                })
            }
        }
    }
    Ok(())
}

/// Resolve `playlist` and relay its stream to `writer`.
pub fn splice_playlist<W: Write + ?Sized>(
    provider: &dyn MetadataProvider,
    playlist: &str,
    writer: &mut W,
) -> BdmuxResult<u64> {
    let id = resolve(playlist)?;
    let mut reader = provider.open_playlist_stream(id)?;
    let relayed = relay(&mut reader, writer)?;
    tracing::info!("Spliced playlist {} ({} bytes)", id, relayed);
    Ok(relayed)
}
