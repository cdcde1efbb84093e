//! `FFMETADATA` chapter writer.

use crate::buffer::{BufferResult, GrowableBuffer};
use crate::error::BdmuxResult;
use crate::models::ChapterEntry;
use crate::playlist::resolve;
use crate::provider::MetadataProvider;

/// First line of every metadata file.
pub const FFMETADATA_HEADER: &str = ";FFMETADATA";

/// Timebase declared for every chapter (90 kHz playlist clock).
pub const CHAPTER_TIMEBASE: &str = "1/90000";

/// Render `chapters` into a new buffer.
pub fn format_ffmetadata(chapters: &[ChapterEntry]) -> BufferResult<GrowableBuffer> {
    let mut buf = GrowableBuffer::new();
    write_ffmetadata(&mut buf, chapters)?;
    Ok(buf)
}

/// Append the header and one block per chapter, in the order given.
///
/// Chapters are neither sorted, merged nor checked for overlap.
pub fn write_ffmetadata(buf: &mut GrowableBuffer, chapters: &[ChapterEntry]) -> BufferResult<()> {
    writeln!(buf, "{}\n", FFMETADATA_HEADER)?;

    for chapter in chapters {
        buf.append_text("[CHAPTER]\n")?;
        writeln!(buf, "TIMEBASE={}", CHAPTER_TIMEBASE)?;
        writeln!(buf, "START={}", chapter.start)?;
        writeln!(buf, "END={}", chapter.end())?;
        buf.append_text("\n")?;
    }

    Ok(())
}

/// Resolve `playlist`, look it up and render its chapters.
///
/// Nothing is rendered unless both steps succeed.
pub fn render_playlist_chapters(
    provider: &dyn MetadataProvider,
    playlist: &str,
) -> BdmuxResult<GrowableBuffer> {
    let id = resolve(playlist)?;
    let metadata = provider.playlist_metadata(id)?;

    tracing::debug!(
        "Rendering {} chapters for playlist {}",
        metadata.chapter_count(),
        id
    );

    Ok(format_ffmetadata(&metadata.chapters)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BdmuxError;
    use crate::playlist::PlaylistId;
    use crate::provider::{DiscIndex, PlaylistRecord};

    #[test]
    fn renders_two_chapters() {
        let chapters = [
            ChapterEntry::new(0, 900_000),
            ChapterEntry::new(900_000, 450_000),
        ];
        let text = format_ffmetadata(&chapters).unwrap();
        assert_eq!(
            text.to_string_lossy(),
            ";FFMETADATA\n\n\
             [CHAPTER]\nTIMEBASE=1/90000\nSTART=0\nEND=900000\n\n\
             [CHAPTER]\nTIMEBASE=1/90000\nSTART=900000\nEND=1350000\n\n"
        );
    }

    #[test]
    fn no_chapters_is_header_only() {
        let text = format_ffmetadata(&[]).unwrap();
        assert_eq!(text.contents(), b";FFMETADATA\n\n");
    }

    #[test]
    fn order_is_preserved_without_validation() {
        let chapters = [
            ChapterEntry::new(500, 100),
            ChapterEntry::new(100, 1000),
            ChapterEntry::new(100, 1000),
        ];
        let text = format_ffmetadata(&chapters).unwrap().to_string_lossy().into_owned();
        let starts: Vec<&str> = text.lines().filter(|l| l.starts_with("START=")).collect();
        assert_eq!(starts, vec!["START=500", "START=100", "START=100"]);
        let ends: Vec<&str> = text.lines().filter(|l| l.starts_with("END=")).collect();
        assert_eq!(ends, vec!["END=600", "END=1100", "END=1100"]);
    }

    #[test]
    fn render_looks_up_playlist() {
        let mut record = PlaylistRecord::new(PlaylistId::new(3));
        record.chapters.push(ChapterEntry::new(10, 20));
        let index = DiscIndex::from_records("/", vec![record]);

        let text = render_playlist_chapters(&index, "00003").unwrap();
        assert!(text.to_string_lossy().contains("START=10\nEND=30\n"));
    }

    #[test]
    fn render_fails_before_writing() {
        let index = DiscIndex::from_records("/", vec![]);
        assert!(matches!(
            render_playlist_chapters(&index, "3"),
            Err(BdmuxError::PlaylistNotFound(_))
        ));
        assert!(matches!(
            render_playlist_chapters(&index, "3x"),
            Err(BdmuxError::InvalidPlaylistIdentifier(_))
        ));
    }
}
