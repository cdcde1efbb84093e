//! Title listing table.
//!
//! One line per playlist:
//!
//! ```text
//! 00800    length: 01:52:07    clips:   1    chapters:  24    angles:  1
//! ```

use crate::buffer::{BufferResult, GrowableBuffer};
use crate::error::BdmuxResult;
use crate::models::{TitleSelector, TitleSummary};
use crate::provider::MetadataProvider;

/// Append one listing line for `title`.
pub fn write_title_line(buf: &mut GrowableBuffer, title: &TitleSummary) -> BufferResult<()> {
    let (hours, minutes, seconds) = title.length_hms();
    writeln!(
        buf,
        "{}    length: {:02}:{:02}:{:02}    clips: {:3}    chapters: {:3}    angles: {:2}",
        title.playlist, hours, minutes, seconds, title.clip_count, title.chapter_count, title.angle_count
    )
}

/// Render every title into a new buffer.
pub fn format_title_table(titles: &[TitleSummary]) -> BufferResult<GrowableBuffer> {
    let mut buf = GrowableBuffer::new();
    for title in titles {
        write_title_line(&mut buf, title)?;
    }
    Ok(buf)
}

/// Fetch the selected titles from `provider` and render them.
pub fn list_titles(
    provider: &dyn MetadataProvider,
    selector: TitleSelector,
) -> BdmuxResult<GrowableBuffer> {
    let titles = provider.title_summaries(selector)?;
    tracing::debug!("Listing {} titles ({:?})", titles.len(), selector);
    Ok(format_title_table(&titles)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TICKS_PER_SECOND;
    use crate::playlist::PlaylistId;
    use crate::provider::{ClipRecord, DiscIndex, PlaylistRecord};

    fn summary(id: u32, secs: u64) -> TitleSummary {
        TitleSummary {
            playlist: PlaylistId::new(id),
            duration: secs * TICKS_PER_SECOND,
            clip_count: 3,
            chapter_count: 24,
            angle_count: 1,
        }
    }

    #[test]
    fn line_layout() {
        let table = format_title_table(&[summary(800, 6727)]).unwrap();
        assert_eq!(
            table.to_string_lossy(),
            "00800    length: 01:52:07    clips:   3    chapters:  24    angles:  1\n"
        );
    }

    #[test]
    fn hours_are_not_wrapped() {
        let table = format_title_table(&[summary(1, 100 * 3600 + 61)]).unwrap();
        assert!(table.to_string_lossy().contains("length: 100:01:01"));
    }

    #[test]
    fn lists_from_provider() {
        let mut long = PlaylistRecord::new(PlaylistId::new(1));
        long.duration = 600 * TICKS_PER_SECOND;
        long.clips.push(ClipRecord::new("a.m2ts"));
        let mut short = PlaylistRecord::new(PlaylistId::new(2));
        short.duration = 10 * TICKS_PER_SECOND;
        short.clips.push(ClipRecord::new("b.m2ts"));
        let index = DiscIndex::from_records("/", vec![long, short]);

        let all = list_titles(&index, TitleSelector::All).unwrap();
        assert_eq!(all.to_string_lossy().lines().count(), 2);

        let relevant = list_titles(
            &index,
            TitleSelector::Relevant {
                min_duration_secs: 120,
            },
        )
        .unwrap();
        let text = relevant.to_string_lossy().into_owned();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("00001 "));
    }
}
