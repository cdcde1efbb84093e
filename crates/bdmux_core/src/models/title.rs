//! Playlist metadata: chapters, streams and title summaries.

use serde::{Deserialize, Serialize};

use super::enums::StreamKind;
use super::media::{LanguageCode, StreamDescriptor};
use crate::playlist::PlaylistId;

/// Clock rate of all playlist timestamps (90 kHz).
pub const TICKS_PER_SECOND: u64 = 90_000;

/// One chapter mark, in 90 kHz ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    pub start: u64,
    pub duration: u64,
}

impl ChapterEntry {
    pub fn new(start: u64, duration: u64) -> Self {
        Self { start, duration }
    }

    /// `start + duration`.
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }
}

/// Read-only snapshot of one playlist.
///
/// Stream lists describe the first clip only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMetadata {
    pub playlist: PlaylistId,
    /// Total duration in 90 kHz ticks.
    pub duration: u64,
    pub clip_count: u32,
    pub angle_count: u32,
    pub chapters: Vec<ChapterEntry>,
    pub video: Vec<StreamDescriptor>,
    pub audio: Vec<StreamDescriptor>,
    pub subtitles: Vec<StreamDescriptor>,
}

impl PlaylistMetadata {
    /// Empty metadata for `playlist`: one clip, one angle, no streams.
    pub fn new(playlist: PlaylistId) -> Self {
        Self {
            playlist,
            duration: 0,
            clip_count: 1,
            angle_count: 1,
            chapters: Vec::new(),
            video: Vec::new(),
            audio: Vec::new(),
            subtitles: Vec::new(),
        }
    }

    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_chapter(mut self, start: u64, duration: u64) -> Self {
        self.chapters.push(ChapterEntry::new(start, duration));
        self
    }

    /// Append a stream, assigning the next ordinal of its kind.
    pub fn with_stream(mut self, kind: StreamKind, pid: u16, lang: Option<LanguageCode>) -> Self {
        self.push_stream(kind, pid, lang);
        self
    }

    /// Append a stream, assigning the next ordinal of its kind.
    pub fn push_stream(&mut self, kind: StreamKind, pid: u16, lang: Option<LanguageCode>) {
        let list = match kind {
            StreamKind::Video => &mut self.video,
            StreamKind::Audio => &mut self.audio,
            StreamKind::Subtitles => &mut self.subtitles,
        };
        let ordinal = list.len();
        list.push(StreamDescriptor::new(kind, pid, lang, ordinal));
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Streams of one kind, in ordinal order.
    pub fn streams(&self, kind: StreamKind) -> &[StreamDescriptor] {
        match kind {
            StreamKind::Video => &self.video,
            StreamKind::Audio => &self.audio,
            StreamKind::Subtitles => &self.subtitles,
        }
    }

    pub fn summary(&self) -> TitleSummary {
        TitleSummary {
            playlist: self.playlist,
            duration: self.duration,
            clip_count: self.clip_count,
            chapter_count: self.chapters.len() as u32,
            angle_count: self.angle_count,
        }
    }
}

/// One row of a title listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TitleSummary {
    pub playlist: PlaylistId,
    /// Duration in 90 kHz ticks.
    pub duration: u64,
    pub clip_count: u32,
    pub chapter_count: u32,
    pub angle_count: u32,
}

impl TitleSummary {
    /// Duration split into hours, minutes and seconds.
    pub fn length_hms(&self) -> (u64, u64, u64) {
        let secs = self.duration / TICKS_PER_SECOND;
        (secs / 3600, (secs / 60) % 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> Option<LanguageCode> {
        LanguageCode::parse(code).unwrap()
    }

    #[test]
    fn chapter_end_is_start_plus_duration() {
        assert_eq!(ChapterEntry::new(900_000, 450_000).end(), 1_350_000);
    }

    #[test]
    fn ordinals_are_assigned_per_kind() {
        let meta = PlaylistMetadata::new(PlaylistId::new(1))
            .with_stream(StreamKind::Video, 0x1011, None)
            .with_stream(StreamKind::Audio, 0x1100, lang("eng"))
            .with_stream(StreamKind::Audio, 0x1101, lang("jpn"))
            .with_stream(StreamKind::Video, 0x1012, None);

        let ordinals: Vec<usize> = meta.audio.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1]);
        assert_eq!(meta.streams(StreamKind::Video)[1].pid, 0x1012);
        assert_eq!(meta.streams(StreamKind::Video)[1].ordinal, 1);
        assert!(meta.streams(StreamKind::Subtitles).is_empty());
    }

    #[test]
    fn summary_counts_chapters() {
        let meta = PlaylistMetadata::new(PlaylistId::new(7))
            .with_duration(90_000 * 3725)
            .with_chapter(0, 10)
            .with_chapter(10, 10);
        let summary = meta.summary();
        assert_eq!(summary.chapter_count, 2);
        assert_eq!(summary.length_hms(), (1, 2, 5));
    }
}
