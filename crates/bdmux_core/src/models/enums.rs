//! Core enums used throughout the crate.

use serde::{Deserialize, Serialize};

/// Kind of elementary stream inside a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    /// Presentation graphics (bitmap subtitles).
    Subtitles,
}

impl StreamKind {
    /// All kinds, in the order streams are mapped into the output.
    pub const ALL: [StreamKind; 3] = [StreamKind::Video, StreamKind::Audio, StreamKind::Subtitles];

    /// ffmpeg stream type specifier (`v`, `a`, `s`).
    pub fn specifier(&self) -> &'static str {
        match self {
            StreamKind::Video => "v",
            StreamKind::Audio => "a",
            StreamKind::Subtitles => "s",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
            StreamKind::Subtitles => write!(f, "subtitles"),
        }
    }
}

/// Which titles a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSelector {
    /// Every playlist on the disc.
    All,
    /// Playlists at least `min_duration_secs` long, without duplicates of an
    /// earlier playlist's clip sequence.
    Relevant { min_duration_secs: u32 },
}
