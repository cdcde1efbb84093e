//! Chapter metadata output.
//!
//! Chapters are rendered in ffmpeg's `FFMETADATA` text format, which the
//! remux command feeds back to ffmpeg as a second input with
//! `-map_chapters 1`.
//!
//! # Usage
//!
//! ```
//! use bdmux_core::chapters::format_ffmetadata;
//! use bdmux_core::models::ChapterEntry;
//!
//! let text = format_ffmetadata(&[ChapterEntry::new(0, 900_000)]).unwrap();
//! assert!(text.to_string_lossy().starts_with(";FFMETADATA\n\n[CHAPTER]\n"));
//! ```

mod ffmetadata;

pub use ffmetadata::{
    format_ffmetadata, render_playlist_chapters, write_ffmetadata, CHAPTER_TIMEBASE,
    FFMETADATA_HEADER,
};
