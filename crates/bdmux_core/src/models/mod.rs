//! Data models for bdmux.
//!
//! This module contains the read-only view of a playlist handed over by a
//! metadata provider:
//! - Enums for stream kinds and title selection
//! - Stream descriptors and language codes
//! - Playlist metadata, chapters and title summaries

mod enums;
mod media;
mod title;

pub use enums::{StreamKind, TitleSelector};
pub(crate) use media::deserialize_language;
pub use media::{LanguageCode, LanguageCodeError, StreamDescriptor};
pub use title::{ChapterEntry, PlaylistMetadata, TitleSummary, TICKS_PER_SECOND};
