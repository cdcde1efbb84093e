//! Disc index provider.
//!
//! The index is a JSON document describing every playlist of a disc:
//!
//! ```json
//! {
//!   "playlists": [
//!     {
//!       "playlist": 1,
//!       "duration": 540000000,
//!       "angle_count": 1,
//!       "chapters": [{ "start": 0, "duration": 900000 }],
//!       "clips": [
//!         {
//!           "path": "BDMV/STREAM/00001.m2ts",
//!           "video": [{ "pid": 4113 }],
//!           "audio": [{ "pid": 4352, "lang": "eng" }],
//!           "subtitles": [{ "pid": 4608, "lang": "eng" }]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Clip paths are relative to the directory holding the index. Stream
//! records are only read from the first clip.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{MetadataProvider, ProviderError, ProviderResult};
use crate::models::{
    deserialize_language, ChapterEntry, LanguageCode, PlaylistMetadata, StreamKind, TitleSelector,
    TitleSummary, TICKS_PER_SECOND,
};
use crate::playlist::PlaylistId;

/// File name looked up when the disc root is a directory.
pub const INDEX_FILE_NAME: &str = "disc_index.json";

/// On-disk layout of the index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscIndexFile {
    #[serde(default)]
    pub playlists: Vec<PlaylistRecord>,
}

/// One playlist of the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub playlist: PlaylistId,
    /// Duration in 90 kHz ticks.
    #[serde(default)]
    pub duration: u64,
    #[serde(default = "default_angle_count")]
    pub angle_count: u32,
    #[serde(default)]
    pub chapters: Vec<ChapterEntry>,
    #[serde(default)]
    pub clips: Vec<ClipRecord>,
}

fn default_angle_count() -> u32 {
    1
}

/// One clip (transport stream file) of a playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRecord {
    pub path: PathBuf,
    #[serde(default)]
    pub video: Vec<StreamRecord>,
    #[serde(default)]
    pub audio: Vec<StreamRecord>,
    #[serde(default)]
    pub subtitles: Vec<StreamRecord>,
}

impl ClipRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            video: Vec::new(),
            audio: Vec::new(),
            subtitles: Vec::new(),
        }
    }

    fn records(&self, kind: StreamKind) -> &[StreamRecord] {
        match kind {
            StreamKind::Video => &self.video,
            StreamKind::Audio => &self.audio,
            StreamKind::Subtitles => &self.subtitles,
        }
    }
}

/// One elementary stream of a clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRecord {
    pub pid: u16,
    #[serde(
        default,
        deserialize_with = "deserialize_language",
        skip_serializing_if = "Option::is_none"
    )]
    pub lang: Option<LanguageCode>,
}

impl PlaylistRecord {
    pub fn new(playlist: PlaylistId) -> Self {
        Self {
            playlist,
            duration: 0,
            angle_count: 1,
            chapters: Vec::new(),
            clips: Vec::new(),
        }
    }

    fn to_metadata(&self) -> PlaylistMetadata {
        let mut meta = PlaylistMetadata::new(self.playlist).with_duration(self.duration);
        meta.clip_count = self.clips.len() as u32;
        meta.angle_count = self.angle_count;
        meta.chapters = self.chapters.clone();

        if let Some(first) = self.clips.first() {
            for kind in StreamKind::ALL {
                for record in first.records(kind) {
                    meta.push_stream(kind, record.pid, record.lang.clone());
                }
            }
        }

        meta
    }

    fn summary(&self) -> TitleSummary {
        TitleSummary {
            playlist: self.playlist,
            duration: self.duration,
            clip_count: self.clips.len() as u32,
            chapter_count: self.chapters.len() as u32,
            angle_count: self.angle_count,
        }
    }
}

/// Metadata provider backed by a disc index.
#[derive(Debug, Clone)]
pub struct DiscIndex {
    /// Directory clip paths are resolved against.
    base_dir: PathBuf,
    playlists: Vec<PlaylistRecord>,
}

impl DiscIndex {
    /// Open the index for a disc root.
    ///
    /// `root` is either the index file itself or a directory containing
    /// [`INDEX_FILE_NAME`].
    pub fn open(root: impl AsRef<Path>) -> ProviderResult<Self> {
        let root = root.as_ref();
        let index_path = if root.is_dir() {
            root.join(INDEX_FILE_NAME)
        } else {
            root.to_path_buf()
        };

        let content = fs::read(&index_path).map_err(|source| ProviderError::Io {
            path: index_path.clone(),
            source,
        })?;
        let file: DiscIndexFile =
            serde_json::from_slice(&content).map_err(|source| ProviderError::Parse {
                path: index_path.clone(),
                source,
            })?;

        let base_dir = index_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(
            "Loaded disc index {} with {} playlists",
            index_path.display(),
            file.playlists.len()
        );

        Ok(Self::from_records(base_dir, file.playlists))
    }

    /// Build an index from records already in memory.
    pub fn from_records(base_dir: impl Into<PathBuf>, playlists: Vec<PlaylistRecord>) -> Self {
        Self {
            base_dir: base_dir.into(),
            playlists,
        }
    }

    pub fn playlists(&self) -> &[PlaylistRecord] {
        &self.playlists
    }

    fn record(&self, id: PlaylistId) -> ProviderResult<&PlaylistRecord> {
        self.playlists
            .iter()
            .find(|p| p.playlist == id)
            .ok_or(ProviderError::NotFound(id))
    }

    fn clip_path(&self, clip: &ClipRecord) -> PathBuf {
        if clip.path.is_absolute() {
            clip.path.clone()
        } else {
            self.base_dir.join(&clip.path)
        }
    }
}

impl MetadataProvider for DiscIndex {
    fn playlist_metadata(&self, id: PlaylistId) -> ProviderResult<PlaylistMetadata> {
        Ok(self.record(id)?.to_metadata())
    }

    fn title_summaries(&self, selector: TitleSelector) -> ProviderResult<Vec<TitleSummary>> {
        let min_duration_secs = match selector {
            TitleSelector::All => {
                return Ok(self.playlists.iter().map(PlaylistRecord::summary).collect());
            }
            TitleSelector::Relevant { min_duration_secs } => min_duration_secs,
        };

        let min_ticks = u64::from(min_duration_secs) * TICKS_PER_SECOND;
        let mut seen: HashSet<Vec<&Path>> = HashSet::new();
        let mut titles = Vec::new();

        for record in &self.playlists {
            if record.duration < min_ticks {
                tracing::debug!("Skipping short playlist {}", record.playlist);
                continue;
            }

            let clips: Vec<&Path> = record.clips.iter().map(|c| c.path.as_path()).collect();
            if !seen.insert(clips) {
                tracing::debug!("Skipping duplicate playlist {}", record.playlist);
                continue;
            }

            titles.push(record.summary());
        }

        Ok(titles)
    }

    fn open_playlist_stream(&self, id: PlaylistId) -> ProviderResult<Box<dyn Read + '_>> {
        let record = self.record(id)?;
        let mut paths = record.clips.iter().map(|c| self.clip_path(c));

        let first = paths.next().ok_or(ProviderError::NoClips(id))?;
        let file = File::open(&first).map_err(|source| ProviderError::Io {
            path: first.clone(),
            source,
        })?;
        tracing::debug!("Splicing clip {}", first.display());

        Ok(Box::new(ClipChain {
            pending: paths.collect::<Vec<_>>().into_iter(),
            current: Some(file),
        }))
    }
}

/// Reads clip files back to back, opening each one when the previous is
/// exhausted.
struct ClipChain {
    pending: std::vec::IntoIter<PathBuf>,
    current: Option<File>,
}

impl Read for ClipChain {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            if self.current.is_none() {
                let Some(path) = self.pending.next() else {
                    return Ok(0);
                };
                tracing::debug!("Splicing clip {}", path.display());
                let file = File::open(&path)
                    .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
                self.current = Some(file);
            }

            if let Some(file) = self.current.as_mut() {
                let n = file.read(buf)?;
                if n > 0 || buf.is_empty() {
                    return Ok(n);
                }
            }
            self.current = None;
        }
    }
}
