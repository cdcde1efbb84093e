//! CLI command implementations

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bdmux_core::buffer::GrowableBuffer;
use bdmux_core::chapters::render_playlist_chapters;
use bdmux_core::config::Settings;
use bdmux_core::listing::list_titles;
use bdmux_core::models::TitleSelector;
use bdmux_core::provider::MetadataProvider;
use bdmux_core::remux::synthesize;
use bdmux_core::splice::splice_playlist;
use clap::Subcommand;

/// Available CLI commands.
///
/// `splice` and `print-ff-chapters` are also what the synthesized remux
/// command runs, see `bdmux_core::remux::{SPLICE_COMMAND, CHAPTERS_COMMAND}`.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List playlists long enough to be a feature or an episode
    ListPlaylists,
    /// List every playlist on the disc
    ListAllPlaylists,
    /// Write a playlist's transport stream to stdout
    Splice {
        /// Playlist number, e.g. 800 or 00800
        playlist: String,
    },
    /// Print a playlist's chapters in FFMETADATA format
    PrintFfChapters {
        /// Playlist number
        playlist: String,
    },
    /// Print the ffmpeg command that remuxes a playlist to Matroska
    MakeMkvN {
        /// Playlist number
        playlist: String,
        /// Output file
        output: PathBuf,
    },
    /// Remux a playlist to Matroska by running the ffmpeg command
    MakeMkvX {
        /// Playlist number
        playlist: String,
        /// Output file
        output: PathBuf,
    },
}

impl Command {
    /// Commands the synthesized remux line runs as concurrent children.
    ///
    /// These must not write the settings file.
    pub fn is_self_invoked(&self) -> bool {
        matches!(self, Command::Splice { .. } | Command::PrintFfChapters { .. })
    }
}

/// Everything a command needs besides its own arguments.
pub struct Session<'a> {
    pub provider: &'a dyn MetadataProvider,
    /// Disc root as given on the command line.
    pub root: &'a Path,
    /// Path this program was invoked by.
    pub invocation: &'a Path,
    pub settings: &'a Settings,
    pub stdout_is_terminal: bool,
}

/// What is left to do once a command has run.
#[derive(Debug)]
pub enum Outcome {
    Done,
    /// Evaluate this command line in the configured shell.
    Launch(GrowableBuffer),
}

/// Run `command`, writing its output to `out`.
pub fn execute<W: Write>(command: Command, session: &Session<'_>, out: &mut W) -> Result<Outcome> {
    match command {
        Command::ListPlaylists => {
            let selector = TitleSelector::Relevant {
                min_duration_secs: session.settings.listing.min_relevant_secs,
            };
            let table = list_titles(session.provider, selector)?;
            emit(out, table.contents())?;
        }
        Command::ListAllPlaylists => {
            let table = list_titles(session.provider, TitleSelector::All)?;
            emit(out, table.contents())?;
        }
        Command::Splice { playlist } => {
            if session.stdout_is_terminal {
                bail!("refusing to write a transport stream to a terminal");
            }
            splice_playlist(session.provider, &playlist, out)?;
        }
        Command::PrintFfChapters { playlist } => {
            let text = render_playlist_chapters(session.provider, &playlist)?;
            emit(out, text.contents())?;
        }
        Command::MakeMkvN { playlist, output } => {
            let mut line = remux_command(session, &playlist, &output)?;
            line.append_text("\n")?;
            emit(out, line.contents())?;
        }
        Command::MakeMkvX { playlist, output } => {
            let line = remux_command(session, &playlist, &output)?;
            tracing::info!("Running: {}", line.to_string_lossy());
            return Ok(Outcome::Launch(line));
        }
    }

    Ok(Outcome::Done)
}

fn remux_command(session: &Session<'_>, playlist: &str, output: &Path) -> Result<GrowableBuffer> {
    let line = synthesize(
        session.provider,
        session.invocation,
        session.root,
        playlist,
        output,
    )?;
    Ok(line)
}

fn emit<W: Write>(out: &mut W, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes).context("failed to write to stdout")?;
    out.flush().context("failed to write to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdmux_core::models::{ChapterEntry, LanguageCode, TICKS_PER_SECOND};
    use bdmux_core::provider::{ClipRecord, DiscIndex, PlaylistRecord, StreamRecord};
    use bdmux_core::remux::{CHAPTERS_COMMAND, SPLICE_COMMAND};
    use bdmux_core::PlaylistId;
    use clap::{CommandFactory, Parser};
    use std::fs;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: Command,
    }

    fn index(base: &Path) -> DiscIndex {
        let mut clip = ClipRecord::new("00001.m2ts");
        clip.video.push(StreamRecord {
            pid: 0x1011,
            lang: None,
        });
        clip.audio.push(StreamRecord {
            pid: 0x1100,
            lang: LanguageCode::parse("eng").unwrap(),
        });

        let mut feature = PlaylistRecord::new(PlaylistId::new(800));
        feature.duration = 3600 * TICKS_PER_SECOND;
        feature.chapters.push(ChapterEntry::new(0, 900_000));
        feature.clips.push(clip.clone());

        let mut menu = PlaylistRecord::new(PlaylistId::new(1));
        menu.duration = 30 * TICKS_PER_SECOND;
        menu.clips.push(ClipRecord::new("00002.m2ts"));

        DiscIndex::from_records(base, vec![menu, feature])
    }

    fn run(command: Command, terminal: bool) -> (Result<Outcome>, String) {
        let settings = Settings::default();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("00001.m2ts"), b"TS-BYTES").unwrap();
        let provider = index(dir.path());
        let session = Session {
            provider: &provider,
            root: Path::new("/mnt/bd"),
            invocation: Path::new("bdmux"),
            settings: &settings,
            stdout_is_terminal: terminal,
        };
        let mut out = Vec::new();
        let result = execute(command, &session, &mut out);
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn self_invoked_commands_match_the_parser() {
        let cli = Harness::command();
        let names: Vec<&str> = cli.get_subcommands().map(|c| c.get_name()).collect();
        assert!(names.contains(&SPLICE_COMMAND));
        assert!(names.contains(&CHAPTERS_COMMAND));
        assert!(names.contains(&"make-mkv-n"));
        assert!(names.contains(&"list-all-playlists"));
    }

    #[test]
    fn list_playlists_hides_short_titles() {
        let (result, out) = run(Command::ListPlaylists, false);
        assert!(matches!(result.unwrap(), Outcome::Done));
        assert!(out.starts_with("00800    length: 01:00:00"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn list_all_playlists_shows_everything() {
        let (_, out) = run(Command::ListAllPlaylists, false);
        assert_eq!(out.lines().count(), 2);
        assert!(out.starts_with("00001"));
    }

    #[test]
    fn splice_relays_clip_bytes() {
        let (result, out) = run(
            Command::Splice {
                playlist: "800".into(),
            },
            false,
        );
        result.unwrap();
        assert_eq!(out, "TS-BYTES");
    }

    #[test]
    fn splice_refuses_terminal() {
        let (result, out) = run(
            Command::Splice {
                playlist: "800".into(),
            },
            true,
        );
        assert!(result.unwrap_err().to_string().contains("terminal"));
        assert!(out.is_empty());
    }

    #[test]
    fn print_chapters() {
        let (_, out) = run(
            Command::PrintFfChapters {
                playlist: "00800".into(),
            },
            false,
        );
        assert!(out.starts_with(";FFMETADATA\n"));
        assert!(out.contains("END=900000\n"));
    }

    #[test]
    fn make_mkv_n_prints_line() {
        let (_, out) = run(
            Command::MakeMkvN {
                playlist: "800".into(),
                output: PathBuf::from("movie.mkv"),
            },
            false,
        );
        assert!(out.starts_with("ffmpeg -i <('bdmux' '/mnt/bd' splice 800) "));
        assert!(out.ends_with(" 'movie.mkv'\n"));
    }

    #[test]
    fn make_mkv_x_hands_back_command() {
        let (result, out) = run(
            Command::MakeMkvX {
                playlist: "800".into(),
                output: PathBuf::from("movie.mkv"),
            },
            false,
        );
        assert!(out.is_empty());
        match result.unwrap() {
            Outcome::Launch(line) => {
                assert!(line.to_string_lossy().ends_with(" 'movie.mkv'"));
            }
            Outcome::Done => panic!("expected a command to launch"),
        }
    }

    #[test]
    fn errors_name_the_bad_input() {
        let (result, out) = run(
            Command::PrintFfChapters {
                playlist: "8o0".into(),
            },
            false,
        );
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("'8o0'"));
        assert!(msg.contains("position 1"));
        assert!(out.is_empty());

        let (result, _) = run(
            Command::MakeMkvN {
                playlist: "42".into(),
                output: PathBuf::from("o.mkv"),
            },
            false,
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "playlist '00042' not found"
        );
    }
}
