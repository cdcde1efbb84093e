//! bdmux CLI - Command-line interface
//!
//! Lists the playlists of a Blu-ray disc and remuxes them with ffmpeg.

mod commands;
mod launch;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bdmux_core::config::{ConfigManager, LoggingSettings, Settings};
use bdmux_core::logging::{self, LogLevel};
use bdmux_core::DiscIndex;
use clap::{ArgAction, Parser};

use commands::{Outcome, Session};

/// Program name used when `argv[0]` is missing.
const PROGRAM_NAME: &str = "bdmux";

#[derive(Parser, Debug)]
#[command(name = "bdmux")]
#[command(version, about = "List, splice and remux Blu-ray playlists")]
struct Cli {
    /// Settings file [default: ~/.config/bdmux/settings.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more on stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Disc root: a directory holding disc_index.json, or the index itself
    #[arg(value_name = "BD-ROOT")]
    root: PathBuf,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (settings, config_error) =
        load_settings(cli.config.as_deref(), !cli.command.is_self_invoked());
    let level = settings.logging.level.more_verbose(cli.verbose);
    let guard = init_logging(&settings.logging, level);
    if let Some(err) = config_error {
        tracing::warn!("Using default settings: {:#}", err);
    }

    match run(cli, &settings) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Launch(command)) => {
            // Flush the log file before the process image is replaced
            drop(guard);
            match launch::run_in_shell(&settings.launch.shell, command.contents()) {
                Ok(code) => code,
                Err(err) => report(&err),
            }
        }
        Err(err) => report(&err),
    }
}

fn run(cli: Cli, settings: &Settings) -> Result<Outcome> {
    let provider = DiscIndex::open(&cli.root)
        .with_context(|| format!("cannot read disc at {}", cli.root.display()))?;

    let invocation = self_invocation();
    let session = Session {
        provider: &provider,
        root: &cli.root,
        invocation: &invocation,
        settings,
        stdout_is_terminal: io::stdout().is_terminal(),
    };

    let mut stdout = io::stdout().lock();
    commands::execute(cli.command, &session, &mut stdout)
}

fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("{}: error: {:#}", PROGRAM_NAME, err);
    ExitCode::FAILURE
}

/// Path this process was started by, used to re-invoke it from the
/// synthesized remux command.
fn self_invocation() -> PathBuf {
    std::env::args_os()
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(PROGRAM_NAME))
}

/// Load settings, falling back to defaults when the file is unusable.
///
/// With `create` unset the file is only read, never written, and a missing
/// file means defaults.
fn load_settings(explicit: Option<&Path>, create: bool) -> (Settings, Option<anyhow::Error>) {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(default_config_path) else {
        return (Settings::default(), None);
    };

    let mut manager = ConfigManager::new(&path);
    let loaded = if create {
        manager.load_or_create()
    } else if path.exists() {
        manager.load()
    } else {
        return (Settings::default(), None);
    };

    match loaded {
        Ok(()) => (manager.settings().clone(), None),
        Err(err) => {
            let err = anyhow::Error::new(err)
                .context(format!("failed to load config {}", path.display()));
            (Settings::default(), Some(err))
        }
    }
}

/// `$XDG_CONFIG_HOME/bdmux/settings.toml`, else `~/.config/bdmux/settings.toml`.
fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("bdmux").join("settings.toml"))
}

fn init_logging(settings: &LoggingSettings, level: LogLevel) -> Option<logging::WorkerGuard> {
    if !settings.log_to_file {
        logging::init_tracing(level);
        return None;
    }

    match logging::init_tracing_with_file(level, Path::new(&settings.logs_folder)) {
        Ok(guard) => Some(guard),
        Err(err) => {
            logging::init_tracing(level);
            tracing::warn!("Logging to stderr only: {}", err);
            None
        }
    }
}
