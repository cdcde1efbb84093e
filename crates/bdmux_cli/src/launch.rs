//! Hand a synthesized command line to a shell.

use std::process::{Command, ExitCode, ExitStatus};

use anyhow::{Context, Result};

/// `<shell> -c <command>`.
fn shell_command(shell: &str, command: &[u8]) -> Command {
    let mut cmd = Command::new(shell);
    cmd.arg("-c").arg(command_arg(command));
    cmd
}

#[cfg(unix)]
fn command_arg(command: &[u8]) -> &std::ffi::OsStr {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::OsStr::from_bytes(command)
}

#[cfg(not(unix))]
fn command_arg(command: &[u8]) -> std::ffi::OsString {
    String::from_utf8_lossy(command).into_owned().into()
}

/// Replace this process with the shell. Only returns on failure.
#[cfg(unix)]
pub fn run_in_shell(shell: &str, command: &[u8]) -> Result<ExitCode> {
    use std::os::unix::process::CommandExt;

    let err = shell_command(shell, command).exec();
    Err(err).with_context(|| format!("failed to execute {}", shell))
}

/// Run the shell and wait for it.
#[cfg(not(unix))]
pub fn run_in_shell(shell: &str, command: &[u8]) -> Result<ExitCode> {
    let status = shell_command(shell, command)
        .status()
        .with_context(|| format!("failed to execute {}", shell))?;
    Ok(exit_code(status))
}

#[cfg_attr(unix, allow(dead_code))]
fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(0) => ExitCode::SUCCESS,
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    }
}
