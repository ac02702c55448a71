use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::error::{Error, Result};
use crate::types::CommandOutput;

/// Runs `command` through the system shell inside `directory` and waits for it to
/// finish, capturing stdout and stderr.
///
/// The command string is passed to the shell verbatim. Whoever stored it is trusted;
/// nothing here sanitizes or sandboxes it. There is no timeout, see
/// [`run_command_with_timeout`] for a bounded variant.
pub async fn run_command(directory: &Path, command: &str) -> Result<CommandOutput> {
    check_directory(directory)?;

    let output = shell_command(directory, command)
        .output()
        .await
        .map_err(Error::Io)?;

    Ok(CommandOutput {
        exit_status: exit_code(output.status),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

/// Like [`run_command`], but kills the process once `timeout` has elapsed.
pub async fn run_command_with_timeout(
    directory: &Path,
    command: &str,
    timeout: Duration,
) -> Result<CommandOutput> {
    check_directory(directory)?;

    let child = shell_command(directory, command)
        .kill_on_drop(true)
        .spawn()
        .map_err(Error::Io)?;

    // Dropping the timed-out future drops the child, which kills it.
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| Error::CommandTimedOut(timeout))?
        .map_err(Error::Io)?;

    Ok(CommandOutput {
        exit_status: exit_code(output.status),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

fn check_directory(directory: &Path) -> Result<()> {
    if !directory.is_dir() {
        return Err(Error::InvalidDirectory(directory.to_path_buf()));
    }
    Ok(())
}

#[cfg(unix)]
fn shell_command(directory: &Path, command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    configure(cmd, directory)
}

#[cfg(windows)]
fn shell_command(directory: &Path, command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    configure(cmd, directory)
}

fn configure(mut cmd: Command, directory: &Path) -> Command {
    cmd.current_dir(directory);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
