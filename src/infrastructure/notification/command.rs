//! Shared plumbing for notifiers backed by an external command

use std::process::{Output, Stdio};

use tokio::process::Command;

use crate::application::ports::NotificationError;

/// Run `program` with `args` and capture its output.
///
/// The program is looked up on `PATH` first so a missing tool reads as
/// unavailable. The child is killed if the caller stops waiting.
pub(super) async fn run_program(
    backend: &'static str,
    program: &str,
    args: &[String],
) -> Result<Output, NotificationError> {
    let path = which::which(program)
        .map_err(|e| NotificationError::unavailable(backend, format!("{}: {}", program, e)))?;

    Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NotificationError::unavailable(backend, format!("{} not found", program))
            } else {
                NotificationError::send_failed(backend, e.to_string())
            }
        })
}

/// Turn a non-zero exit into `SendFailed` with the program's stderr
pub(super) fn check_status(
    backend: &'static str,
    program: &str,
    output: &Output,
) -> Result<(), NotificationError> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(NotificationError::send_failed(
        backend,
        format!("{} exited with {}: {}", program, output.status, stderr.trim()),
    ))
}
