//! Child process runner with output passthrough and tail capture

use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::application::ports::{ChildExit, CommandOutput, CommandRunner, CommandSpec, RunError};
use crate::domain::event::{Elapsed, TailBuffer};

/// Runs commands with tokio, streaming output through as it arrives
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

type SharedTail = Arc<Mutex<TailBuffer>>;

/// Copy `source` to `sink` unchanged while feeding each line into the tail
async fn pump<R, W>(source: R, mut sink: W, tail: SharedTail)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(source);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if let Err(e) = sink.write_all(&line).await {
                    tracing::debug!(error = %e, "Passthrough write failed");
                }
                let _ = sink.flush().await;
                if let Ok(mut tail) = tail.lock() {
                    tail.push(String::from_utf8_lossy(&line).into_owned());
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Output stream closed with error");
                break;
            }
        }
    }
}

fn child_exit(status: ExitStatus) -> ChildExit {
    if let Some(code) = status.code() {
        return ChildExit::Code(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ChildExit::Signal(signal);
        }
    }
    ChildExit::Code(1)
}

async fn join(task: Option<JoinHandle<()>>) {
    if let Some(task) = task {
        if let Err(e) = task.await {
            tracing::debug!(error = %e, "Output reader task failed");
        }
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunError> {
        let (program, args) = spec.argv.split_first().ok_or(RunError::EmptyCommand)?;

        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::inherit());
        if spec.capture {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let started = Instant::now();
        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RunError::NotFound(program.clone())
            } else {
                RunError::SpawnFailed {
                    program: program.clone(),
                    message: e.to_string(),
                }
            }
        })?;
        tracing::debug!(program = %program, pid = ?child.id(), "Spawned command");

        let tail: SharedTail = Arc::new(Mutex::new(TailBuffer::new(spec.tail_lines)));
        let stdout_task = child
            .stdout
            .take()
            .map(|out| tokio::spawn(pump(out, tokio::io::stdout(), Arc::clone(&tail))));
        let stderr_task = child
            .stderr
            .take()
            .map(|err| tokio::spawn(pump(err, tokio::io::stderr(), Arc::clone(&tail))));

        let status = child
            .wait()
            .await
            .map_err(|e| RunError::WaitFailed(e.to_string()))?;

        // Both streams must be drained before the run counts as complete
        join(stdout_task).await;
        join(stderr_task).await;
        let duration = Elapsed::from(started.elapsed());

        let tail = match Arc::try_unwrap(tail) {
            Ok(buffer) => buffer.into_inner().ok().map(TailBuffer::into_tail),
            Err(shared) => shared.lock().ok().map(|buffer| buffer.clone().into_tail()),
        }
        .unwrap_or_default();

        Ok(CommandOutput {
            exit: child_exit(status),
            duration,
            tail,
        })
    }
}
