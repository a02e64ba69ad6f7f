//! Command runner port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::event::{Elapsed, Tail};

/// Exit code reported when the program cannot be found (shell convention)
pub const EXIT_NOT_FOUND: i32 = 127;

/// Errors from spawning or waiting on a child
#[derive(Debug, Error)]
pub enum RunError {
    #[error("No command given")]
    EmptyCommand,

    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Failed to start {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("Failed to wait for command: {0}")]
    WaitFailed(String),
}

impl RunError {
    /// Exit code the wrapper should use when the child never ran
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => EXIT_NOT_FOUND,
            _ => 1,
        }
    }
}

/// What to run and how much output to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program followed by its arguments, never a shell string
    pub argv: Vec<String>,
    /// Capture stdout/stderr into the tail; when false stdio is inherited
    pub capture: bool,
    pub tail_lines: usize,
}

/// How the child terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    Code(i32),
    Signal(i32),
}

impl ChildExit {
    /// Exit code the wrapper mirrors: the code itself, or `128 + signal`
    pub const fn mirrored_code(&self) -> i32 {
        match self {
            Self::Code(code) => *code,
            Self::Signal(signal) => 128 + *signal,
        }
    }
}

/// Result of a completed child process
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub exit: ChildExit,
    pub duration: Elapsed,
    pub tail: Tail,
}

/// Port for running a child process to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Spawn the command, pass its output through, and wait for it to exit.
    ///
    /// Both output streams are fully drained before this returns.
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunError>;
}
