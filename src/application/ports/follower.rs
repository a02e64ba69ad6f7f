//! Log follower port interface

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while following a log file
#[derive(Debug, Error)]
pub enum TailError {
    #[error("Failed to open {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },

    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },
}

/// Port for reading lines from a growing file
#[async_trait]
pub trait LineFollower: Send {
    /// Wait for the next complete line, without its line terminator
    async fn next_line(&mut self) -> Result<String, TailError>;
}
