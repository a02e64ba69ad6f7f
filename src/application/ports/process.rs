//! Process inspection port interface

use async_trait::async_trait;

/// Result of a single liveness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    /// Process ended and its exit code could be read
    Exited(i32),
    /// Process no longer exists and its exit code is unavailable
    Gone,
}

/// Port for looking at processes we did not start
#[async_trait]
pub trait ProcessProbe: Send + Sync {
    /// Check the process once. Must not block.
    fn probe(&self, pid: u32) -> Liveness;

    /// Best-effort executable name for a PID
    async fn process_name(&self, pid: u32) -> Option<String>;
}
