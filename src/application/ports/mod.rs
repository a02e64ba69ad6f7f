//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod chime;
pub mod config;
pub mod focus;
pub mod follower;
pub mod notifier;
pub mod process;
pub mod runner;

// Re-export common types
pub use chime::{ChimeError, ChimePlayer};
pub use config::ConfigStore;
pub use focus::FocusDetector;
pub use follower::{LineFollower, TailError};
pub use notifier::{NotificationError, NotificationLevel, Notifier};
pub use process::{Liveness, ProcessProbe};
pub use runner::{ChildExit, CommandOutput, CommandRunner, CommandSpec, RunError, EXIT_NOT_FOUND};
