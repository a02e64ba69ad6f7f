//! Domain layer - Core business logic
//!
//! Contains the completion event model, configuration values, hook payload
//! parsing and notification rendering. This layer has no dependencies on
//! external systems.

pub mod config;
pub mod error;
pub mod event;
pub mod hook;
pub mod notification;
pub mod text;

// Re-export common types
pub use config::{AppConfig, Channel, Chime, Settings};
pub use error::*;
pub use event::{Elapsed, Event, Outcome, SourceKind, Tail, TailBuffer};
pub use hook::{HookKind, HookMatch, ParsedHook};
pub use notification::{NotificationContent, NotificationLevel};
