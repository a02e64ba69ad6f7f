//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: desktop and
//! console notifiers, chimes, focus detection, the config file and
//! environment layers, and process/file adapters.

pub mod chime;
pub mod config;
pub mod focus;
pub mod notification;
pub mod process;

// Re-export adapters
pub use chime::SystemChime;
pub use config::FileConfigStore;
pub use focus::{create_focus_detector, NoFocusDetector};
pub use notification::{
    create_console_notifier, create_desktop_notifier, ConsoleNotifier, NullNotifier,
};
pub use process::{FileFollower, SystemProcessProbe, TokioCommandRunner};
