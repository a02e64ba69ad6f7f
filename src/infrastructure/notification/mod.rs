//! Notification infrastructure module
//!
//! Each platform has a command-line primary backend with notify-rust as the
//! library fallback. The console backend prints to standard error.

mod command;
mod console;
mod notify_rust;
mod notify_send;
mod null;
mod osascript;
mod powershell;

pub use console::{format_console, ConsoleNotifier};
pub use notify_rust::NotifyRustNotifier;
pub use notify_send::NotifySendNotifier;
pub use null::{NullNotifier, SentNotification};
pub use osascript::OsascriptNotifier;
pub use powershell::PowerShellNotifier;

use std::time::Duration;

use crate::application::dispatch::NotifierChain;
use crate::application::ports::Notifier;

/// Application name shown by notification daemons
pub const APP_NAME: &str = "agent-notify";

/// Platform command-line backend, tried before notify-rust
fn platform_primary() -> Box<dyn Notifier> {
    #[cfg(target_os = "macos")]
    {
        Box::new(OsascriptNotifier::new())
    }
    #[cfg(windows)]
    {
        Box::new(PowerShellNotifier::new())
    }
    #[cfg(not(any(target_os = "macos", windows)))]
    {
        Box::new(NotifySendNotifier::new())
    }
}

/// Create the desktop channel: platform backend, then notify-rust
pub fn create_desktop_notifier(timeout: Duration) -> NotifierChain {
    NotifierChain::new(
        "desktop",
        vec![platform_primary(), Box::new(NotifyRustNotifier::new())],
        timeout,
    )
}

/// Create the console channel
pub fn create_console_notifier(timeout: Duration) -> NotifierChain {
    NotifierChain::new("console", vec![Box::new(ConsoleNotifier::new())], timeout)
}
