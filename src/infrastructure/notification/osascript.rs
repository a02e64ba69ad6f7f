//! macOS Notification Center adapter via osascript

use async_trait::async_trait;

use super::command::{check_status, run_program};
use crate::application::ports::{NotificationError, NotificationLevel, Notifier};

const BACKEND: &str = "osascript";

/// Notification Center via `display notification`
pub struct OsascriptNotifier;

impl OsascriptNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OsascriptNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for an AppleScript string literal
fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn script(title: &str, message: &str) -> String {
    format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(message),
        escape_applescript(title)
    )
}

#[async_trait]
impl Notifier for OsascriptNotifier {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn notify(
        &self,
        title: &str,
        message: &str,
        _level: NotificationLevel,
    ) -> Result<(), NotificationError> {
        let args = vec!["-e".to_string(), script(title, message)];
        let output = run_program(BACKEND, "osascript", &args).await?;
        check_status(BACKEND, "osascript", &output)
    }
}
