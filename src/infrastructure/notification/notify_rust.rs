//! Cross-platform notification adapter using notify-rust
//!
//! Used as the fallback when the platform's command-line tool is missing.

use async_trait::async_trait;

use super::APP_NAME;
use crate::application::ports::{NotificationError, NotificationLevel, Notifier};

const BACKEND: &str = "notify-rust";

/// Cross-platform notifier using notify-rust
pub struct NotifyRustNotifier {
    /// Application name for notifications
    app_name: String,
}

impl NotifyRustNotifier {
    /// Create a new notify-rust notifier
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn notify(
        &self,
        title: &str,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotificationError> {
        let title = title.to_owned();
        let message = message.to_owned();
        let app_name = self.app_name.clone();
        let icon_name = level.icon_name();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .icon(icon_name)
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::unavailable(BACKEND, e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::send_failed(BACKEND, format!("Task join error: {}", e)))?
    }
}
