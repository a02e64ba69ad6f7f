//! notify-send notification adapter

use async_trait::async_trait;

use super::command::{check_status, run_program};
use super::APP_NAME;
use crate::application::ports::{NotificationError, NotificationLevel, Notifier};

const BACKEND: &str = "notify-send";

/// notify-send notification adapter (Linux/BSD desktops)
pub struct NotifySendNotifier {
    /// Application name for notifications
    app_name: String,
}

impl NotifySendNotifier {
    /// Create a new notify-send notifier
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    fn args(&self, title: &str, message: &str, level: NotificationLevel) -> Vec<String> {
        let urgency = match level {
            NotificationLevel::Failure => "critical",
            _ => "normal",
        };
        vec![
            "--app-name".to_string(),
            self.app_name.clone(),
            "--icon".to_string(),
            level.icon_name().to_string(),
            "--urgency".to_string(),
            urgency.to_string(),
            "--".to_string(),
            title.to_string(),
            message.to_string(),
        ]
    }
}

impl Default for NotifySendNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifySendNotifier {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn notify(
        &self,
        title: &str,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotificationError> {
        let output = run_program(BACKEND, "notify-send", &self.args(title, message, level)).await?;
        check_status(BACKEND, "notify-send", &output)
    }
}
