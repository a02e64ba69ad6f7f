//! Notification port interface

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use crate::domain::notification::NotificationLevel;

/// Notification errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    /// Backend cannot run here (missing executable, no session bus, ...)
    #[error("{backend} is unavailable: {reason}")]
    Unavailable {
        backend: &'static str,
        reason: String,
    },

    #[error("{backend} failed to show notification: {reason}")]
    SendFailed {
        backend: &'static str,
        reason: String,
    },

    #[error("{backend} timed out after {}s", .after.as_secs_f64())]
    TimedOut {
        backend: &'static str,
        after: Duration,
    },
}

impl NotificationError {
    pub fn unavailable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            backend,
            reason: reason.into(),
        }
    }

    pub fn send_failed(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::SendFailed {
            backend,
            reason: reason.into(),
        }
    }
}

/// Port for a single notification backend
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short backend name for logs and errors
    fn name(&self) -> &'static str;

    /// Show a notification.
    ///
    /// # Arguments
    /// * `title` - The notification title
    /// * `message` - The notification body
    /// * `level` - Drives the icon or console label
    async fn notify(
        &self,
        title: &str,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotificationError>;

    /// Whether a chime makes sense after delivering through this backend
    fn supports_sound(&self) -> bool {
        true
    }
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    fn name(&self) -> &'static str {
        self.as_ref().name()
    }

    async fn notify(
        &self,
        title: &str,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotificationError> {
        self.as_ref().notify(title, message, level).await
    }

    fn supports_sound(&self) -> bool {
        self.as_ref().supports_sound()
    }
}
