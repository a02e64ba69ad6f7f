//! Null notification adapter that records calls

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationLevel, Notifier};

const BACKEND: &str = "null";

/// A notification captured by [`NullNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
}

/// Records notifications without showing them.
///
/// Clones share the same record, so a test can keep one handle and give the
/// other to the dispatcher.
#[derive(Clone, Default)]
pub struct NullNotifier {
    sent: Arc<Mutex<Vec<SentNotification>>>,
    unavailable: bool,
}

impl NullNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that always reports `Unavailable` (and still records the attempt)
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for NullNotifier {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn notify(
        &self,
        title: &str,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotificationError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentNotification {
                title: title.to_string(),
                message: message.to_string(),
                level,
            });
        }
        if self.unavailable {
            return Err(NotificationError::unavailable(BACKEND, "configured unavailable"));
        }
        Ok(())
    }

    fn supports_sound(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_notifications() {
        let notifier = NullNotifier::new();
        let handle = notifier.clone();

        notifier
            .notify("title", "body", NotificationLevel::Info)
            .await
            .unwrap();

        assert_eq!(
            handle.sent(),
            vec![SentNotification {
                title: "title".to_string(),
                message: "body".to_string(),
                level: NotificationLevel::Info,
            }]
        );
    }

    #[tokio::test]
    async fn unavailable_reports_error() {
        let notifier = NullNotifier::unavailable();
        let err = notifier
            .notify("title", "body", NotificationLevel::Info)
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::Unavailable { .. }));
        assert_eq!(notifier.sent().len(), 1);
    }
}
