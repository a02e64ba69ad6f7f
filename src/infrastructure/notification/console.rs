//! Console notification adapter

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationLevel, Notifier};

const BACKEND: &str = "console";

/// Prints notifications to standard error
pub struct ConsoleNotifier {
    stream: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    /// Write to standard error
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Write to any stream instead of standard error
    pub fn with_writer(stream: Box<dyn Write + Send>) -> Self {
        Self {
            stream: Mutex::new(stream),
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// `[agent-notify:<level>] <title>` followed by the body
pub fn format_console(title: &str, message: &str, level: NotificationLevel) -> String {
    format!("[agent-notify:{}] {}\n{}\n", level.label(), title, message)
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn notify(
        &self,
        title: &str,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotificationError> {
        let text = format_console(title, message, level);
        let mut stream = self
            .stream
            .lock()
            .map_err(|_| NotificationError::send_failed(BACKEND, "output stream poisoned"))?;
        stream
            .write_all(text.as_bytes())
            .map_err(|e| NotificationError::send_failed(BACKEND, e.to_string()))?;
        stream
            .flush()
            .map_err(|e| NotificationError::send_failed(BACKEND, e.to_string()))
    }
}
