//! CLI presenter for output formatting

use colored::*;

use crate::application::{DeliveryError, DeliveryResult};

/// Presenter for CLI output formatting.
///
/// Status messages go to stderr so a wrapped command's stdout stays clean.
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config show)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Report a notification outcome without changing the exit code
    pub fn delivery(&self, delivery: &Result<DeliveryResult, DeliveryError>) {
        match delivery {
            Ok(DeliveryResult::Delivered { channels, chimed }) => {
                tracing::debug!(?channels, chimed, "Notification delivered");
            }
            Ok(DeliveryResult::Suppressed) => {
                tracing::debug!("Notification suppressed while terminal is focused");
            }
            Err(e) => self.warn(&e.to_string()),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Comma-separated channel list for display
pub fn format_list<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::Channel;

    #[test]
    fn format_list_joins_in_order() {
        assert_eq!(
            format_list(&[Channel::Desktop, Channel::Console]),
            "desktop, console"
        );
    }

    #[test]
    fn format_list_empty() {
        let empty: [Channel; 0] = [];
        assert_eq!(format_list(&empty), "");
    }
}
