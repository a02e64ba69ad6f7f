//! Application configuration layer

use serde::{Deserialize, Serialize};

/// Default notification title label
pub const DEFAULT_TITLE_PREFIX: &str = "Agent";

/// Default number of output lines kept for the notification body
pub const DEFAULT_TAIL_LINES: i64 = 20;

/// Default `watch` poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: f64 = 1.0;

/// One configuration layer (defaults, file, environment or CLI flags).
///
/// All fields are optional so a layer only overrides what it explicitly sets.
/// Values stay loosely typed here; [`super::Settings`] validates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub title_prefix: Option<String>,
    pub channels: Option<Vec<String>>,
    pub tail_lines: Option<i64>,
    pub poll_interval: Option<f64>,
    pub quiet_when_focused: Option<bool>,
    pub chime: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            title_prefix: Some(DEFAULT_TITLE_PREFIX.to_string()),
            channels: Some(vec!["desktop".to_string()]),
            tail_lines: Some(DEFAULT_TAIL_LINES),
            poll_interval: Some(DEFAULT_POLL_INTERVAL_SECS),
            quiet_when_focused: Some(false),
            chime: Some("none".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            title_prefix: other.title_prefix.or(self.title_prefix),
            channels: other.channels.or(self.channels),
            tail_lines: other.tail_lines.or(self.tail_lines),
            poll_interval: other.poll_interval.or(self.poll_interval),
            quiet_when_focused: other.quiet_when_focused.or(self.quiet_when_focused),
            chime: other.chime.or(self.chime),
        }
    }

    /// Split a comma-separated channel list, as used by `AGENT_NOTIFY_CHANNELS`
    pub fn split_channels(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .collect()
    }
}
