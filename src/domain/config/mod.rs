//! Configuration domain types

mod app_config;
mod channel;
mod settings;

pub use app_config::{AppConfig, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TAIL_LINES, DEFAULT_TITLE_PREFIX};
pub use channel::{Channel, Chime};
pub use settings::{resolve, Settings};
