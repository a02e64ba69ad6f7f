//! Frontmost-app detection on macOS via System Events

use async_trait::async_trait;

use super::query;
use crate::application::ports::FocusDetector;

/// Application process names of known terminal emulators
pub const TERMINAL_APP_NAMES: &[&str] = &[
    "Terminal",
    "iTerm2",
    "Warp",
    "WezTerm",
    "Alacritty",
    "kitty",
    "Ghostty",
    "Hyper",
    "Tabby",
];

const FRONTMOST_SCRIPT: &str =
    "tell application \"System Events\" to get name of first application process whose frontmost is true";

pub struct OsascriptFocusDetector;

impl OsascriptFocusDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OsascriptFocusDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminal_app(name: &str) -> bool {
    TERMINAL_APP_NAMES.contains(&name.trim())
}

#[async_trait]
impl FocusDetector for OsascriptFocusDetector {
    async fn is_frontmost_terminal(&self) -> bool {
        match query("osascript", &["-e", FRONTMOST_SCRIPT]).await {
            Some(app) => {
                tracing::debug!(app = %app, "Frontmost application");
                is_terminal_app(&app)
            }
            None => false,
        }
    }
}
