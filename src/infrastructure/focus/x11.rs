//! Active-window detection on X11 via xdotool

use async_trait::async_trait;

use super::query;
use crate::application::ports::FocusDetector;

/// Lowercased WM_CLASS values of common terminal emulators
const TERMINAL_WINDOW_CLASSES: &[&str] = &[
    "gnome-terminal",
    "gnome-terminal-server",
    "konsole",
    "xterm",
    "uxterm",
    "urxvt",
    "alacritty",
    "kitty",
    "wezterm",
    "org.wezfurlong.wezterm",
    "ghostty",
    "com.mitchellh.ghostty",
    "tilix",
    "terminator",
    "xfce4-terminal",
    "foot",
    "st",
    "tabby",
    "hyper",
    "warp",
];

pub struct XdotoolFocusDetector;

impl XdotoolFocusDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XdotoolFocusDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminal_class(class: &str) -> bool {
    let class = class.trim().to_lowercase();
    TERMINAL_WINDOW_CLASSES.contains(&class.as_str())
}

#[async_trait]
impl FocusDetector for XdotoolFocusDetector {
    async fn is_frontmost_terminal(&self) -> bool {
        if std::env::var_os("DISPLAY").is_none() {
            return false;
        }
        match query("xdotool", &["getactivewindow", "getwindowclassname"]).await {
            Some(class) => {
                tracing::debug!(class = %class, "Active window class");
                is_terminal_class(&class)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_match_case_insensitively() {
        assert!(is_terminal_class("Alacritty"));
        assert!(is_terminal_class("Gnome-terminal\n"));
        assert!(!is_terminal_class("firefox"));
    }
}
