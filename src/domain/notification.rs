//! Notification content rendered from an event

use crate::domain::config::Settings;
use crate::domain::event::{Elapsed, Event, Outcome};
use crate::domain::text::clip;

/// Longest title sent to any backend
pub const MAX_TITLE_CHARS: usize = 120;

/// Longest body sent to any backend
pub const MAX_BODY_CHARS: usize = 700;

/// Body of a finished event that carried nothing else to show
pub const EMPTY_BODY: &str = "Task event received.";

/// Severity of a notification, used for icons and console labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Failure,
}

impl NotificationLevel {
    /// Get the freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "dialog-information",
            Self::Success => "dialog-ok",
            Self::Failure => "dialog-error",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    fn from_success(success: Option<bool>) -> Self {
        match success {
            Some(true) => Self::Success,
            Some(false) => Self::Failure,
            None => Self::Info,
        }
    }
}

/// Title, body and level ready for a channel backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub level: NotificationLevel,
}

impl NotificationContent {
    /// Render an event.
    ///
    /// `title_override` replaces the `[tool] Status` title verbatim.
    pub fn render(event: &Event, settings: &Settings, title_override: Option<&str>) -> Self {
        let title = match title_override.map(str::trim).filter(|t| !t.is_empty()) {
            Some(custom) => custom.to_string(),
            None => default_title(event, settings),
        };

        Self {
            title: clip(&title, MAX_TITLE_CHARS),
            body: clip(&render_body(event, settings), MAX_BODY_CHARS),
            level: NotificationLevel::from_success(event.success()),
        }
    }
}

fn default_title(event: &Event, settings: &Settings) -> String {
    let label = event.tool().unwrap_or(&settings.title_prefix);
    let status = match event.success() {
        Some(true) => "Done",
        Some(false) => "Failed",
        None => "Unknown",
    };
    format!("[{}] {}", label, status)
}

fn render_body(event: &Event, settings: &Settings) -> String {
    let mut lines: Vec<String> = Vec::new();

    match event.outcome() {
        // Hooks and matches never had an exit code; duration only when reported
        Outcome::Finished { .. } => {
            if event.duration() != Elapsed::ZERO {
                lines.push(format!("duration: {}", event.duration()));
            }
        }
        Outcome::Exited(_) | Outcome::Unknown => {
            lines.push(format!("duration: {}", event.duration()));
            lines.push(match event.exit_code() {
                Some(code) => format!("exit code: {}", code),
                None => "exit code: unknown".to_string(),
            });
        }
    }

    lines.extend(
        event
            .details()
            .iter()
            .filter(|line| !line.trim().is_empty())
            .cloned(),
    );

    let tail = event.tail().capped(settings.tail_lines);
    if !tail.is_empty() {
        lines.push("tail:".to_string());
        if tail.omitted() > 0 {
            lines.push(format!("... ({} earlier lines omitted)", tail.omitted()));
        }
        lines.extend(tail.lines().iter().cloned());
    }

    if lines.is_empty() {
        return EMPTY_BODY.to_string();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{SourceKind, Tail, TailBuffer};

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn success_title_uses_tool() {
        let event = Event::new(SourceKind::Run, Outcome::Exited(0)).with_tool(Some("codex"));
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(content.title, "[codex] Done");
        assert_eq!(content.level, NotificationLevel::Success);
    }

    #[test]
    fn failure_title() {
        let event = Event::new(SourceKind::Run, Outcome::Exited(1)).with_tool(Some("make"));
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(content.title, "[make] Failed");
        assert!(content.body.contains("exit code: 1"));
        assert_eq!(content.level, NotificationLevel::Failure);
    }

    #[test]
    fn unknown_title_keeps_third_state() {
        let event = Event::new(SourceKind::Watch, Outcome::Unknown).with_tool(Some("watcher"));
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(content.title, "[watcher] Unknown");
        assert!(content.body.contains("exit code: unknown"));
        assert_eq!(content.level, NotificationLevel::Info);
    }

    #[test]
    fn missing_tool_falls_back_to_prefix() {
        let event = Event::new(SourceKind::Run, Outcome::Exited(0));
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(content.title, "[Agent] Done");
    }

    #[test]
    fn title_override_wins() {
        let event = Event::new(SourceKind::Run, Outcome::Exited(3));
        let content = NotificationContent::render(&event, &settings(), Some("Deploy finished"));
        assert_eq!(content.title, "Deploy finished");
    }

    #[test]
    fn body_has_duration_and_tail() {
        let event = Event::new(SourceKind::Run, Outcome::Exited(0))
            .with_duration(Elapsed::from_secs(192))
            .with_tail(Tail::from_lines(vec!["step 1".to_string(), "step 2".to_string()]));
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(
            content.body,
            "duration: 3m12s\nexit code: 0\ntail:\nstep 1\nstep 2"
        );
    }

    #[test]
    fn body_marks_truncated_tail() {
        let mut buffer = TailBuffer::new(2);
        for line in ["a", "b", "c", "d"] {
            buffer.push(line);
        }
        let event = Event::new(SourceKind::Run, Outcome::Exited(0)).with_tail(buffer.into_tail());
        let content = NotificationContent::render(&event, &settings(), None);
        assert!(content.body.contains("... (2 earlier lines omitted)\nc\nd"));
    }

    #[test]
    fn body_respects_tail_lines_setting() {
        let event = Event::new(SourceKind::Run, Outcome::Exited(0)).with_tail(Tail::from_lines(
            vec!["1".to_string(), "2".to_string(), "3".to_string()],
        ));
        let settings = Settings {
            tail_lines: 1,
            ..Settings::default()
        };
        let content = NotificationContent::render(&event, &settings, None);
        assert!(content.body.ends_with("... (2 earlier lines omitted)\n3"));
    }

    #[test]
    fn test_source_body_is_details_only() {
        let event = Event::new(SourceKind::Test, Outcome::Finished { success: true })
            .with_details(vec!["hello".to_string()]);
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(content.body, "hello");
    }

    #[test]
    fn finished_hook_has_no_exit_code_line() {
        let event = Event::new(SourceKind::ClaudeHook, Outcome::Finished { success: true })
            .with_tool(Some("claude-code"))
            .with_details(vec!["event: Stop".to_string(), "session: abc".to_string()]);
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(content.title, "[claude-code] Done");
        assert_eq!(content.body, "event: Stop\nsession: abc");
    }

    #[test]
    fn finished_hook_keeps_reported_duration() {
        let event = Event::new(SourceKind::CodexHook, Outcome::Finished { success: true })
            .with_duration(Elapsed::from_secs(4))
            .with_details(vec!["event: agent-turn-complete".to_string()]);
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(content.body, "duration: 4s\nevent: agent-turn-complete");
    }

    #[test]
    fn empty_finished_event_gets_placeholder_body() {
        let event = Event::new(SourceKind::GeminiHook, Outcome::Finished { success: true })
            .with_details(vec!["   ".to_string()]);
        let content = NotificationContent::render(&event, &settings(), None);
        assert_eq!(content.body, EMPTY_BODY);
    }

    #[test]
    fn long_title_is_clipped() {
        let long = "x".repeat(300);
        let event = Event::new(SourceKind::Run, Outcome::Exited(0));
        let content = NotificationContent::render(&event, &settings(), Some(&long));
        assert_eq!(content.title.chars().count(), MAX_TITLE_CHARS);
        assert!(content.title.ends_with("..."));
    }
}
