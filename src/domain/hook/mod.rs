//! Agent tool hook payloads
//!
//! Each supported tool has its own payload shape. They all reduce to a
//! [`ParsedHook`] which the hook use case turns into an [`Event`].
//!
//! [`Event`]: crate::domain::event::Event

pub mod claude;
pub mod codex;
pub mod gemini;
mod hook_match;
pub mod ollama;
mod payload;

use std::fmt;

use crate::domain::error::PayloadError;
use crate::domain::event::SourceKind;

pub use hook_match::HookMatch;
pub use payload::{ParsedHook, Payload, PreviewLimits, MIN_PREVIEW_CHARS};

/// Supported upstream agent tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    Gemini,
    Claude,
    Codex,
    Ollama,
}

impl HookKind {
    /// Event name that triggers a notification when `--event` is not given
    pub const fn default_event(&self) -> &'static str {
        match self {
            Self::Gemini => "AfterAgent",
            Self::Claude => "Stop",
            Self::Codex => "agent-turn-complete",
            Self::Ollama => ollama::DONE_EVENT,
        }
    }

    /// Tool label used in titles when `--name` is not given
    pub const fn default_tool(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Claude => "claude-code",
            Self::Codex => "codex",
            Self::Ollama => "ollama",
        }
    }

    /// Preview lengths when no `--max-*-chars` flag is given
    pub const fn default_limits(&self) -> PreviewLimits {
        match self {
            Self::Codex => PreviewLimits::new(payload::INPUT_LIMIT, payload::RESPONSE_LIMIT),
            Self::Gemini | Self::Claude | Self::Ollama => {
                PreviewLimits::new(payload::PROMPT_LIMIT, payload::RESPONSE_LIMIT)
            }
        }
    }

    pub const fn source_kind(&self) -> SourceKind {
        match self {
            Self::Gemini => SourceKind::GeminiHook,
            Self::Claude => SourceKind::ClaudeHook,
            Self::Codex => SourceKind::CodexHook,
            Self::Ollama => SourceKind::OllamaHook,
        }
    }

    /// Parse standard-input text into zero or more completed hooks.
    ///
    /// Single-object tools always yield exactly one entry; Ollama yields one
    /// per finished line.
    pub fn parse(&self, raw: &str, limits: PreviewLimits) -> Result<Vec<ParsedHook>, PayloadError> {
        match self {
            Self::Gemini => gemini::parse(raw, limits).map(|hook| vec![hook]),
            Self::Claude => claude::parse(raw, limits).map(|hook| vec![hook]),
            Self::Codex => codex::parse(raw, limits).map(|hook| vec![hook]),
            Self::Ollama => ollama::parse(raw, limits),
        }
    }

    /// Parse from positional arguments when the tool supports them, otherwise
    /// from standard input. `read_stdin` is only called when needed.
    pub fn parse_input<F>(
        &self,
        args: &[String],
        limits: PreviewLimits,
        read_stdin: F,
    ) -> Result<Vec<ParsedHook>, PayloadError>
    where
        F: FnOnce() -> Result<String, PayloadError>,
    {
        if let Self::Codex = self {
            if let Some(payload) = codex::payload_from_args(args) {
                return codex::from_payload(payload, limits).map(|hook| vec![hook]);
            }
        }
        self.parse(&read_stdin()?, limits)
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_kind().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_tool() {
        assert_eq!(HookKind::Gemini.default_event(), "AfterAgent");
        assert_eq!(HookKind::Claude.default_tool(), "claude-code");
        assert_eq!(HookKind::Codex.default_event(), "agent-turn-complete");
        assert_eq!(HookKind::Ollama.default_event(), "done");
        assert_eq!(HookKind::Codex.default_limits(), PreviewLimits::new(140, 220));
        assert_eq!(HookKind::Claude.default_limits(), PreviewLimits::new(160, 220));
    }

    #[test]
    fn display_is_subcommand_name() {
        assert_eq!(HookKind::Claude.to_string(), "claude-hook");
    }

    #[test]
    fn codex_args_take_precedence() {
        let args = vec![r#"{"type":"agent-turn-complete"}"#.to_string()];
        let parsed = HookKind::Codex
            .parse_input(&args, HookKind::Codex.default_limits(), || panic!("stdin must not be read"))
            .unwrap();
        assert_eq!(parsed[0].event_name, "agent-turn-complete");
    }

    #[test]
    fn codex_falls_back_to_stdin() {
        let parsed = HookKind::Codex
            .parse_input(&[], HookKind::Codex.default_limits(), || {
                Ok(r#"{"type":"after_agent"}"#.to_string())
            })
            .unwrap();
        assert_eq!(parsed[0].event_name, "after_agent");
    }

    #[test]
    fn other_tools_ignore_args() {
        let args = vec!["ignored".to_string()];
        let parsed = HookKind::Claude
            .parse_input(&args, HookKind::Claude.default_limits(), || {
                Ok(r#"{"hook_event_name":"Stop"}"#.to_string())
            })
            .unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn codex_args_use_given_limits() {
        let args = vec![
            "type=agent-turn-complete".to_string(),
            format!("last-assistant-message={}", "word ".repeat(20)),
        ];
        let parsed = HookKind::Codex
            .parse_input(&args, PreviewLimits::new(140, 22), || panic!("stdin must not be read"))
            .unwrap();
        assert!(parsed[0]
            .details
            .contains(&"assistant: word word word word...".to_string()));
    }

    #[test]
    fn stdin_errors_propagate() {
        let err = HookKind::Gemini
            .parse_input(&[], HookKind::Gemini.default_limits(), || {
                Err(PayloadError::ReadFailed {
                    source_label: "Gemini hook",
                    message: "closed".to_string(),
                })
            })
            .unwrap_err();
        assert!(matches!(err, PayloadError::ReadFailed { .. }));
    }
}
