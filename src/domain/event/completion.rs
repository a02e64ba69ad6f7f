//! Canonical "a task finished" event

use std::fmt;

use super::elapsed::Elapsed;
use super::tail::Tail;

/// Where an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Run,
    Watch,
    Tail,
    Emit,
    GeminiHook,
    ClaudeHook,
    CodexHook,
    OllamaHook,
    Test,
}

impl SourceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Watch => "watch",
            Self::Tail => "tail",
            Self::Emit => "emit",
            Self::GeminiHook => "gemini-hook",
            Self::ClaudeHook => "claude-hook",
            Self::CodexHook => "codex-hook",
            Self::OllamaHook => "ollama-hook",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the task ended.
///
/// Only `Exited` carries an exit code, so an event can never hold a code
/// while its success is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Process exit code is known; success means code 0
    Exited(i32),
    /// Completion was reported without an exit code (hook payloads)
    Finished { success: bool },
    /// The task ended but its status cannot be retrieved
    Unknown,
}

impl Outcome {
    /// Tri-state success: `None` when indeterminate
    pub const fn success(&self) -> Option<bool> {
        match self {
            Self::Exited(code) => Some(*code == 0),
            Self::Finished { success } => Some(*success),
            Self::Unknown => None,
        }
    }

    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(*code),
            _ => None,
        }
    }
}

/// Immutable completion event, built once per finished task
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    source: SourceKind,
    tool: Option<String>,
    outcome: Outcome,
    duration: Elapsed,
    tail: Tail,
    details: Vec<String>,
}

impl Event {
    pub fn new(source: SourceKind, outcome: Outcome) -> Self {
        Self {
            source,
            tool: None,
            outcome,
            duration: Elapsed::ZERO,
            tail: Tail::empty(),
            details: Vec::new(),
        }
    }

    /// Set the tool label. Blank labels are treated as absent.
    pub fn with_tool(mut self, tool: Option<&str>) -> Self {
        self.tool = tool
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_duration(mut self, duration: Elapsed) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_tail(mut self, tail: Tail) -> Self {
        self.tail = tail;
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn success(&self) -> Option<bool> {
        self.outcome.success()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.outcome.exit_code()
    }

    pub fn duration(&self) -> Elapsed {
        self.duration
    }

    pub fn tail(&self) -> &Tail {
        &self.tail
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }
}
