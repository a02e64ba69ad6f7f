//! Events for commands measured elsewhere (shell integration)

use crate::domain::event::{tool_name, Elapsed, Event, Outcome, SourceKind};

/// A command that already finished, as reported by the caller
#[derive(Debug, Clone, Default)]
pub struct EmitInput {
    /// Command text as typed
    pub command: String,
    pub duration_secs: f64,
    pub exit_code: i32,
    pub tool: Option<String>,
}

/// Build a run-style event from externally measured values
pub fn build_event(input: &EmitInput) -> Event {
    let tool = input
        .tool
        .clone()
        .or_else(|| tool_name::infer_from_command(&command_words(&input.command)));

    let mut details = Vec::new();
    let command = input.command.trim();
    if !command.is_empty() {
        details.push(format!("command: {}", crate::domain::text::compact(command, 160)));
    }

    Event::new(SourceKind::Emit, Outcome::Exited(input.exit_code))
        .with_tool(tool.as_deref())
        .with_duration(Elapsed::from_secs_f64(input.duration_secs))
        .with_details(details)
}

/// Split command text the way a POSIX shell would, or on whitespace when the
/// quoting is unbalanced
fn command_words(command: &str) -> Vec<String> {
    shlex::split(command).unwrap_or_else(|| {
        tracing::debug!(command, "Unbalanced quoting, splitting on whitespace");
        command.split_whitespace().map(str::to_string).collect()
    })
}
