//! Tolerant access to hook JSON documents

use serde_json::{Map, Value};

use crate::domain::error::PayloadError;
use crate::domain::event::{Elapsed, Event, Outcome, SourceKind};
use crate::domain::text::compact;

/// A decoded top-level JSON object
pub type Payload = Map<String, Value>;

pub(crate) const EVENT_KEYS: &[&str] = &["hook_event_name", "event", "type"];
pub(crate) const EVENT_LIMIT: usize = 80;
pub(crate) const PROMPT_LIMIT: usize = 160;
pub(crate) const RESPONSE_LIMIT: usize = 220;
pub(crate) const REASON_LIMIT: usize = 120;
pub(crate) const SESSION_LIMIT: usize = 64;
pub(crate) const NAME_LIMIT: usize = 80;
pub(crate) const INPUT_LIMIT: usize = 140;

/// Smallest preview length accepted from the command line
pub const MIN_PREVIEW_CHARS: usize = 20;

/// Preview lengths for the two free-text fields a hook carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLimits {
    /// What was asked: prompt, user prompt or input messages
    pub request: usize,
    /// What came back: response, tool result or assistant message
    pub reply: usize,
}

impl PreviewLimits {
    pub const fn new(request: usize, reply: usize) -> Self {
        Self { request, reply }
    }

    /// Replace the limits that were given, keeping the rest
    pub fn with_overrides(self, request: Option<usize>, reply: Option<usize>) -> Self {
        Self {
            request: request.unwrap_or(self.request),
            reply: reply.unwrap_or(self.reply),
        }
    }
}

/// Completion fields extracted from one hook payload
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHook {
    /// Event name as it appeared in the payload
    pub event_name: String,
    pub success: bool,
    pub duration: Option<Elapsed>,
    /// Labelled preview lines, e.g. `prompt: ...`
    pub details: Vec<String>,
}

impl ParsedHook {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            success: true,
            duration: None,
            details: Vec::new(),
        }
    }

    /// Append `label: value` when the value is present
    pub(crate) fn detail(&mut self, label: &str, value: Option<String>) {
        if let Some(value) = value {
            self.details.push(format!("{}: {}", label, value));
        }
    }

    /// Build the canonical event, with the event name as the first detail line
    pub fn into_event(self, source: SourceKind, tool: &str) -> Event {
        let mut details = Vec::with_capacity(self.details.len() + 1);
        details.push(format!("event: {}", self.event_name));
        details.extend(self.details);

        Event::new(
            source,
            Outcome::Finished {
                success: self.success,
            },
        )
        .with_tool(Some(tool))
        .with_duration(self.duration.unwrap_or(Elapsed::ZERO))
        .with_details(details)
    }
}

/// Decode `raw` as exactly one JSON object
pub(crate) fn parse_object(raw: &str, source_label: &'static str) -> Result<Payload, PayloadError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(PayloadError::Empty { source_label });
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| PayloadError::InvalidJson {
            source_label,
            message: e.to_string(),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(PayloadError::NotAnObject { source_label }),
    }
}

/// First non-empty value among `keys`, whitespace-collapsed and clipped
pub(crate) fn text(payload: &Payload, keys: &[&str], limit: usize) -> Option<String> {
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .filter_map(stringify)
        .map(|value| compact(&value, limit))
        .find(|value| !value.is_empty())
}

/// Event name from the usual keys
pub(crate) fn event_name(payload: &Payload) -> Option<String> {
    text(payload, EVENT_KEYS, EVENT_LIMIT)
}

/// Explicit `success` flag, if the payload carries one
pub(crate) fn success_flag(payload: &Payload) -> Option<bool> {
    payload.get("success").and_then(Value::as_bool)
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(stringify).collect();
            Some(parts.join(" "))
        }
        other => Some(other.to_string()),
    }
}
