//! Codex notify payloads
//!
//! Codex passes its payload as a command-line argument. Older versions omit
//! the event field and use kebab-case keys, newer ones use snake_case.

use serde_json::Value;

use super::payload::{
    event_name, parse_object, success_flag, text, ParsedHook, Payload, PreviewLimits,
    REASON_LIMIT, SESSION_LIMIT,
};
use crate::domain::error::PayloadError;
use crate::domain::event::Elapsed;

const SOURCE_LABEL: &str = "Codex hook";

/// Keys that identify a legacy payload without an explicit event field
const LEGACY_KEYS: &[&str] = &[
    "thread-id",
    "turn-id",
    "input-messages",
    "last-assistant-message",
];

/// Event name assumed for legacy payloads
const LEGACY_EVENT: &str = "after_agent";

pub fn parse(raw: &str, limits: PreviewLimits) -> Result<ParsedHook, PayloadError> {
    from_payload(parse_object(raw, SOURCE_LABEL)?, limits)
}

/// Build a payload from positional arguments.
///
/// Accepts a JSON object split across arguments, `key=value` pairs, or
/// alternating `key value` tokens. Returns `None` when there is nothing usable.
pub fn payload_from_args(parts: &[String]) -> Option<Payload> {
    if parts.is_empty() {
        return None;
    }

    let joined = parts.join(" ");
    let joined = joined.trim();
    if joined.is_empty() {
        return None;
    }
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(joined) {
        return Some(map);
    }

    let mut payload = Payload::new();
    let mut loose = Vec::new();
    for part in parts {
        match part.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if !key.is_empty() {
                    payload.insert(key.to_string(), Value::String(value.trim().to_string()));
                }
            }
            None => loose.push(part.as_str()),
        }
    }

    if !loose.is_empty() && loose.len() % 2 == 0 {
        for pair in loose.chunks(2) {
            let key = pair[0].trim();
            if !key.is_empty() {
                payload.insert(key.to_string(), Value::String(pair[1].to_string()));
            }
        }
    } else if !loose.is_empty() && payload.is_empty() {
        payload.insert("raw_payload".to_string(), Value::String(joined.to_string()));
    }

    (!payload.is_empty()).then_some(payload)
}

pub fn from_payload(payload: Payload, limits: PreviewLimits) -> Result<ParsedHook, PayloadError> {
    let event = match event_name(&payload) {
        Some(name) => name,
        None if LEGACY_KEYS.iter().any(|key| payload.contains_key(*key)) => {
            LEGACY_EVENT.to_string()
        }
        None => {
            return Err(PayloadError::MissingEvent {
                source_label: SOURCE_LABEL,
            })
        }
    };

    let mut parsed = ParsedHook::new(event);
    parsed.success = success_flag(&payload).unwrap_or(true);
    parsed.duration = duration(&payload);
    parsed.detail(
        "input",
        text(&payload, &["input-messages", "input_messages"], limits.request),
    );
    parsed.detail(
        "assistant",
        text(
            &payload,
            &["last-assistant-message", "last_assistant_message"],
            limits.reply,
        ),
    );
    parsed.detail("cwd", text(&payload, &["cwd"], REASON_LIMIT));
    parsed.detail("turn", text(&payload, &["turn-id", "turn_id"], SESSION_LIMIT));
    Ok(parsed)
}

fn duration(payload: &Payload) -> Option<Elapsed> {
    if let Some(ms) = payload.get("duration_ms").and_then(number) {
        return Some(Elapsed::from_secs_f64(ms / 1000.0));
    }
    payload
        .get("duration")
        .and_then(number)
        .map(Elapsed::from_secs_f64)
}

/// Numbers may arrive as JSON numbers or, from argument payloads, as strings
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
