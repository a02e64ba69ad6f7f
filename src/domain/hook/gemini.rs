//! Gemini CLI hook payloads

use serde_json::Value;

use super::payload::{
    event_name, parse_object, success_flag, text, ParsedHook, Payload, PreviewLimits,
    SESSION_LIMIT,
};
use crate::domain::error::PayloadError;

const SOURCE_LABEL: &str = "Gemini hook";

pub fn parse(raw: &str, limits: PreviewLimits) -> Result<ParsedHook, PayloadError> {
    let payload = parse_object(raw, SOURCE_LABEL)?;

    let mut parsed = ParsedHook::new(event_name(&payload).unwrap_or_default());
    parsed.success = success(&payload);
    parsed.detail("prompt", text(&payload, &["prompt"], limits.request));
    parsed.detail("response", text(&payload, &["prompt_response"], limits.reply));
    parsed.detail("error", text(&payload, &["error"], limits.reply));
    parsed.detail("session", text(&payload, &["session_id"], SESSION_LIMIT));
    Ok(parsed)
}

/// The hook only fires on completion, so absent status means success
fn success(payload: &Payload) -> bool {
    if let Some(flag) = success_flag(payload) {
        return flag;
    }
    match payload.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(message)) => message.trim().is_empty(),
        Some(_) => false,
    }
}
