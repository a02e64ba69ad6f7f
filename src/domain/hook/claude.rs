//! Claude Code hook payloads

use super::payload::{
    event_name, parse_object, text, ParsedHook, PreviewLimits, NAME_LIMIT, REASON_LIMIT,
    SESSION_LIMIT,
};
use crate::domain::error::PayloadError;

const SOURCE_LABEL: &str = "Claude hook";

pub fn parse(raw: &str, limits: PreviewLimits) -> Result<ParsedHook, PayloadError> {
    let payload = parse_object(raw, SOURCE_LABEL)?;

    let mut parsed = ParsedHook::new(event_name(&payload).unwrap_or_default());
    parsed.detail("reason", text(&payload, &["reason"], REASON_LIMIT));
    parsed.detail("prompt", text(&payload, &["user_prompt"], limits.request));
    parsed.detail("tool", text(&payload, &["tool_name"], NAME_LIMIT));
    parsed.detail("result", text(&payload, &["tool_result"], limits.reply));
    parsed.detail("session", text(&payload, &["session_id"], SESSION_LIMIT));
    Ok(parsed)
}
