//! Ollama JSON / JSON-Lines output
//!
//! `ollama run --format json` and the HTTP API stream one object per line and
//! mark the final one with `"done": true`.

use serde_json::Value;

use super::payload::{text, ParsedHook, Payload, PreviewLimits, NAME_LIMIT};
use crate::domain::error::PayloadError;
use crate::domain::event::Elapsed;

const SOURCE_LABEL: &str = "Ollama hook";

/// Observed event name for every completed line
pub const DONE_EVENT: &str = "done";

/// Parse a whole stream, returning one hook per `"done": true` object
pub fn parse(raw: &str, limits: PreviewLimits) -> Result<Vec<ParsedHook>, PayloadError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(PayloadError::Empty {
            source_label: SOURCE_LABEL,
        });
    }

    let objects = objects(text);
    if objects.is_empty() {
        return Err(PayloadError::NoObjects {
            source_label: SOURCE_LABEL,
        });
    }

    Ok(objects
        .iter()
        .filter(|object| object.get("done") == Some(&Value::Bool(true)))
        .map(|object| from_payload(object, limits))
        .collect())
}

/// A single document (object or array of objects) first, then line by line
fn objects(text: &str) -> Vec<Payload> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => return vec![map],
        Ok(Value::Array(items)) => {
            return items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect()
        }
        _ => {}
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping non-JSON Ollama line");
                None
            }
        })
        .collect()
}

fn from_payload(payload: &Payload, limits: PreviewLimits) -> ParsedHook {
    let mut parsed = ParsedHook::new(DONE_EVENT);
    parsed.duration = payload
        .get("total_duration")
        .and_then(Value::as_u64)
        .map(|nanos| Elapsed::from_millis(nanos / 1_000_000));
    parsed.detail("model", text(payload, &["model"], NAME_LIMIT));
    parsed.detail("response", text(payload, &["response"], limits.reply));
    parsed.detail("reason", text(payload, &["done_reason"], NAME_LIMIT));
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hook::HookKind;

    fn parse(raw: &str) -> Result<Vec<ParsedHook>, PayloadError> {
        super::parse(raw, HookKind::Ollama.default_limits())
    }

    #[test]
    fn notifies_only_done_lines() {
        let parsed = parse("{\"done\":false}\n{\"done\":true}\n{\"done\":false}\n").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].event_name, "done");
    }

    #[test]
    fn skips_partial_and_garbage_lines() {
        let raw = "not json\n{\"model\":\"llama3\",\"done\":true,\"done_reason\":\"stop\"}\n{\"respon";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed[0].details,
            vec!["model: llama3".to_string(), "reason: stop".to_string()]
        );
    }

    #[test]
    fn accepts_pretty_printed_single_object() {
        let raw = "{\n  \"model\": \"llama3\",\n  \"response\": \"Hi there\",\n  \"done\": true,\n  \"total_duration\": 2500000000\n}\n";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].duration, Some(Elapsed::from_millis(2500)));
        assert!(parsed[0].details.contains(&"response: Hi there".to_string()));
    }

    #[test]
    fn no_done_lines_is_empty_not_error() {
        let parsed = parse("{\"done\":false}\n{\"response\":\"partial\"}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn non_boolean_done_is_ignored() {
        let parsed = parse("{\"done\":\"true\"}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn stream_without_objects_is_error() {
        assert_eq!(
            parse("hello\nworld"),
            Err(PayloadError::NoObjects {
                source_label: SOURCE_LABEL
            })
        );
    }

    #[test]
    fn multiple_done_lines_notify_each() {
        let parsed = parse("{\"done\":true}\n{\"done\":true}").unwrap();
        assert_eq!(parsed.len(), 2);
    }
}
