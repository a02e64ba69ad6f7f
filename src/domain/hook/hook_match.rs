//! Event-name filtering for hook invocations

use super::HookKind;

/// Names that refer to the same Codex completion event across versions
const CODEX_ALIASES: &[&str] = &["after-agent", "agent-turn-complete"];

/// Trigger event for one hook invocation.
///
/// Hook frameworks call the command for every event type, so a payload whose
/// event does not match is skipped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookMatch {
    target: String,
    default: &'static str,
}

impl HookMatch {
    /// Use `configured` when it is non-blank, otherwise the tool's default
    pub fn new(kind: HookKind, configured: Option<&str>) -> Self {
        let default = kind.default_event();
        let target = configured
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default)
            .to_string();
        Self { target, default }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn default_event(&self) -> &'static str {
        self.default
    }

    pub fn matches(&self, observed: &str) -> bool {
        let actual = normalize(observed);
        let target = normalize(&self.target);
        if actual.is_empty() {
            return false;
        }
        if actual == target {
            return true;
        }
        CODEX_ALIASES.contains(&actual.as_str()) && CODEX_ALIASES.contains(&target.as_str())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}
