//! Agent hook use case

use crate::domain::config::Settings;
use crate::domain::hook::{HookKind, HookMatch, ParsedHook};

use super::dispatch::{DeliveryError, DeliveryResult, NotificationDispatcher};
use super::ports::{ChimePlayer, FocusDetector};

/// Input parameters for the hook use case
#[derive(Debug, Clone)]
pub struct HookInput {
    pub kind: HookKind,
    /// Trigger event override (`--event`)
    pub event: Option<String>,
    /// Tool label override (`--name`)
    pub tool: Option<String>,
    pub title: Option<String>,
}

impl HookInput {
    pub fn new(kind: HookKind) -> Self {
        Self {
            kind,
            event: None,
            tool: None,
            title: None,
        }
    }
}

/// Output from the hook use case
#[derive(Debug, Default)]
pub struct HookReport {
    /// One entry per payload whose event matched
    pub deliveries: Vec<Result<DeliveryResult, DeliveryError>>,
    /// Observed event names that did not match the trigger
    pub skipped: Vec<String>,
}

impl HookReport {
    /// Errors from matched payloads whose notification could not be shown
    pub fn failures(&self) -> impl Iterator<Item = &DeliveryError> {
        self.deliveries.iter().filter_map(|d| d.as_ref().err())
    }
}

/// Filters parsed hook payloads by event name and notifies for matches
pub struct HookNotifyUseCase {
    input: HookInput,
    matcher: HookMatch,
}

impl HookNotifyUseCase {
    /// Create a new use case instance
    pub fn new(input: HookInput) -> Self {
        let matcher = HookMatch::new(input.kind, input.event.as_deref());
        Self { input, matcher }
    }

    pub fn matcher(&self) -> &HookMatch {
        &self.matcher
    }

    /// Dispatch every matching payload in order.
    ///
    /// A mismatch is a silent skip, not an error.
    pub async fn execute<F, C>(
        &self,
        hooks: Vec<ParsedHook>,
        settings: &Settings,
        dispatcher: &NotificationDispatcher<F, C>,
    ) -> HookReport
    where
        F: FocusDetector,
        C: ChimePlayer,
    {
        let tool = self
            .input
            .tool
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(self.input.kind.default_tool());

        let mut report = HookReport::default();
        for hook in hooks {
            if !self.matcher.matches(&hook.event_name) {
                tracing::debug!(
                    hook = %self.input.kind,
                    observed = %hook.event_name,
                    target = %self.matcher.target(),
                    "Hook event does not match, skipping"
                );
                report.skipped.push(hook.event_name);
                continue;
            }

            let event = hook.into_event(self.input.kind.source_kind(), tool);
            let delivery = dispatcher
                .dispatch(&event, settings, self.input.title.as_deref())
                .await;
            report.deliveries.push(delivery);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        ChimeError, NotificationError, NotificationLevel, Notifier,
    };
    use crate::domain::config::Chime;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct Capture {
        sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl Notifier for Capture {
        fn name(&self) -> &'static str {
            "capture"
        }

        async fn notify(
            &self,
            title: &str,
            message: &str,
            _level: NotificationLevel,
        ) -> Result<(), NotificationError> {
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
            Ok(())
        }
    }

    struct NeverFocused;

    #[async_trait]
    impl FocusDetector for NeverFocused {
        async fn is_frontmost_terminal(&self) -> bool {
            false
        }
    }

    struct Silent;

    #[async_trait]
    impl ChimePlayer for Silent {
        async fn play(&self, _chime: Chime) -> Result<(), ChimeError> {
            Ok(())
        }
    }

    fn dispatcher(
        sent: &Arc<Mutex<Vec<(String, String)>>>,
    ) -> NotificationDispatcher<NeverFocused, Silent> {
        NotificationDispatcher::new(
            Box::new(Capture {
                sent: Arc::clone(sent),
            }),
            Box::new(Capture {
                sent: Arc::clone(sent),
            }),
            NeverFocused,
            Silent,
        )
    }

    #[tokio::test]
    async fn matching_event_notifies() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let use_case = HookNotifyUseCase::new(HookInput::new(HookKind::Claude));
        let hooks = HookKind::Claude
            .parse(
                r#"{"hook_event_name":"Stop","session_id":"abc"}"#,
                HookKind::Claude.default_limits(),
            )
            .unwrap();

        let report = use_case
            .execute(hooks, &Settings::default(), &dispatcher(&sent))
            .await;

        assert_eq!(report.deliveries.len(), 1);
        assert!(report.skipped.is_empty());
        let sent = sent.lock().unwrap();
        assert_eq!(sent[0].0, "[claude-code] Done");
        assert!(sent[0].1.contains("event: Stop"));
        assert!(sent[0].1.contains("session: abc"));
    }

    #[tokio::test]
    async fn mismatched_event_is_skipped() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let use_case = HookNotifyUseCase::new(HookInput::new(HookKind::Claude));
        let hooks = HookKind::Claude
            .parse(
                r#"{"hook_event_name":"PreToolUse"}"#,
                HookKind::Claude.default_limits(),
            )
            .unwrap();

        let report = use_case
            .execute(hooks, &Settings::default(), &dispatcher(&sent))
            .await;

        assert!(report.deliveries.is_empty());
        assert_eq!(report.skipped, vec!["PreToolUse".to_string()]);
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn event_override_is_used() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut input = HookInput::new(HookKind::Claude);
        input.event = Some("SubagentStop".to_string());
        let use_case = HookNotifyUseCase::new(input);
        let hooks = HookKind::Claude
            .parse(
                r#"{"hook_event_name":"SubagentStop"}"#,
                HookKind::Claude.default_limits(),
            )
            .unwrap();

        let report = use_case
            .execute(hooks, &Settings::default(), &dispatcher(&sent))
            .await;

        assert_eq!(report.deliveries.len(), 1);
    }

    #[tokio::test]
    async fn ollama_stream_notifies_once() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let use_case = HookNotifyUseCase::new(HookInput::new(HookKind::Ollama));
        let hooks = HookKind::Ollama
            .parse(
                "{\"done\":false}\n{\"done\":true}\n{\"done\":false}\n",
                HookKind::Ollama.default_limits(),
            )
            .unwrap();

        let report = use_case
            .execute(hooks, &Settings::default(), &dispatcher(&sent))
            .await;

        assert_eq!(report.deliveries.len(), 1);
        assert_eq!(sent.lock().unwrap()[0].0, "[ollama] Done");
    }

    #[tokio::test]
    async fn name_override_sets_tool() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut input = HookInput::new(HookKind::Gemini);
        input.tool = Some("gemini-pro".to_string());
        let use_case = HookNotifyUseCase::new(input);
        let hooks = HookKind::Gemini
            .parse(
                r#"{"hook_event_name":"AfterAgent","success":false}"#,
                HookKind::Gemini.default_limits(),
            )
            .unwrap();

        use_case
            .execute(hooks, &Settings::default(), &dispatcher(&sent))
            .await;

        assert_eq!(sent.lock().unwrap()[0].0, "[gemini-pro] Failed");
    }
}
