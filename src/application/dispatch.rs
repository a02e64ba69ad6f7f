//! Notification dispatch: focus check, rendering, channel delivery, chime

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::config::{Channel, Chime, Settings};
use crate::domain::event::Event;
use crate::domain::notification::NotificationContent;

use super::ports::{ChimePlayer, FocusDetector, NotificationError, NotificationLevel, Notifier};

/// Upper bound for a single backend call
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a dispatch that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    /// At least one channel showed the notification
    Delivered { channels: Vec<Channel>, chimed: bool },
    /// Skipped on purpose, e.g. the terminal is focused
    Suppressed,
}

/// Every configured channel failed
#[derive(Debug, Error)]
#[error("No notification channel delivered ({})", describe(.failures))]
pub struct DeliveryError {
    pub failures: Vec<(Channel, NotificationError)>,
}

fn describe(failures: &[(Channel, NotificationError)]) -> String {
    if failures.is_empty() {
        return "no channels configured".to_string();
    }
    failures
        .iter()
        .map(|(channel, err)| format!("{}: {}", channel, err))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered list of backends for one channel; the first that delivers wins.
///
/// Each backend call is bounded by `timeout`, and a timeout falls through to
/// the next backend like any other failure.
pub struct NotifierChain {
    name: &'static str,
    backends: Vec<Box<dyn Notifier>>,
    timeout: Duration,
}

impl NotifierChain {
    pub fn new(name: &'static str, backends: Vec<Box<dyn Notifier>>, timeout: Duration) -> Self {
        Self {
            name,
            backends,
            timeout,
        }
    }

    /// Names of the backends, in the order they are tried
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }
}

#[async_trait]
impl Notifier for NotifierChain {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn notify(
        &self,
        title: &str,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotificationError> {
        let mut last_error = NotificationError::unavailable(self.name, "no backend available");

        for backend in &self.backends {
            match tokio::time::timeout(self.timeout, backend.notify(title, message, level)).await
            {
                Ok(Ok(())) => {
                    tracing::debug!(backend = backend.name(), "Notification delivered");
                    return Ok(());
                }
                Ok(Err(e)) => {
                    tracing::debug!(backend = backend.name(), error = %e, "Backend failed, trying next");
                    last_error = e;
                }
                Err(_) => {
                    tracing::warn!(backend = backend.name(), timeout = ?self.timeout, "Backend timed out");
                    last_error = NotificationError::TimedOut {
                        backend: backend.name(),
                        after: self.timeout,
                    };
                }
            }
        }

        Err(last_error)
    }

    fn supports_sound(&self) -> bool {
        self.backends.iter().any(|b| b.supports_sound())
    }
}

/// Sends a rendered event to every configured channel
pub struct NotificationDispatcher<F, C>
where
    F: FocusDetector,
    C: ChimePlayer,
{
    desktop: Box<dyn Notifier>,
    console: Box<dyn Notifier>,
    focus: F,
    chime: C,
}

impl<F, C> NotificationDispatcher<F, C>
where
    F: FocusDetector,
    C: ChimePlayer,
{
    pub fn new(desktop: Box<dyn Notifier>, console: Box<dyn Notifier>, focus: F, chime: C) -> Self {
        Self {
            desktop,
            console,
            focus,
            chime,
        }
    }

    fn notifier(&self, channel: Channel) -> &dyn Notifier {
        match channel {
            Channel::Desktop => self.desktop.as_ref(),
            Channel::Console => self.console.as_ref(),
        }
    }

    /// Render `event` and deliver it.
    ///
    /// Channels are tried in configured order and all of them are used;
    /// the dispatch only fails when none delivered.
    pub async fn dispatch(
        &self,
        event: &Event,
        settings: &Settings,
        title_override: Option<&str>,
    ) -> Result<DeliveryResult, DeliveryError> {
        if settings.quiet_when_focused && self.focus.is_frontmost_terminal().await {
            tracing::info!(source = %event.source(), "Terminal is focused, notification suppressed");
            return Ok(DeliveryResult::Suppressed);
        }

        let content = NotificationContent::render(event, settings, title_override);
        self.deliver(&content, settings).await
    }

    async fn deliver(
        &self,
        content: &NotificationContent,
        settings: &Settings,
    ) -> Result<DeliveryResult, DeliveryError> {
        let mut delivered = Vec::new();
        let mut failures = Vec::new();
        let mut sound_capable = false;

        for &channel in &settings.channels {
            let notifier = self.notifier(channel);
            match notifier
                .notify(&content.title, &content.body, content.level)
                .await
            {
                Ok(()) => {
                    sound_capable |= notifier.supports_sound();
                    delivered.push(channel);
                }
                Err(e) => {
                    tracing::warn!(channel = %channel, error = %e, "Notification channel failed");
                    failures.push((channel, e));
                }
            }
        }

        if delivered.is_empty() {
            return Err(DeliveryError { failures });
        }

        let chimed = sound_capable && self.play_chime(settings.chime).await;
        Ok(DeliveryResult::Delivered {
            channels: delivered,
            chimed,
        })
    }

    /// Best effort; failures are logged and swallowed
    async fn play_chime(&self, chime: Chime) -> bool {
        if chime == Chime::None {
            return false;
        }
        match self.chime.play(chime).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(chime = %chime, error = %e, "Chime failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ChimeError;
    use crate::domain::event::{Outcome, SourceKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
    }

    struct MockNotifier {
        name: &'static str,
        result: Result<(), NotificationError>,
        delay: Option<Duration>,
        recorder: Recorder,
    }

    impl MockNotifier {
        fn ok(name: &'static str, recorder: &Recorder) -> Box<dyn Notifier> {
            Box::new(Self {
                name,
                result: Ok(()),
                delay: None,
                recorder: recorder.clone(),
            })
        }

        fn unavailable(name: &'static str, recorder: &Recorder) -> Box<dyn Notifier> {
            Box::new(Self {
                name,
                result: Err(NotificationError::unavailable(name, "missing")),
                delay: None,
                recorder: recorder.clone(),
            })
        }

        fn slow(name: &'static str, recorder: &Recorder) -> Box<dyn Notifier> {
            Box::new(Self {
                name,
                result: Ok(()),
                delay: Some(Duration::from_secs(5)),
                recorder: recorder.clone(),
            })
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn notify(
            &self,
            title: &str,
            _message: &str,
            _level: NotificationLevel,
        ) -> Result<(), NotificationError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.recorder
                .calls
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, title));
            self.result.clone()
        }
    }

    struct MockFocus(bool);

    #[async_trait]
    impl FocusDetector for MockFocus {
        async fn is_frontmost_terminal(&self) -> bool {
            self.0
        }
    }

    #[derive(Clone, Default)]
    struct MockChime {
        plays: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ChimePlayer for MockChime {
        async fn play(&self, _chime: Chime) -> Result<(), ChimeError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ChimeError::DeviceNotAvailable("none".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn settings(channels: Vec<Channel>) -> Settings {
        Settings {
            channels,
            ..Settings::default()
        }
    }

    fn event() -> Event {
        Event::new(SourceKind::Run, Outcome::Exited(0)).with_tool(Some("make"))
    }

    #[tokio::test]
    async fn delivers_to_desktop() {
        let recorder = Recorder::default();
        let dispatcher = NotificationDispatcher::new(
            MockNotifier::ok("desktop", &recorder),
            MockNotifier::ok("console", &recorder),
            MockFocus(false),
            MockChime::default(),
        );

        let result = dispatcher
            .dispatch(&event(), &settings(vec![Channel::Desktop]), None)
            .await
            .unwrap();

        assert_eq!(
            result,
            DeliveryResult::Delivered {
                channels: vec![Channel::Desktop],
                chimed: false
            }
        );
        assert_eq!(*recorder.calls.lock().unwrap(), vec!["desktop:[make] Done"]);
    }

    #[tokio::test]
    async fn unavailable_desktop_falls_through_to_console() {
        let recorder = Recorder::default();
        let dispatcher = NotificationDispatcher::new(
            MockNotifier::unavailable("desktop", &recorder),
            MockNotifier::ok("console", &recorder),
            MockFocus(false),
            MockChime::default(),
        );

        let result = dispatcher
            .dispatch(
                &event(),
                &settings(vec![Channel::Desktop, Channel::Console]),
                None,
            )
            .await
            .unwrap();

        assert_eq!(
            result,
            DeliveryResult::Delivered {
                channels: vec![Channel::Console],
                chimed: false
            }
        );
    }

    #[tokio::test]
    async fn all_channels_failing_is_delivery_error() {
        let recorder = Recorder::default();
        let dispatcher = NotificationDispatcher::new(
            MockNotifier::unavailable("desktop", &recorder),
            MockNotifier::ok("console", &recorder),
            MockFocus(false),
            MockChime::default(),
        );

        let err = dispatcher
            .dispatch(&event(), &settings(vec![Channel::Desktop]), None)
            .await
            .unwrap_err();

        assert_eq!(err.failures.len(), 1);
        assert_eq!(err.failures[0].0, Channel::Desktop);
        assert!(err.to_string().contains("desktop"));
    }

    #[tokio::test]
    async fn focused_terminal_suppresses() {
        let recorder = Recorder::default();
        let dispatcher = NotificationDispatcher::new(
            MockNotifier::ok("desktop", &recorder),
            MockNotifier::ok("console", &recorder),
            MockFocus(true),
            MockChime::default(),
        );
        let settings = Settings {
            quiet_when_focused: true,
            ..Settings::default()
        };

        let result = dispatcher.dispatch(&event(), &settings, None).await.unwrap();

        assert_eq!(result, DeliveryResult::Suppressed);
        assert!(recorder.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn focus_ignored_unless_enabled() {
        let recorder = Recorder::default();
        let dispatcher = NotificationDispatcher::new(
            MockNotifier::ok("desktop", &recorder),
            MockNotifier::ok("console", &recorder),
            MockFocus(true),
            MockChime::default(),
        );

        let result = dispatcher
            .dispatch(&event(), &Settings::default(), None)
            .await
            .unwrap();

        assert!(matches!(result, DeliveryResult::Delivered { .. }));
    }

    #[tokio::test]
    async fn chime_plays_after_delivery() {
        let recorder = Recorder::default();
        let chime = MockChime::default();
        let dispatcher = NotificationDispatcher::new(
            MockNotifier::ok("desktop", &recorder),
            MockNotifier::ok("console", &recorder),
            MockFocus(false),
            chime.clone(),
        );
        let settings = Settings {
            chime: Chime::Bell,
            ..Settings::default()
        };

        let result = dispatcher.dispatch(&event(), &settings, None).await.unwrap();

        assert_eq!(chime.plays.load(Ordering::SeqCst), 1);
        assert!(matches!(result, DeliveryResult::Delivered { chimed: true, .. }));
    }

    #[tokio::test]
    async fn chime_failure_is_swallowed() {
        let recorder = Recorder::default();
        let chime = MockChime {
            fail: true,
            ..MockChime::default()
        };
        let dispatcher = NotificationDispatcher::new(
            MockNotifier::ok("desktop", &recorder),
            MockNotifier::ok("console", &recorder),
            MockFocus(false),
            chime,
        );
        let settings = Settings {
            chime: Chime::Ping,
            ..Settings::default()
        };

        let result = dispatcher.dispatch(&event(), &settings, None).await.unwrap();

        assert!(matches!(result, DeliveryResult::Delivered { chimed: false, .. }));
    }

    #[tokio::test]
    async fn no_chime_when_delivery_fails() {
        let recorder = Recorder::default();
        let chime = MockChime::default();
        let dispatcher = NotificationDispatcher::new(
            MockNotifier::unavailable("desktop", &recorder),
            MockNotifier::ok("console", &recorder),
            MockFocus(false),
            chime.clone(),
        );
        let settings = Settings {
            chime: Chime::Bell,
            ..Settings::default()
        };

        assert!(dispatcher.dispatch(&event(), &settings, None).await.is_err());
        assert_eq!(chime.plays.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn chain_uses_first_working_backend() {
        let recorder = Recorder::default();
        let chain = NotifierChain::new(
            "desktop",
            vec![
                MockNotifier::unavailable("primary", &recorder),
                MockNotifier::ok("fallback", &recorder),
                MockNotifier::ok("never", &recorder),
            ],
            DEFAULT_BACKEND_TIMEOUT,
        );

        chain
            .notify("t", "m", NotificationLevel::Info)
            .await
            .unwrap();

        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec!["primary:t", "fallback:t"]
        );
    }

    #[tokio::test]
    async fn chain_timeout_falls_through() {
        let recorder = Recorder::default();
        let chain = NotifierChain::new(
            "desktop",
            vec![
                MockNotifier::slow("hanging", &recorder),
                MockNotifier::ok("fallback", &recorder),
            ],
            Duration::from_millis(20),
        );

        chain
            .notify("t", "m", NotificationLevel::Info)
            .await
            .unwrap();

        assert_eq!(*recorder.calls.lock().unwrap(), vec!["fallback:t"]);
    }

    #[tokio::test]
    async fn empty_chain_is_unavailable() {
        let chain = NotifierChain::new("desktop", Vec::new(), DEFAULT_BACKEND_TIMEOUT);
        let err = chain
            .notify("t", "m", NotificationLevel::Info)
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::Unavailable { .. }));
    }
}
