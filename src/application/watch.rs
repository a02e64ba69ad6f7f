//! Watch-an-external-PID use case

use std::time::{Duration, Instant};

use crate::domain::config::Settings;
use crate::domain::event::{tool_name, Elapsed, Event, Outcome, SourceKind};

use super::dispatch::{DeliveryError, DeliveryResult, NotificationDispatcher};
use super::ports::{ChimePlayer, FocusDetector, Liveness, ProcessProbe};

/// Polling backs off by this factor after every check
const BACKOFF_FACTOR: f64 = 1.2;

/// Backoff never grows past this (unless the configured interval is larger)
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Watcher state machine: `Pending -> Polling -> {Exited, Unknown}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Pending,
    Polling,
    /// Exit code was readable
    Exited(i32),
    /// Process is gone and its status cannot be retrieved
    Unknown,
}

impl WatchState {
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Exited(_) | Self::Unknown)
    }

    /// Apply one liveness observation
    pub fn next(self, observed: Liveness) -> Self {
        match (self, observed) {
            (Self::Exited(_) | Self::Unknown, _) => self,
            (_, Liveness::Alive) => Self::Polling,
            (_, Liveness::Exited(code)) => Self::Exited(code),
            (_, Liveness::Gone) => Self::Unknown,
        }
    }
}

/// Final state of a watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchCompletion {
    pub state: WatchState,
    pub duration: Elapsed,
    /// The PID was already gone on the first check
    pub already_exited: bool,
}

impl WatchCompletion {
    pub fn outcome(&self) -> Outcome {
        match self.state {
            WatchState::Exited(code) => Outcome::Exited(code),
            _ => Outcome::Unknown,
        }
    }
}

/// Input parameters for the watch use case
#[derive(Debug, Clone, Default)]
pub struct WatchInput {
    pub pid: u32,
    /// Explicit tool label; looked up from the PID when absent
    pub tool: Option<String>,
    pub title: Option<String>,
}

/// Output from the watch use case
#[derive(Debug)]
pub struct WatchReport {
    /// Watched process's exit code when known, otherwise 0
    pub exit_code: i32,
    pub event: Event,
    pub delivery: Result<DeliveryResult, DeliveryError>,
}

/// Waits for a process we did not start
pub struct WatchProcessUseCase<P>
where
    P: ProcessProbe,
{
    probe: P,
    poll_interval: Duration,
}

impl<P> WatchProcessUseCase<P>
where
    P: ProcessProbe,
{
    /// Create a new use case instance
    pub fn new(probe: P, poll_interval: Duration) -> Self {
        Self {
            probe,
            poll_interval,
        }
    }

    fn backoff(&self, current: Duration) -> Duration {
        let ceiling = MAX_POLL_INTERVAL.max(self.poll_interval);
        current.mul_f64(BACKOFF_FACTOR).min(ceiling)
    }

    /// Poll until the process ends. Never busy-loops; a PID that does not
    /// exist finishes immediately as `Unknown`.
    pub async fn wait_for_exit(&self, pid: u32) -> WatchCompletion {
        let started = Instant::now();
        let mut state = WatchState::Pending;
        let mut delay = self.poll_interval;

        let first = self.probe.probe(pid);
        if first == Liveness::Gone {
            tracing::debug!(pid, "Process already gone");
            return WatchCompletion {
                state: WatchState::Unknown,
                duration: Elapsed::ZERO,
                already_exited: true,
            };
        }
        state = state.next(first);

        while !state.is_finished() {
            tokio::time::sleep(delay).await;
            delay = self.backoff(delay);
            state = state.next(self.probe.probe(pid));
            tracing::trace!(pid, ?state, next_poll = ?delay, "Polled process");
        }

        WatchCompletion {
            state,
            duration: Elapsed::from(started.elapsed()),
            already_exited: false,
        }
    }

    /// Wait for the PID, then dispatch its event
    pub async fn execute<F, C>(
        &self,
        input: WatchInput,
        settings: &Settings,
        dispatcher: &NotificationDispatcher<F, C>,
    ) -> WatchReport
    where
        F: FocusDetector,
        C: ChimePlayer,
    {
        // Look the name up first; it is gone once the process exits
        let tool = match input.tool.clone() {
            Some(tool) => tool,
            None => self
                .probe
                .process_name(input.pid)
                .await
                .unwrap_or_else(|| tool_name::pid_label(input.pid)),
        };

        let completion = self.wait_for_exit(input.pid).await;
        tracing::debug!(pid = input.pid, state = ?completion.state, "Watch finished");

        let mut details = vec![format!("pid: {}", input.pid)];
        if completion.already_exited {
            details.push("already exited before watch started".to_string());
        }

        let outcome = completion.outcome();
        let event = Event::new(SourceKind::Watch, outcome)
            .with_tool(Some(&tool))
            .with_duration(completion.duration)
            .with_details(details);

        let delivery = dispatcher
            .dispatch(&event, settings, input.title.as_deref())
            .await;

        WatchReport {
            exit_code: outcome.exit_code().unwrap_or(0),
            event,
            delivery,
        }
    }
}
