//! Follow-a-log-file use case

use std::path::PathBuf;
use std::time::Instant;

use crate::domain::config::Settings;
use crate::domain::event::{Elapsed, Event, Outcome, SourceKind, Tail};

use super::dispatch::{DeliveryError, DeliveryResult, NotificationDispatcher};
use super::ports::{ChimePlayer, FocusDetector, LineFollower, TailError};

/// Input parameters for the tail use case
#[derive(Debug, Clone)]
pub struct TailInput {
    pub file: PathBuf,
    /// Plain substring to look for
    pub pattern: String,
    pub tool: Option<String>,
    pub title: Option<String>,
}

/// Output from the tail use case
#[derive(Debug)]
pub struct TailReport {
    pub matched_line: String,
    pub event: Event,
    pub delivery: Result<DeliveryResult, DeliveryError>,
}

/// Notifies when a line containing a pattern shows up in a file
pub struct TailFileUseCase<L>
where
    L: LineFollower,
{
    follower: L,
}

impl<L> TailFileUseCase<L>
where
    L: LineFollower,
{
    /// Create a new use case instance
    pub fn new(follower: L) -> Self {
        Self { follower }
    }

    /// Read lines until one contains `pattern`
    pub async fn wait_for_match(&mut self, pattern: &str) -> Result<String, TailError> {
        loop {
            let line = self.follower.next_line().await?;
            if line.contains(pattern) {
                return Ok(line);
            }
        }
    }

    pub async fn execute<F, C>(
        &mut self,
        input: TailInput,
        settings: &Settings,
        dispatcher: &NotificationDispatcher<F, C>,
    ) -> Result<TailReport, TailError>
    where
        F: FocusDetector,
        C: ChimePlayer,
    {
        let started = Instant::now();
        let matched_line = self.wait_for_match(&input.pattern).await?;
        tracing::debug!(file = %input.file.display(), "Pattern matched");

        let event = Event::new(SourceKind::Tail, Outcome::Finished { success: true })
            .with_tool(input.tool.as_deref())
            .with_duration(Elapsed::from(started.elapsed()))
            .with_tail(Tail::from_lines(vec![matched_line.clone()]))
            .with_details(vec![
                format!("pattern: {}", input.pattern),
                format!("file: {}", input.file.display()),
            ]);

        let delivery = dispatcher
            .dispatch(&event, settings, input.title.as_deref())
            .await;

        Ok(TailReport {
            matched_line,
            event,
            delivery,
        })
    }
}
