//! Run-and-notify use case

use crate::domain::config::Settings;
use crate::domain::event::{tool_name, Event, Outcome, SourceKind};

use super::dispatch::{DeliveryError, DeliveryResult, NotificationDispatcher};
use super::ports::{ChimePlayer, CommandRunner, CommandSpec, FocusDetector, RunError};

/// Input parameters for the run use case
#[derive(Debug, Clone, Default)]
pub struct RunInput {
    /// Program and arguments
    pub argv: Vec<String>,
    /// Explicit tool label; inferred from `argv` when absent
    pub tool: Option<String>,
    pub title: Option<String>,
    /// Capture output for the tail (otherwise stdio is inherited)
    pub capture: bool,
}

/// Output from the run use case
#[derive(Debug)]
pub struct RunReport {
    /// Exit code the wrapper must exit with, mirrored from the child
    pub exit_code: i32,
    pub event: Event,
    /// Notification outcome; never affects `exit_code`
    pub delivery: Result<DeliveryResult, DeliveryError>,
}

/// Wraps a command and notifies when it finishes
pub struct RunCommandUseCase<R>
where
    R: CommandRunner,
{
    runner: R,
}

impl<R> RunCommandUseCase<R>
where
    R: CommandRunner,
{
    /// Create a new use case instance
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run the command to completion, then dispatch its event.
    ///
    /// Spawn failures return an error and send nothing.
    pub async fn execute<F, C>(
        &self,
        input: RunInput,
        settings: &Settings,
        dispatcher: &NotificationDispatcher<F, C>,
    ) -> Result<RunReport, RunError>
    where
        F: FocusDetector,
        C: ChimePlayer,
    {
        if input.argv.is_empty() {
            return Err(RunError::EmptyCommand);
        }

        let spec = CommandSpec {
            argv: input.argv.clone(),
            capture: input.capture,
            tail_lines: settings.tail_lines,
        };
        let output = self.runner.run(&spec).await?;
        let exit_code = output.exit.mirrored_code();
        tracing::debug!(exit_code, duration = %output.duration, "Command finished");

        let tool = input
            .tool
            .clone()
            .or_else(|| tool_name::infer_from_command(&input.argv));
        let event = Event::new(SourceKind::Run, Outcome::Exited(exit_code))
            .with_tool(tool.as_deref())
            .with_duration(output.duration)
            .with_tail(output.tail);

        let delivery = dispatcher
            .dispatch(&event, settings, input.title.as_deref())
            .await;

        Ok(RunReport {
            exit_code,
            event,
            delivery,
        })
    }
}
