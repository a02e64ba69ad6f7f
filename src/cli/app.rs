//! Command handlers and exit codes

use std::future::Future;
use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;

use crate::application::ports::{ConfigStore, FocusDetector};
use crate::application::{
    emit, HookInput, HookNotifyUseCase, NotificationDispatcher, RunCommandUseCase, RunInput,
    TailFileUseCase, TailInput, WatchInput, WatchProcessUseCase, DEFAULT_BACKEND_TIMEOUT,
};
use crate::domain::config::{resolve, AppConfig, Settings};
use crate::domain::error::{ConfigError, PayloadError};
use crate::domain::event::{Event, Outcome, SourceKind};
use crate::domain::hook::{HookKind, PreviewLimits};
use crate::infrastructure::config::env;
use crate::infrastructure::{
    create_console_notifier, create_desktop_notifier, create_focus_detector, FileConfigStore,
    FileFollower, SystemChime, SystemProcessProbe, TokioCommandRunner,
};

use super::args::{
    Cli, Commands, EmitArgs, HookArgs, RunArgs, TailArgs, TestNotifyArgs, WatchArgs,
};
use super::config_cmd::handle_config_command;
use super::presenter::{format_list, Presenter};
use super::signals::{InterruptGuard, ShutdownSignal};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Body of the `test-notify` notification
pub const TEST_MESSAGE: &str = "agent-notify is installed and can send notifications.";

/// How long exit waits for blocking work a timed-out backend left behind
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

type Dispatcher = NotificationDispatcher<Box<dyn FocusDetector>, SystemChime>;

/// Drive `command` on a two-worker runtime, then shut it down within `grace`.
///
/// Backends run in `spawn_blocking` keep going after their timeout fires, and
/// a plain runtime drop would wait for them.
pub fn block_on<F>(command: F, grace: Duration) -> ExitCode
where
    F: Future<Output = ExitCode>,
{
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            Presenter::new().error(&format!("Failed to start async runtime: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let code = runtime.block_on(command);
    runtime.shutdown_timeout(grace);
    code
}

/// Run the parsed command line
pub async fn run(cli: Cli) -> ExitCode {
    let presenter = Presenter::new();

    match cli.command {
        Commands::Run(args) => handle_run(args, &presenter).await,
        Commands::Watch(args) => handle_watch(args, &presenter).await,
        Commands::Tail(args) => handle_tail(args, &presenter).await,
        Commands::TestNotify(args) => handle_test_notify(args, &presenter).await,
        Commands::GeminiHook(args) => {
            let limits = args.preview_limits();
            handle_hook(HookKind::Gemini, args.hook, limits, Vec::new(), &presenter).await
        }
        Commands::ClaudeHook(args) => {
            let limits = args.preview_limits();
            handle_hook(HookKind::Claude, args.hook, limits, Vec::new(), &presenter).await
        }
        Commands::CodexHook(args) => {
            let limits = args.preview_limits();
            handle_hook(HookKind::Codex, args.hook, limits, args.payload, &presenter).await
        }
        Commands::OllamaHook(args) => {
            let limits = args.preview_limits();
            handle_hook(HookKind::Ollama, args.hook, limits, Vec::new(), &presenter).await
        }
        Commands::Emit(args) => handle_emit(args, &presenter).await,
        Commands::Config { action } => {
            let store = FileConfigStore::from_env();
            match handle_config_command(action, &store, load_settings(AppConfig::empty()), &presenter)
                .await
            {
                Ok(()) => ExitCode::from(EXIT_SUCCESS),
                Err(e) => config_failure(&presenter, &e),
            }
        }
    }
}

/// Merge defaults, the config file, the environment and `flags`
pub async fn load_settings(flags: AppConfig) -> Result<Settings, ConfigError> {
    let file = FileConfigStore::from_env().load().await?;
    let env = env::load()?;
    resolve(AppConfig::defaults(), file, env, flags)
}

/// Dispatcher wired to the platform backends
fn build_dispatcher() -> Dispatcher {
    NotificationDispatcher::new(
        Box::new(create_desktop_notifier(DEFAULT_BACKEND_TIMEOUT)),
        Box::new(create_console_notifier(DEFAULT_BACKEND_TIMEOUT)),
        create_focus_detector(),
        SystemChime::new(),
    )
}

/// Low 8 bits of a process exit code, as a shell reports it
pub fn exit_byte(code: i32) -> u8 {
    (code & 0xff) as u8
}

fn mirrored_exit(code: i32) -> ExitCode {
    ExitCode::from(exit_byte(code))
}

fn config_exit_code(e: &ConfigError) -> u8 {
    match e {
        ConfigError::AlreadyExists(_) | ConfigError::WriteError(_) => EXIT_ERROR,
        _ => EXIT_USAGE_ERROR,
    }
}

fn config_failure(presenter: &Presenter, e: &ConfigError) -> ExitCode {
    presenter.error(&e.to_string());
    ExitCode::from(config_exit_code(e))
}

fn payload_failure(presenter: &Presenter, e: &PayloadError) -> ExitCode {
    presenter.error(&e.to_string());
    ExitCode::from(EXIT_USAGE_ERROR)
}

async fn handle_run(args: RunArgs, presenter: &Presenter) -> ExitCode {
    let settings = match load_settings(args.config_layer()).await {
        Ok(settings) => settings,
        Err(e) => return config_failure(presenter, &e),
    };

    // Held until the command exits; the child handles Ctrl-C itself
    let _guard = match InterruptGuard::install() {
        Ok(guard) => Some(guard),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install interrupt handler");
            None
        }
    };

    let use_case = RunCommandUseCase::new(TokioCommandRunner::new());
    let input = RunInput {
        argv: args.command,
        tool: args.notify.name,
        title: args.notify.title,
        capture: !args.no_capture,
    };

    match use_case.execute(input, &settings, &build_dispatcher()).await {
        Ok(report) => {
            presenter.delivery(&report.delivery);
            mirrored_exit(report.exit_code)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            mirrored_exit(e.exit_code())
        }
    }
}

async fn handle_watch(args: WatchArgs, presenter: &Presenter) -> ExitCode {
    let settings = match load_settings(args.config_layer()).await {
        Ok(settings) => settings,
        Err(e) => return config_failure(presenter, &e),
    };

    let mut shutdown = match ShutdownSignal::new() {
        Ok(shutdown) => shutdown,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let use_case = WatchProcessUseCase::new(SystemProcessProbe::new(), settings.poll_interval);
    let input = WatchInput {
        pid: args.pid,
        tool: args.notify.name,
        title: args.notify.title,
    };
    let dispatcher = build_dispatcher();

    tokio::select! {
        report = use_case.execute(input, &settings, &dispatcher) => {
            presenter.delivery(&report.delivery);
            mirrored_exit(report.exit_code)
        }
        _ = shutdown.recv() => {
            presenter.warn("Interrupted, not notifying");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}

async fn handle_tail(args: TailArgs, presenter: &Presenter) -> ExitCode {
    let settings = match load_settings(args.config_layer()).await {
        Ok(settings) => settings,
        Err(e) => return config_failure(presenter, &e),
    };

    let mut shutdown = match ShutdownSignal::new() {
        Ok(shutdown) => shutdown,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let follower = match FileFollower::open(&args.file, settings.poll_interval).await {
        Ok(follower) => follower,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut use_case = TailFileUseCase::new(follower);
    let input = TailInput {
        file: args.file,
        pattern: args.pattern,
        tool: args.notify.name,
        title: args.notify.title,
    };
    let dispatcher = build_dispatcher();

    tokio::select! {
        result = use_case.execute(input, &settings, &dispatcher) => match result {
            Ok(report) => {
                presenter.delivery(&report.delivery);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        },
        _ = shutdown.recv() => {
            presenter.warn("Interrupted, not notifying");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}

async fn handle_test_notify(args: TestNotifyArgs, presenter: &Presenter) -> ExitCode {
    let settings = match load_settings(args.config_layer()).await {
        Ok(settings) => settings,
        Err(e) => return config_failure(presenter, &e),
    };

    let event = Event::new(SourceKind::Test, Outcome::Finished { success: true })
        .with_details(vec![TEST_MESSAGE.to_string()]);
    let title = format!("[{}] Test Notification", settings.title_prefix);

    match build_dispatcher()
        .dispatch(&event, &settings, Some(&title))
        .await
    {
        Ok(result) => {
            tracing::debug!(?result, "Test notification finished");
            presenter.success(&format!(
                "Test notification sent ({})",
                format_list(&settings.channels)
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn read_stdin(kind: HookKind) -> Result<String, PayloadError> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .map_err(|e| PayloadError::ReadFailed {
            source_label: kind.source_kind().as_str(),
            message: e.to_string(),
        })?;
    Ok(raw)
}

async fn handle_hook(
    kind: HookKind,
    args: HookArgs,
    limits: PreviewLimits,
    payload: Vec<String>,
    presenter: &Presenter,
) -> ExitCode {
    let settings = match load_settings(args.config_layer()).await {
        Ok(settings) => settings,
        Err(e) => return config_failure(presenter, &e),
    };

    let hooks = match kind.parse_input(&payload, limits, || read_stdin(kind)) {
        Ok(hooks) => hooks,
        Err(e) => return payload_failure(presenter, &e),
    };

    let use_case = HookNotifyUseCase::new(HookInput {
        kind,
        event: args.event,
        tool: args.notify.name,
        title: args.notify.title,
    });
    let report = use_case.execute(hooks, &settings, &build_dispatcher()).await;

    // Delivery failures are reported but never fail the agent's hook
    for failure in report.failures() {
        presenter.warn(&failure.to_string());
    }
    ExitCode::from(EXIT_SUCCESS)
}

async fn handle_emit(args: EmitArgs, presenter: &Presenter) -> ExitCode {
    let settings = match load_settings(args.notify.config_layer()).await {
        Ok(settings) => settings,
        Err(e) => return config_failure(presenter, &e),
    };

    let event = emit::build_event(&emit::EmitInput {
        command: args.command,
        duration_secs: args.duration_seconds,
        exit_code: args.exit_code,
        tool: args.notify.name,
    });

    let delivery = build_dispatcher()
        .dispatch(&event, &settings, args.notify.title.as_deref())
        .await;
    presenter.delivery(&delivery);
    ExitCode::from(EXIT_SUCCESS)
}
