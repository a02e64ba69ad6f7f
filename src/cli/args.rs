//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::config::AppConfig;
use crate::domain::hook::{HookKind, PreviewLimits, MIN_PREVIEW_CHARS};

/// agent-notify - notifications for long-running commands and agent tasks
#[derive(Parser, Debug)]
#[command(name = "agent-notify")]
#[command(version)]
#[command(about = "Notify when long-running commands and agent tasks finish")]
#[command(long_about = None)]
pub struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a command and notify when it finishes
    Run(RunArgs),
    /// Wait for an existing process and notify when it exits
    Watch(WatchArgs),
    /// Follow a log file and notify when a line contains a pattern
    Tail(TailArgs),
    /// Send a test notification
    TestNotify(TestNotifyArgs),
    /// Notify from a Gemini CLI hook payload on stdin
    GeminiHook(GeminiHookArgs),
    /// Notify from a Claude Code hook payload on stdin
    ClaudeHook(ClaudeHookArgs),
    /// Notify from a Codex notify payload (argument or stdin)
    CodexHook(CodexHookArgs),
    /// Notify from an Ollama JSON or JSON-Lines stream on stdin
    OllamaHook(OllamaHookArgs),
    /// Notify for a command measured elsewhere (shell integration)
    Emit(EmitArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show config file path
    Path,
    /// Create config file with defaults
    Init,
    /// Print the resolved settings
    Show,
}

/// Channel selection for `--channel`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChannelArg {
    Desktop,
    Console,
    Both,
}

impl ChannelArg {
    fn names(self) -> Vec<String> {
        let names: &[&str] = match self {
            Self::Desktop => &["desktop"],
            Self::Console => &["console"],
            Self::Both => &["desktop", "console"],
        };
        names.iter().map(|n| n.to_string()).collect()
    }
}

/// Chime selection for `--chime`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChimeArg {
    None,
    Bell,
    Ping,
}

impl ChimeArg {
    const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bell => "bell",
            Self::Ping => "ping",
        }
    }
}

/// Options shared by every notifying command
#[derive(Args, Debug, Clone, Default)]
pub struct NotifyArgs {
    /// Tool label shown in the title
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Replace the notification title
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Where to deliver the notification
    #[arg(long, value_enum, value_name = "CHANNEL")]
    pub channel: Option<ChannelArg>,
}

impl NotifyArgs {
    /// Flag layer with the keys these options set
    pub fn config_layer(&self) -> AppConfig {
        AppConfig {
            channels: self.channel.map(ChannelArg::names),
            ..AppConfig::empty()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub notify: NotifyArgs,

    /// Output lines to include in the notification
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub tail_lines: Option<i64>,

    /// Do not capture output; the child inherits stdio
    #[arg(long)]
    pub no_capture: bool,

    /// Command and arguments to run
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl RunArgs {
    pub fn config_layer(&self) -> AppConfig {
        AppConfig {
            tail_lines: self.tail_lines,
            ..self.notify.config_layer()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub notify: NotifyArgs,

    /// Process ID to wait for
    #[arg(long, value_name = "PID", value_parser = clap::value_parser!(u32).range(1..))]
    pub pid: u32,

    /// Seconds between liveness checks
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub poll_interval: Option<f64>,
}

impl WatchArgs {
    pub fn config_layer(&self) -> AppConfig {
        AppConfig {
            poll_interval: self.poll_interval,
            ..self.notify.config_layer()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TailArgs {
    #[command(flatten)]
    pub notify: NotifyArgs,

    /// Log file to follow
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Text to look for (plain substring, case-sensitive)
    #[arg(long, value_name = "TEXT")]
    pub pattern: String,

    /// Seconds to wait at end of file before reading again
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub poll_interval: Option<f64>,
}

impl TailArgs {
    pub fn config_layer(&self) -> AppConfig {
        AppConfig {
            poll_interval: self.poll_interval,
            ..self.notify.config_layer()
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct TestNotifyArgs {
    /// Where to deliver the notification
    #[arg(long, value_enum, value_name = "CHANNEL")]
    pub channel: Option<ChannelArg>,
}

impl TestNotifyArgs {
    pub fn config_layer(&self) -> AppConfig {
        AppConfig {
            channels: self.channel.map(ChannelArg::names),
            ..AppConfig::empty()
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct HookArgs {
    #[command(flatten)]
    pub notify: NotifyArgs,

    /// Event name that triggers a notification (defaults per tool)
    #[arg(long, value_name = "EVENT")]
    pub event: Option<String>,

    /// Skip the notification while a terminal is the focused window
    #[arg(long, overrides_with = "notify_when_focused")]
    pub quiet_when_focused: bool,

    /// Always notify, even while a terminal is focused
    #[arg(long, overrides_with = "quiet_when_focused")]
    pub notify_when_focused: bool,

    /// Sound to play after delivery
    #[arg(long, value_enum, value_name = "CHIME")]
    pub chime: Option<ChimeArg>,
}

impl HookArgs {
    pub fn config_layer(&self) -> AppConfig {
        let quiet_when_focused = if self.quiet_when_focused {
            Some(true)
        } else if self.notify_when_focused {
            Some(false)
        } else {
            None
        };

        AppConfig {
            quiet_when_focused,
            chime: self.chime.map(|c| c.as_str().to_string()),
            ..self.notify.config_layer()
        }
    }
}

/// Parser for `--max-*-chars` values
fn preview_chars(value: &str) -> Result<usize, String> {
    let chars: usize = value
        .parse()
        .map_err(|_| format!("`{}` is not a whole number", value))?;
    if chars < MIN_PREVIEW_CHARS {
        return Err(format!("must be at least {}", MIN_PREVIEW_CHARS));
    }
    Ok(chars)
}

#[derive(Args, Debug, Clone, Default)]
pub struct GeminiHookArgs {
    #[command(flatten)]
    pub hook: HookArgs,

    /// Longest prompt preview in the body [default: 160]
    #[arg(long, value_name = "N", value_parser = preview_chars)]
    pub max_prompt_chars: Option<usize>,

    /// Longest response preview in the body [default: 220]
    #[arg(long, value_name = "N", value_parser = preview_chars)]
    pub max_response_chars: Option<usize>,
}

impl GeminiHookArgs {
    pub fn preview_limits(&self) -> PreviewLimits {
        HookKind::Gemini
            .default_limits()
            .with_overrides(self.max_prompt_chars, self.max_response_chars)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ClaudeHookArgs {
    #[command(flatten)]
    pub hook: HookArgs,

    /// Longest user prompt preview in the body [default: 160]
    #[arg(long, value_name = "N", value_parser = preview_chars)]
    pub max_user_prompt_chars: Option<usize>,

    /// Longest tool result preview in the body [default: 220]
    #[arg(long, value_name = "N", value_parser = preview_chars)]
    pub max_result_chars: Option<usize>,
}

impl ClaudeHookArgs {
    pub fn preview_limits(&self) -> PreviewLimits {
        HookKind::Claude
            .default_limits()
            .with_overrides(self.max_user_prompt_chars, self.max_result_chars)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CodexHookArgs {
    #[command(flatten)]
    pub hook: HookArgs,

    /// Longest input preview in the body [default: 140]
    #[arg(long, value_name = "N", value_parser = preview_chars)]
    pub max_input_chars: Option<usize>,

    /// Longest assistant message preview in the body [default: 220]
    #[arg(long, value_name = "N", value_parser = preview_chars)]
    pub max_assistant_chars: Option<usize>,

    /// Payload as JSON, key=value pairs or alternating key value tokens
    #[arg(value_name = "PAYLOAD", allow_hyphen_values = true)]
    pub payload: Vec<String>,
}

impl CodexHookArgs {
    pub fn preview_limits(&self) -> PreviewLimits {
        HookKind::Codex
            .default_limits()
            .with_overrides(self.max_input_chars, self.max_assistant_chars)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct OllamaHookArgs {
    #[command(flatten)]
    pub hook: HookArgs,

    /// Longest response preview in the body [default: 220]
    #[arg(long, value_name = "N", value_parser = preview_chars)]
    pub max_response_chars: Option<usize>,
}

impl OllamaHookArgs {
    pub fn preview_limits(&self) -> PreviewLimits {
        HookKind::Ollama
            .default_limits()
            .with_overrides(None, self.max_response_chars)
    }
}

#[derive(Args, Debug, Clone)]
pub struct EmitArgs {
    #[command(flatten)]
    pub notify: NotifyArgs,

    /// Command text as typed
    #[arg(long, value_name = "TEXT")]
    pub command: String,

    /// How long the command ran
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub duration_seconds: f64,

    /// The command's exit code
    #[arg(long, value_name = "CODE", allow_negative_numbers = true)]
    pub exit_code: i32,
}
