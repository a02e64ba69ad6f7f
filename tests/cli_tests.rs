//! CLI integration tests

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    TestEnv::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("tail"))
        .stdout(predicate::str::contains("test-notify"))
        .stdout(predicate::str::contains("claude-hook"))
        .stdout(predicate::str::contains("codex-hook"))
        .stdout(predicate::str::contains("ollama-hook"))
        .stdout(predicate::str::contains("gemini-hook"));
}

#[test]
fn version_output() {
    TestEnv::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent-notify"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn run_help_shows_options() {
    TestEnv::new()
        .cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--tail-lines"))
        .stdout(predicate::str::contains("--no-capture"))
        .stdout(predicate::str::contains("--channel"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    TestEnv::new().cmd().assert().code(2);
}

#[test]
fn run_without_command_is_usage_error() {
    TestEnv::new().cmd().arg("run").assert().code(2);
}

#[test]
fn watch_pid_zero_is_usage_error() {
    TestEnv::new()
        .cmd()
        .args(["watch", "--pid", "0"])
        .assert()
        .code(2);
}

#[test]
fn unknown_channel_is_usage_error() {
    TestEnv::new()
        .cmd()
        .args(["test-notify", "--channel", "pager"])
        .assert()
        .code(2);
}

#[test]
fn test_notify_on_console() {
    TestEnv::new()
        .cmd()
        .args(["test-notify", "--channel", "console"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "[agent-notify:success] [Agent] Test Notification",
        ))
        .stderr(predicate::str::contains(
            "agent-notify is installed and can send notifications.",
        ))
        .stderr(predicate::str::contains("exit code").not());
}

#[test]
fn test_notify_uses_title_prefix() {
    TestEnv::new()
        .console_cmd()
        .env("AGENT_NOTIFY_TITLE_PREFIX", "CI")
        .arg("test-notify")
        .assert()
        .success()
        .stderr(predicate::str::contains("[CI] Test Notification"));
}

#[test]
fn emit_renders_measured_command() {
    TestEnv::new()
        .console_cmd()
        .args([
            "emit",
            "--command",
            "cargo build --release",
            "--duration-seconds",
            "75",
            "--exit-code",
            "0",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("[cargo] Done"))
        .stderr(predicate::str::contains("duration: 1m15s"))
        .stderr(predicate::str::contains("exit code: 0"))
        .stderr(predicate::str::contains("command: cargo build --release"));
}

#[test]
fn emit_failure_title() {
    TestEnv::new()
        .console_cmd()
        .args([
            "emit",
            "--command",
            "make",
            "--duration-seconds",
            "2",
            "--exit-code",
            "2",
            "--title",
            "Build broke",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("[agent-notify:failure] Build broke"))
        .stderr(predicate::str::contains("exit code: 2"));
}
