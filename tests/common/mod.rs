//! Shared helpers for the binary tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

const CONFIG_VARS: &[&str] = &[
    "AGENT_NOTIFY_CONFIG",
    "AGENT_NOTIFY_TITLE_PREFIX",
    "AGENT_NOTIFY_CHANNELS",
    "AGENT_NOTIFY_TAIL_LINES",
    "AGENT_NOTIFY_POLL_INTERVAL",
    "AGENT_NOTIFY_QUIET_WHEN_FOCUSED",
    "AGENT_NOTIFY_CHIME",
    "AGENT_NOTIFY_LOG",
];

/// Isolated home and config location for one test
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("agentnotify").join("config.toml")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_config(&self, content: &str) {
        let path = self.config_path();
        std::fs::create_dir_all(path.parent().expect("config path has a parent"))
            .expect("failed to create config dir");
        std::fs::write(path, content).expect("failed to write config");
    }

    /// The binary with a clean environment and a config file that does not exist yet
    pub fn cmd(&self) -> Command {
        Command::from(self.process())
    }

    /// Same environment as [`TestEnv::cmd`], for tests that signal the running binary
    pub fn process(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("agent-notify"));
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        cmd.env("AGENT_NOTIFY_CONFIG", self.config_path())
            .env("HOME", self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("DISPLAY");
        cmd
    }

    /// Same as [`TestEnv::process`], delivering to the console only
    pub fn console_process(&self) -> std::process::Command {
        let mut cmd = self.process();
        cmd.env("AGENT_NOTIFY_CHANNELS", "console");
        cmd
    }

    /// Same as [`TestEnv::cmd`], delivering to the console only
    pub fn console_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("AGENT_NOTIFY_CHANNELS", "console");
        cmd
    }
}

/// Wait for `child` to exit, killing it and failing the test after `limit`
pub fn wait_within(
    child: &mut std::process::Child,
    limit: std::time::Duration,
) -> std::process::ExitStatus {
    let started = std::time::Instant::now();
    loop {
        if let Some(status) = child.try_wait().expect("failed to poll child") {
            return status;
        }
        if started.elapsed() > limit {
            let _ = child.kill();
            let _ = child.wait();
            panic!("process still running after {:?}", limit);
        }
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
}

/// Number of console notifications in captured stderr
pub fn notification_count(stderr: &[u8]) -> usize {
    String::from_utf8_lossy(stderr)
        .lines()
        .filter(|line| line.starts_with("[agent-notify:"))
        .count()
}
