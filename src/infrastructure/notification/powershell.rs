//! Windows toast adapter via PowerShell and the BurntToast module

use async_trait::async_trait;

use super::command::{check_status, run_program};
use crate::application::ports::{NotificationError, NotificationLevel, Notifier};

const BACKEND: &str = "powershell";

/// Script exit code meaning BurntToast is not installed
const EXIT_MODULE_MISSING: i32 = 2;

/// Toast notifications through `New-BurntToastNotification`
pub struct PowerShellNotifier;

impl PowerShellNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PowerShellNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for a single-quoted PowerShell string
fn escape_single_quoted(value: &str) -> String {
    value.replace('\'', "''")
}

fn script(title: &str, message: &str) -> String {
    [
        "$ErrorActionPreference = 'Stop'".to_string(),
        "if (Get-Module -ListAvailable -Name BurntToast) {".to_string(),
        "  Import-Module BurntToast | Out-Null".to_string(),
        format!(
            "  New-BurntToastNotification -Text @('{}', '{}') | Out-Null",
            escape_single_quoted(title),
            escape_single_quoted(message)
        ),
        "  exit 0".to_string(),
        "}".to_string(),
        format!("exit {}", EXIT_MODULE_MISSING),
    ]
    .join("\n")
}

#[async_trait]
impl Notifier for PowerShellNotifier {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn notify(
        &self,
        title: &str,
        message: &str,
        _level: NotificationLevel,
    ) -> Result<(), NotificationError> {
        let args: Vec<String> = [
            "-NoProfile",
            "-ExecutionPolicy",
            "Bypass",
            "-Command",
        ]
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(script(title, message)))
        .collect();

        let output = run_program(BACKEND, "powershell", &args).await?;
        if output.status.code() == Some(EXIT_MODULE_MISSING) {
            return Err(NotificationError::unavailable(
                BACKEND,
                "BurntToast module is not installed",
            ));
        }
        check_status(BACKEND, "powershell", &output)
    }
}
