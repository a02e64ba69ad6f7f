//! Focus detection adapters
//!
//! Every detector degrades to `false` on any failure.

mod macos;
mod x11;

pub use macos::OsascriptFocusDetector;
pub use x11::XdotoolFocusDetector;

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::FocusDetector;

/// Upper bound for a focus query
const QUERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Detector for platforms without a way to ask
pub struct NoFocusDetector;

#[async_trait]
impl FocusDetector for NoFocusDetector {
    async fn is_frontmost_terminal(&self) -> bool {
        false
    }
}

/// Create the focus detector for the current platform
pub fn create_focus_detector() -> Box<dyn FocusDetector> {
    #[cfg(target_os = "macos")]
    {
        Box::new(OsascriptFocusDetector::new())
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Box::new(XdotoolFocusDetector::new())
    }
    #[cfg(not(unix))]
    {
        Box::new(NoFocusDetector)
    }
}

/// Run a query command and return its trimmed stdout, or `None` on any failure
async fn query(program: &str, args: &[&str]) -> Option<String> {
    let path = match which::which(program) {
        Ok(path) => path,
        Err(_) => {
            tracing::debug!(program, "Focus query tool not found");
            return None;
        }
    };

    let output = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::piped())
        .stdout(Stdio::piped())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(QUERY_TIMEOUT, output).await {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(Ok(output)) => {
            tracing::debug!(
                program,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Focus query failed"
            );
            None
        }
        Ok(Err(e)) => {
            tracing::debug!(program, error = %e, "Focus query could not run");
            None
        }
        Err(_) => {
            tracing::debug!(program, "Focus query timed out");
            None
        }
    }
}
