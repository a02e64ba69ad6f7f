//! Process name lookup

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Upper bound for a name lookup command
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Best-effort executable name for a PID
pub async fn process_name(pid: u32) -> Option<String> {
    if pid == 0 {
        return None;
    }

    #[cfg(target_os = "linux")]
    if let Ok(comm) = tokio::fs::read_to_string(format!("/proc/{}/comm", pid)).await {
        if let Some(name) = clean_name(&comm) {
            return Some(name);
        }
    }

    #[cfg(windows)]
    {
        let script = format!(
            "$p=Get-Process -Id {} -ErrorAction SilentlyContinue; if ($p) {{$p.ProcessName}}",
            pid
        );
        lookup("powershell", &["-NoProfile", "-Command", &script]).await
    }

    #[cfg(not(windows))]
    {
        let pid = pid.to_string();
        lookup("ps", &["-p", &pid, "-o", "comm="]).await
    }
}

async fn lookup(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(LOOKUP_TIMEOUT, output).await {
        Ok(Ok(output)) if output.status.success() => {
            clean_name(&String::from_utf8_lossy(&output.stdout))
        }
        _ => None,
    }
}

/// Trim and drop any directory part (`ps` on macOS prints full paths)
fn clean_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    let name = name.rsplit('/').next().unwrap_or(name).trim();
    (!name.is_empty()).then(|| name.to_string())
}
