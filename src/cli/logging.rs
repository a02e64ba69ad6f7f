//! Logging setup

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "AGENT_NOTIFY_LOG";

/// Filter used when `AGENT_NOTIFY_LOG` is unset
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,agent_notify=debug"
    } else {
        "warn"
    }
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
