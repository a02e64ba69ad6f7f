//! Environment variable configuration layer

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

pub const TITLE_PREFIX_ENV: &str = "AGENT_NOTIFY_TITLE_PREFIX";
pub const CHANNELS_ENV: &str = "AGENT_NOTIFY_CHANNELS";
pub const TAIL_LINES_ENV: &str = "AGENT_NOTIFY_TAIL_LINES";
pub const POLL_INTERVAL_ENV: &str = "AGENT_NOTIFY_POLL_INTERVAL";
pub const QUIET_WHEN_FOCUSED_ENV: &str = "AGENT_NOTIFY_QUIET_WHEN_FOCUSED";
pub const CHIME_ENV: &str = "AGENT_NOTIFY_CHIME";

/// Read the layer from the process environment
pub fn load() -> Result<AppConfig, ConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build the layer from any variable lookup. Unset or blank variables leave
/// the key unset; values that fail to parse are errors.
pub fn from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let tail_lines = get(TAIL_LINES_ENV)
        .map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                ConfigError::invalid(TAIL_LINES_ENV, format!("expected an integer, got \"{}\"", raw))
            })
        })
        .transpose()?;

    let poll_interval = get(POLL_INTERVAL_ENV)
        .map(|raw| {
            raw.parse::<f64>().map_err(|_| {
                ConfigError::invalid(POLL_INTERVAL_ENV, format!("expected seconds, got \"{}\"", raw))
            })
        })
        .transpose()?;

    let quiet_when_focused = get(QUIET_WHEN_FOCUSED_ENV)
        .map(|raw| parse_bool(QUIET_WHEN_FOCUSED_ENV, &raw))
        .transpose()?;

    Ok(AppConfig {
        title_prefix: get(TITLE_PREFIX_ENV),
        channels: get(CHANNELS_ENV).map(|raw| AppConfig::split_channels(&raw)),
        tail_lines,
        poll_interval,
        quiet_when_focused,
        chime: get(CHIME_ENV),
    })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(
            key,
            format!("expected true or false, got \"{}\"", raw),
        )),
    }
}
