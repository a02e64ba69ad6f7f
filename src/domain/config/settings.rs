//! Resolved, validated settings

use std::convert::TryFrom;
use std::time::Duration as StdDuration;

use crate::domain::error::ConfigError;

use super::app_config::{AppConfig, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TAIL_LINES, DEFAULT_TITLE_PREFIX};
use super::channel::{Channel, Chime};

/// Settings shared by every command.
///
/// Built once at startup by [`resolve`] and only ever borrowed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title_prefix: String,
    pub channels: Vec<Channel>,
    pub tail_lines: usize,
    pub poll_interval: StdDuration,
    pub quiet_when_focused: bool,
    pub chime: Chime,
}

impl Settings {
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            channels: vec![Channel::Desktop],
            tail_lines: DEFAULT_TAIL_LINES as usize,
            poll_interval: StdDuration::from_secs_f64(DEFAULT_POLL_INTERVAL_SECS),
            quiet_when_focused: false,
            chime: Chime::None,
        }
    }
}

impl TryFrom<AppConfig> for Settings {
    type Error = ConfigError;

    fn try_from(config: AppConfig) -> Result<Self, Self::Error> {
        let fallback = Settings::default();

        let title_prefix = match config.title_prefix {
            Some(prefix) if prefix.trim().is_empty() => {
                return Err(ConfigError::invalid("title_prefix", "must not be empty"));
            }
            Some(prefix) => prefix.trim().to_string(),
            None => fallback.title_prefix,
        };

        let channels = match config.channels {
            Some(names) => Channel::parse_list(&names)?,
            None => fallback.channels,
        };

        let tail_lines = match config.tail_lines {
            Some(n) if n < 0 => {
                return Err(ConfigError::invalid(
                    "tail_lines",
                    format!("must be a non-negative integer, got {}", n),
                ));
            }
            Some(n) => usize::try_from(n)
                .map_err(|_| ConfigError::invalid("tail_lines", format!("{} is too large", n)))?,
            None => fallback.tail_lines,
        };

        let poll_interval = match config.poll_interval {
            Some(secs) if !secs.is_finite() || secs <= 0.0 => {
                return Err(ConfigError::invalid(
                    "poll_interval",
                    format!("must be a positive number of seconds, got {}", secs),
                ));
            }
            Some(secs) => StdDuration::from_secs_f64(secs),
            None => fallback.poll_interval,
        };

        let chime = match config.chime {
            Some(raw) => raw.parse::<Chime>()?,
            None => fallback.chime,
        };

        Ok(Self {
            title_prefix,
            channels,
            tail_lines,
            poll_interval,
            quiet_when_focused: config.quiet_when_focused.unwrap_or(fallback.quiet_when_focused),
            chime,
        })
    }
}

/// Merge the four configuration layers and validate the result.
///
/// Precedence, lowest to highest: `defaults < file < env < flags`.
pub fn resolve(
    defaults: AppConfig,
    file: AppConfig,
    env: AppConfig,
    flags: AppConfig,
) -> Result<Settings, ConfigError> {
    Settings::try_from(defaults.merge(file).merge(env).merge(flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> AppConfig {
        AppConfig::empty()
    }

    #[test]
    fn defaults_resolve_to_default_settings() {
        let settings = resolve(AppConfig::defaults(), layer(), layer(), layer()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn flags_beat_env() {
        let env = AppConfig {
            tail_lines: Some(7),
            ..Default::default()
        };
        let flags = AppConfig {
            tail_lines: Some(3),
            ..Default::default()
        };
        let settings = resolve(AppConfig::defaults(), layer(), env, flags).unwrap();
        assert_eq!(settings.tail_lines, 3);
    }

    #[test]
    fn file_beats_defaults_when_env_and_flags_unset() {
        let file = AppConfig {
            title_prefix: Some("Builds".to_string()),
            poll_interval: Some(0.25),
            ..Default::default()
        };
        let settings = resolve(AppConfig::defaults(), file, layer(), layer()).unwrap();
        assert_eq!(settings.title_prefix, "Builds");
        assert_eq!(settings.poll_interval, StdDuration::from_millis(250));
    }

    #[test]
    fn env_beats_file() {
        let file = AppConfig {
            channels: Some(vec!["desktop".to_string()]),
            ..Default::default()
        };
        let env = AppConfig {
            channels: Some(vec!["console".to_string()]),
            ..Default::default()
        };
        let settings = resolve(AppConfig::defaults(), file, env, layer()).unwrap();
        assert_eq!(settings.channels, vec![Channel::Console]);
    }

    #[test]
    fn resolution_is_deterministic() {
        let file = AppConfig {
            chime: Some("bell".to_string()),
            ..Default::default()
        };
        let first = resolve(AppConfig::defaults(), file.clone(), layer(), layer()).unwrap();
        let second = resolve(AppConfig::defaults(), file, layer(), layer()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn negative_tail_lines_is_rejected() {
        let flags = AppConfig {
            tail_lines: Some(-1),
            ..Default::default()
        };
        let err = resolve(AppConfig::defaults(), layer(), layer(), flags).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref key, .. } if key == "tail_lines"));
    }

    #[test]
    fn zero_tail_lines_is_allowed() {
        let flags = AppConfig {
            tail_lines: Some(0),
            ..Default::default()
        };
        let settings = resolve(AppConfig::defaults(), layer(), layer(), flags).unwrap();
        assert_eq!(settings.tail_lines, 0);
    }

    #[test]
    fn unknown_chime_is_rejected() {
        let file = AppConfig {
            chime: Some("gong".to_string()),
            ..Default::default()
        };
        assert!(resolve(AppConfig::defaults(), file, layer(), layer()).is_err());
    }

    #[test]
    fn empty_channel_set_is_rejected() {
        let env = AppConfig {
            channels: Some(Vec::new()),
            ..Default::default()
        };
        assert!(resolve(AppConfig::defaults(), layer(), env, layer()).is_err());
    }

    #[test]
    fn non_positive_poll_interval_is_rejected() {
        for bad in [0.0, -1.0, f64::NAN] {
            let flags = AppConfig {
                poll_interval: Some(bad),
                ..Default::default()
            };
            assert!(resolve(AppConfig::defaults(), layer(), layer(), flags).is_err());
        }
    }

    #[test]
    fn blank_title_prefix_is_rejected() {
        let file = AppConfig {
            title_prefix: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(resolve(AppConfig::defaults(), file, layer(), layer()).is_err());
    }
}
