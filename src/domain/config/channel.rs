//! Channel and chime value objects

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// A notification delivery mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// OS notification center (backend chain per platform)
    Desktop,
    /// Plain text on the terminal
    Console,
}

impl Channel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Console => "console",
        }
    }

    /// Parse a list of channel names into an ordered, de-duplicated set.
    ///
    /// `both` expands to `desktop, console`. Blank entries are ignored, but the
    /// resulting set must not be empty.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Channel>, ConfigError> {
        let mut channels = Vec::new();
        for name in names {
            let name = name.as_ref().trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            let expanded: &[Channel] = match name.as_str() {
                "both" => &[Channel::Desktop, Channel::Console],
                other => match other.parse::<Channel>()? {
                    Channel::Desktop => &[Channel::Desktop],
                    Channel::Console => &[Channel::Console],
                },
            };
            for channel in expanded {
                if !channels.contains(channel) {
                    channels.push(*channel);
                }
            }
        }

        if channels.is_empty() {
            return Err(ConfigError::invalid(
                "channels",
                "at least one channel is required (desktop, console)",
            ));
        }
        Ok(channels)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "console" => Ok(Self::Console),
            _ => Err(ConfigError::invalid(
                "channels",
                format!("unknown channel \"{}\". Valid channels: desktop, console, both", s),
            )),
        }
    }
}

/// Optional audible cue accompanying a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chime {
    #[default]
    None,
    /// Terminal bell (BEL on stderr)
    Bell,
    /// Short synthesized tone, falling back to the bell
    Ping,
}

impl Chime {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bell => "bell",
            Self::Ping => "ping",
        }
    }
}

impl fmt::Display for Chime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "bell" => Ok(Self::Bell),
            "ping" => Ok(Self::Ping),
            _ => Err(ConfigError::invalid(
                "chime",
                format!("unknown chime \"{}\". Valid values: none, bell, ping", s),
            )),
        }
    }
}
