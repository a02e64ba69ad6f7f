//! Elapsed wall-clock time value object

use std::fmt;
use std::time::Duration as StdDuration;

/// Non-negative elapsed time of a finished task.
///
/// Displays compactly: `0s`, `0.25s`, `45s`, `3m12s`, `1h2m5s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Elapsed {
    milliseconds: u64,
}

impl Elapsed {
    /// Zero elapsed time, used by instantaneous hook events
    pub const ZERO: Self = Self { milliseconds: 0 };

    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Build from fractional seconds. Negative and non-finite input clamps to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::ZERO;
        }
        Self {
            milliseconds: (secs * 1000.0).round() as u64,
        }
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl From<StdDuration> for Elapsed {
    fn from(duration: StdDuration) -> Self {
        Self {
            milliseconds: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milliseconds == 0 {
            return write!(f, "0s");
        }
        if self.milliseconds < 1000 {
            return write!(f, "{:.2}s", self.milliseconds as f64 / 1000.0);
        }

        // Round to the nearest whole second once past the sub-second range
        let total_secs = (self.milliseconds + 500) / 1000;
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;

        if hours > 0 {
            write!(f, "{}h", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}m", minutes)?;
        }
        if seconds > 0 || (hours == 0 && minutes == 0) {
            write!(f, "{}s", seconds)?;
        }
        Ok(())
    }
}
