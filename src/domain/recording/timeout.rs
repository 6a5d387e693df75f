//! Timeout value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::TimeoutParseError;

/// Default time to wait for a host response (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Value object representing how long to wait for the host.
/// Immutable and validated on creation; never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timeout {
    milliseconds: u64,
}

impl Timeout {
    /// Create a Timeout from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Timeout from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default host response timeout (10 seconds)
    pub const fn default_timeout() -> Self {
        Self::from_secs(DEFAULT_TIMEOUT_SECS)
    }

    /// Get timeout in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Timeout {
    type Err = TimeoutParseError;

    /// Parse a timeout string.
    /// Supported formats: "500ms", "10s", "1m", "1m30s", "2s500ms"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeoutParseError { input: s.to_string() };
        let input = s.trim().to_lowercase();

        let mut total_ms: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
                continue;
            }
            if current_num.is_empty() {
                return Err(err());
            }
            let value: u64 = current_num.parse().map_err(|_| err())?;
            let factor = match ch {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                'm' => 60_000,
                's' => 1000,
                _ => return Err(err()),
            };
            total_ms = value
                .checked_mul(factor)
                .and_then(|ms| total_ms.checked_add(ms))
                .ok_or_else(err)?;
            current_num.clear();
            found_any = true;
        }

        // Leftover digits without a unit
        if !current_num.is_empty() || !found_any || total_ms == 0 {
            return Err(err());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.milliseconds % 1000;
        let total_secs = self.milliseconds / 1000;
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes > 0 {
            write!(f, "{}m", minutes)?;
        }
        if seconds > 0 {
            write!(f, "{}s", seconds)?;
        }
        if ms > 0 {
            write!(f, "{}ms", ms)?;
        }
        Ok(())
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::default_timeout()
    }
}

impl From<Timeout> for StdDuration {
    fn from(timeout: Timeout) -> Self {
        timeout.as_std()
    }
}
