//! Rate limit policy types.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use crpt_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Time unit a rate limit window is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowUnit {
    /// One second window.
    Seconds,
    /// One minute window.
    Minutes,
    /// One hour window.
    Hours,
    /// One day window.
    Days,
}

impl WindowUnit {
    /// Returns the window length in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        match self {
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
            Self::Days => 86_400_000,
        }
    }

    /// Returns the window length as a duration.
    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::from_millis(self.as_millis())
    }

    /// Returns stable unit name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }
}

impl Display for WindowUnit {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for WindowUnit {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" => Ok(Self::Seconds),
            "minute" | "minutes" => Ok(Self::Minutes),
            "hour" | "hours" => Ok(Self::Hours),
            "day" | "days" => Ok(Self::Days),
            _ => Err(AppError::Configuration(format!(
                "unknown rate limit window unit '{value}'"
            ))),
        }
    }
}

/// Validated sliding-window rate limit: at most `limit` admissions per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    window: Duration,
    limit: u32,
}

impl RateLimitPolicy {
    /// Creates a policy whose window is one `unit` long.
    pub fn new(unit: WindowUnit, limit: u32) -> AppResult<Self> {
        Self::with_window(unit.duration(), limit)
    }

    /// Creates a policy with an arbitrary window length.
    pub fn with_window(window: Duration, limit: u32) -> AppResult<Self> {
        if limit == 0 {
            return Err(AppError::Configuration(
                "rate limit must allow at least one request per window".to_owned(),
            ));
        }

        if window.is_zero() {
            return Err(AppError::Configuration(
                "rate limit window must be longer than zero".to_owned(),
            ));
        }

        Ok(Self { window, limit })
    }

    /// Returns the sliding window length.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns the maximum admissions per window.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crpt_core::AppError;
    use proptest::prelude::*;

    use super::{RateLimitPolicy, WindowUnit};

    #[test]
    fn units_map_to_dimensionally_correct_durations() {
        assert_eq!(WindowUnit::Seconds.duration(), Duration::from_secs(1));
        assert_eq!(WindowUnit::Minutes.duration(), Duration::from_secs(60));
        assert_eq!(WindowUnit::Hours.duration(), Duration::from_secs(60 * 60));
        assert_eq!(WindowUnit::Days.duration(), Duration::from_secs(24 * 60 * 60));
        assert_eq!(
            WindowUnit::Hours.as_millis(),
            WindowUnit::Minutes.as_millis() * 60
        );
    }

    #[test]
    fn unit_parses_plural_singular_and_mixed_case() {
        assert_eq!("minutes".parse::<WindowUnit>().ok(), Some(WindowUnit::Minutes));
        assert_eq!(" Hour ".parse::<WindowUnit>().ok(), Some(WindowUnit::Hours));
        assert_eq!("DAYS".parse::<WindowUnit>().ok(), Some(WindowUnit::Days));
        assert!(matches!(
            "fortnight".parse::<WindowUnit>(),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn zero_limit_is_a_configuration_error() {
        let result = RateLimitPolicy::new(WindowUnit::Minutes, 0);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn zero_window_is_a_configuration_error() {
        let result = RateLimitPolicy::with_window(Duration::ZERO, 3);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    proptest! {
        #[test]
        fn valid_parameters_are_preserved(limit in 1_u32..10_000, millis in 1_u64..10_000_000) {
            let window = Duration::from_millis(millis);
            let policy = RateLimitPolicy::with_window(window, limit);
            prop_assert!(policy.is_ok());
            if let Ok(policy) = policy {
                prop_assert_eq!(policy.limit(), limit);
                prop_assert_eq!(policy.window(), window);
            }
        }
    }
}
