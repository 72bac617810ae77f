use std::fmt;
use std::str::FromStr;

use chrono::Duration;

use super::errors::LifetimeError;

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;
const MILLIS_PER_WEEK: f64 = 7.0 * MILLIS_PER_DAY;
const MILLIS_PER_YEAR: f64 = 365.25 * MILLIS_PER_DAY;

// About 31,000 years; keeps `now + lifetime` inside chrono's range.
const MAX_MILLIS: f64 = 1e15;

/// Validity window of an issued token.
///
/// Parsed from human-readable durations such as `"1h"`, `"30 minutes"` or
/// `"7d"`. A bare number is read as milliseconds. Defaults to one hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetime(Duration);

impl TokenLifetime {
    /// Parse a lifetime string.
    ///
    /// # Arguments
    /// * `text` - Duration such as `"1h"`, `"1.5 hours"`, `"45s"` or `"3600000"`
    ///
    /// # Returns
    /// Parsed lifetime
    ///
    /// # Errors
    /// * `InvalidFormat` - No leading number
    /// * `UnknownUnit` - Unit suffix not recognised
    /// * `NotPositive` - Lifetime is zero
    /// * `OutOfRange` - Lifetime is too large to represent
    pub fn parse(text: &str) -> Result<Self, LifetimeError> {
        let trimmed = text.trim();
        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);

        let value: f64 = number
            .parse()
            .map_err(|_| LifetimeError::InvalidFormat(text.to_string()))?;

        let millis = value * Self::unit_millis(unit.trim()).ok_or_else(|| {
            LifetimeError::UnknownUnit(unit.trim().to_string())
        })?;

        if millis > MAX_MILLIS {
            return Err(LifetimeError::OutOfRange(text.to_string()));
        }

        let millis = millis.round() as i64;
        if millis <= 0 {
            return Err(LifetimeError::NotPositive(text.to_string()));
        }

        Ok(Self(Duration::milliseconds(millis)))
    }

    fn unit_millis(unit: &str) -> Option<f64> {
        let millis = match unit.to_ascii_lowercase().as_str() {
            "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
            "s" | "sec" | "secs" | "second" | "seconds" => MILLIS_PER_SECOND,
            "m" | "min" | "mins" | "minute" | "minutes" => MILLIS_PER_MINUTE,
            "h" | "hr" | "hrs" | "hour" | "hours" => MILLIS_PER_HOUR,
            "d" | "day" | "days" => MILLIS_PER_DAY,
            "w" | "week" | "weeks" => MILLIS_PER_WEEK,
            "y" | "yr" | "yrs" | "year" | "years" => MILLIS_PER_YEAR,
            _ => return None,
        };
        Some(millis)
    }

    /// Build a lifetime from whole seconds.
    ///
    /// # Errors
    /// * `NotPositive` - `seconds` is zero or negative
    pub fn from_seconds(seconds: i64) -> Result<Self, LifetimeError> {
        if seconds <= 0 {
            return Err(LifetimeError::NotPositive(seconds.to_string()));
        }
        Self::parse(&format!("{}s", seconds))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_seconds(&self) -> i64 {
        self.0.num_seconds()
    }
}

impl Default for TokenLifetime {
    fn default() -> Self {
        Self(Duration::hours(1))
    }
}

impl FromStr for TokenLifetime {
    type Err = LifetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TokenLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0.num_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_hour() {
        assert_eq!(TokenLifetime::default().as_seconds(), 3600);
    }

    #[test]
    fn test_parse_short_units() {
        assert_eq!(TokenLifetime::parse("45s").unwrap().as_seconds(), 45);
        assert_eq!(TokenLifetime::parse("30m").unwrap().as_seconds(), 30 * 60);
        assert_eq!(TokenLifetime::parse("1h").unwrap().as_seconds(), 3600);
        assert_eq!(TokenLifetime::parse("7d").unwrap().as_seconds(), 7 * 86_400);
        assert_eq!(TokenLifetime::parse("2w").unwrap().as_seconds(), 14 * 86_400);
    }

    #[test]
    fn test_parse_long_units_and_whitespace() {
        assert_eq!(TokenLifetime::parse("1 hour").unwrap().as_seconds(), 3600);
        assert_eq!(TokenLifetime::parse(" 2 days ").unwrap().as_seconds(), 172_800);
        assert_eq!(TokenLifetime::parse("10 Minutes").unwrap().as_seconds(), 600);
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(TokenLifetime::parse("1.5h").unwrap().as_seconds(), 5400);
    }

    #[test]
    fn test_bare_number_is_milliseconds() {
        let lifetime = TokenLifetime::parse("120000").unwrap();
        assert_eq!(lifetime.as_seconds(), 120);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            TokenLifetime::parse("soon"),
            Err(LifetimeError::InvalidFormat(_))
        ));
        assert!(matches!(
            TokenLifetime::parse(""),
            Err(LifetimeError::InvalidFormat(_))
        ));
        assert!(matches!(
            TokenLifetime::parse("-1h"),
            Err(LifetimeError::InvalidFormat(_))
        ));
        assert!(matches!(
            TokenLifetime::parse("3 fortnights"),
            Err(LifetimeError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_parse_rejects_zero_and_huge() {
        assert!(matches!(
            TokenLifetime::parse("0h"),
            Err(LifetimeError::NotPositive(_))
        ));
        assert!(matches!(
            TokenLifetime::parse("100000000y"),
            Err(LifetimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_from_seconds() {
        assert_eq!(TokenLifetime::from_seconds(90).unwrap().as_seconds(), 90);
        assert!(TokenLifetime::from_seconds(0).is_err());
    }
}
