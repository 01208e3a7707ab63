//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

use chrono::TimeDelta;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// Duration value (RFC 5545 §3.3.6).
///
/// iCalendar durations have no year or month designators because those have
/// variable lengths. Days are nominal (24 hours) when converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub negative: bool,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    #[must_use]
    pub const fn weeks(weeks: u32) -> Self {
        Self {
            weeks,
            ..Self::zero()
        }
    }

    #[must_use]
    pub const fn days(days: u32) -> Self {
        Self {
            days,
            ..Self::zero()
        }
    }

    #[must_use]
    pub const fn hours(hours: u32) -> Self {
        Self {
            hours,
            ..Self::zero()
        }
    }

    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self {
            minutes,
            ..Self::zero()
        }
    }

    #[must_use]
    pub const fn seconds(seconds: u32) -> Self {
        Self {
            seconds,
            ..Self::zero()
        }
    }

    /// Negates this duration.
    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.weeks == 0 && self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Total length in seconds, ignoring the sign.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.weeks) * SECONDS_PER_WEEK
            + u64::from(self.days) * SECONDS_PER_DAY
            + u64::from(self.hours) * SECONDS_PER_HOUR
            + u64::from(self.minutes) * SECONDS_PER_MINUTE
            + u64::from(self.seconds)
    }

    /// Converts to a `chrono` delta, or `None` when out of range.
    #[must_use]
    pub fn to_time_delta(&self) -> Option<TimeDelta> {
        let seconds = i64::try_from(self.total_seconds()).ok()?;
        let delta = TimeDelta::try_seconds(seconds)?;
        Some(if self.negative { -delta } else { delta })
    }

    /// Builds a duration from a `chrono` delta, dropping sub-second precision.
    ///
    /// Whole weeks are written with the `W` designator; day counts beyond
    /// `u32::MAX` saturate.
    #[must_use]
    pub fn from_time_delta(delta: TimeDelta) -> Self {
        let negative = delta < TimeDelta::zero();
        let total = delta.num_seconds().unsigned_abs();

        if total != 0 && total % SECONDS_PER_WEEK == 0 {
            return Self {
                negative,
                weeks: saturate(total / SECONDS_PER_WEEK),
                ..Self::zero()
            };
        }

        Self {
            negative,
            weeks: 0,
            days: saturate(total / SECONDS_PER_DAY),
            hours: saturate(total % SECONDS_PER_DAY / SECONDS_PER_HOUR),
            minutes: saturate(total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE),
            seconds: saturate(total % SECONDS_PER_MINUTE),
        }
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        if self.is_zero() {
            return f.write_str("T0S");
        }
        if self.weeks > 0 {
            write!(f, "{}W", self.weeks)?;
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_canonical_forms() {
        assert_eq!(Duration::weeks(2).to_string(), "P2W");
        assert_eq!(Duration::minutes(15).negate().to_string(), "-PT15M");
        assert_eq!(Duration::zero().to_string(), "PT0S");

        let mixed = Duration {
            days: 1,
            hours: 2,
            seconds: 5,
            ..Duration::zero()
        };
        assert_eq!(mixed.to_string(), "P1DT2H5S");
    }

    #[test]
    fn converts_to_and_from_time_delta() {
        let d = Duration {
            days: 1,
            hours: 1,
            ..Duration::zero()
        };
        assert_eq!(d.to_time_delta(), Some(TimeDelta::hours(25)));
        assert_eq!(Duration::from_time_delta(TimeDelta::hours(25)), d);
        assert_eq!(Duration::from_time_delta(TimeDelta::days(14)), Duration::weeks(2));
        assert_eq!(
            Duration::from_time_delta(TimeDelta::minutes(-30)),
            Duration::minutes(30).negate()
        );
    }
}
