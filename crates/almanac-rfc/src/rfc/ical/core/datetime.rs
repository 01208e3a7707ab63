//! Resolved DATE and DATE-TIME values (RFC 5545 §3.3.4, §3.3.5).

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// A date-time resolved against its time reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    /// Form #2, trailing `Z`.
    Utc(DateTime<Utc>),
    /// Form #3, local time with a `TZID` parameter.
    Zoned(DateTime<Tz>),
    /// Form #1, floating local time.
    Floating(NaiveDateTime),
}

impl TimeValue {
    /// Wall-clock time as written.
    #[must_use]
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Self::Utc(dt) => dt.naive_utc(),
            Self::Zoned(dt) => dt.naive_local(),
            Self::Floating(naive) => *naive,
        }
    }

    /// Absolute instant, when the value has a time reference.
    #[must_use]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Utc(dt) => Some(*dt),
            Self::Zoned(dt) => Some(dt.with_timezone(&Utc)),
            Self::Floating(_) => None,
        }
    }
}

/// A parsed `DTSTART`-style value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTime {
    pub value: TimeValue,
    /// Set for DATE values; `value` then holds midnight.
    pub all_day: bool,
}
