//! Typed value parsers for iCalendar (RFC 5545 §3.3).
//!
//! The grammar layer keeps non-TEXT values as literal strings; these helpers
//! turn them into typed values on demand.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::names::param;
use crate::rfc::ical::core::{Duration, ParsedTime, Property, TimeValue};

/// Decodes TEXT escaping (RFC 5545 §3.3.11).
///
/// `\n`/`\N` become LF and `\,`, `\;`, `\\` their literal character. Unknown
/// escapes are kept verbatim; a trailing lone backslash is kept.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: `[+|-]P nW` or `[+|-]P [nD] [T [nH] [nM] [nS]]`
///
/// ## Errors
/// Returns `RfcError::InvalidValue` if the string is not a valid duration.
pub fn parse_duration(property: &str, s: &str) -> RfcResult<Duration> {
    let invalid = |reason: &str| RfcError::invalid_value(property, format!("{reason} in {s:?}"));

    let mut dur = Duration::zero();
    let mut rest = s.trim();
    if let Some(stripped) = rest.strip_prefix('-') {
        dur.negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    rest = rest
        .strip_prefix(['P', 'p'])
        .ok_or_else(|| invalid("missing 'P' designator"))?;
    if rest.is_empty() {
        return Err(invalid("no duration components"));
    }

    let (date_part, time_part) = match rest.find(['T', 't']) {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };

    let mut components = Components::new(date_part);
    while let Some((value, designator)) = components.next_component().map_err(invalid)? {
        match designator.to_ascii_uppercase() {
            'W' if time_part.is_none() && components.is_done() && dur.days == 0 => dur.weeks = value,
            'D' if components.is_done() => dur.days = value,
            _ => return Err(invalid("unexpected date designator")),
        }
    }

    if let Some(time_part) = time_part {
        if time_part.is_empty() {
            return Err(invalid("empty time part"));
        }
        // H, M and S must appear in that order, each at most once.
        let mut last = 0;
        let mut components = Components::new(time_part);
        while let Some((value, designator)) = components.next_component().map_err(invalid)? {
            let rank = match designator.to_ascii_uppercase() {
                'H' => 1,
                'M' => 2,
                'S' => 3,
                _ => return Err(invalid("unexpected time designator")),
            };
            if rank <= last {
                return Err(invalid("time designators out of order"));
            }
            last = rank;
            match rank {
                1 => dur.hours = value,
                2 => dur.minutes = value,
                _ => dur.seconds = value,
            }
        }
    } else if date_part.is_empty() {
        return Err(invalid("no duration components"));
    }

    Ok(dur)
}

/// Parses a comma-separated list of DURATION values.
///
/// ## Errors
/// Returns an error if any element is not a valid duration.
pub fn parse_durations(property: &str, s: &str) -> RfcResult<Vec<Duration>> {
    s.split(',').map(|part| parse_duration(property, part)).collect()
}

/// Splits `1*DIGIT designator` pairs.
struct Components<'a> {
    rest: &'a str,
}

impl<'a> Components<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }

    fn is_done(&self) -> bool {
        self.rest.is_empty()
    }

    fn next_component(&mut self) -> Result<Option<(u32, char)>, &'static str> {
        if self.rest.is_empty() {
            return Ok(None);
        }
        let digits = self.rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err("expected digits");
        }
        let value = self.rest[..digits]
            .parse::<u32>()
            .map_err(|_e| "number out of range")?;
        let designator = self.rest[digits..].chars().next().ok_or("missing designator")?;
        self.rest = &self.rest[digits + designator.len_utf8()..];
        Ok(Some((value, designator)))
    }
}

/// Parses a DATE or DATE-TIME property value (RFC 5545 §3.3.4, §3.3.5).
///
/// A `TZID` parameter resolves the value in that zone and takes precedence
/// over a `Z` suffix. Without one, `Z` means UTC and anything else is floating.
/// With `expect_all_day`, or for a bare DATE, the result is midnight with
/// `all_day` set.
///
/// ## Errors
/// Returns an error when the value is malformed, carries more than one TZID,
/// names an unknown zone, or falls in a nonexistent local time.
pub fn parse_time_value(property: &Property, expect_all_day: bool) -> RfcResult<ParsedTime> {
    let name = property.name.as_str();
    let raw = property.value.trim();
    let parts = DateTimeParts::split(raw)
        .ok_or_else(|| RfcError::invalid_value(name, format!("malformed date-time {raw:?}")))?;

    let zone = match property.get_param(param::TZID) {
        None => None,
        Some([tzid]) => Some(
            tzid.parse::<Tz>()
                .map_err(|_e| RfcError::UnknownTimezone(tzid.clone()))?,
        ),
        Some(values) => {
            return Err(RfcError::ParameterCardinality {
                property: name.to_string(),
                parameter: param::TZID.to_string(),
                count: values.len(),
            });
        }
    };
    let utc = parts.utc_suffix || parts.separator == Some('Z');

    let date_str = parts
        .date
        .ok_or_else(|| RfcError::invalid_value(name, format!("missing date in {raw:?}")))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y%m%d")
        .map_err(|e| RfcError::invalid_value(name, format!("invalid date {date_str:?}: {e}")))?;

    let (naive, all_day) = if expect_all_day {
        (date.and_time(NaiveTime::MIN), true)
    } else {
        match (parts.separator, parts.time) {
            (Some('T'), Some(time_str)) => {
                let time = NaiveTime::parse_from_str(time_str, "%H%M%S").map_err(|e| {
                    RfcError::invalid_value(name, format!("invalid time {time_str:?}: {e}"))
                })?;
                (date.and_time(time), false)
            }
            (None, None) if !parts.utc_suffix => (date.and_time(NaiveTime::MIN), true),
            _ => {
                return Err(RfcError::invalid_value(
                    name,
                    format!("unsupported date-time layout {raw:?}"),
                ));
            }
        }
    };

    let value = match zone {
        Some(tz) => TimeValue::Zoned(localize(name, tz, naive)?),
        None if utc => TimeValue::Utc(naive.and_utc()),
        None => TimeValue::Floating(naive),
    };

    Ok(ParsedTime { value, all_day })
}

fn localize(property: &str, tz: Tz, naive: NaiveDateTime) -> RfcResult<chrono::DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        RfcError::invalid_value(property, format!("{naive} does not exist in {}", tz.name()))
    })
}

/// Pieces of `[8DIGIT] ["T" / "Z"] [6DIGIT] ["Z"]`, matched against the whole value.
#[derive(Debug, Default, PartialEq, Eq)]
struct DateTimeParts<'a> {
    date: Option<&'a str>,
    separator: Option<char>,
    time: Option<&'a str>,
    utc_suffix: bool,
}

impl<'a> DateTimeParts<'a> {
    fn split(s: &'a str) -> Option<Self> {
        let mut parts = Self::default();
        let mut rest = s;

        if let Some(date) = leading_digits(rest, 8) {
            parts.date = Some(date);
            rest = &rest[8..];
        }
        if let Some(sep @ ('T' | 'Z')) = rest.chars().next() {
            parts.separator = Some(sep);
            rest = &rest[1..];
        }
        if let Some(time) = leading_digits(rest, 6) {
            parts.time = Some(time);
            rest = &rest[6..];
        }
        if let Some(stripped) = rest.strip_prefix('Z') {
            parts.utc_suffix = true;
            rest = stripped;
        }

        rest.is_empty().then_some(parts)
    }
}

fn leading_digits(s: &str, count: usize) -> Option<&str> {
    let candidate = s.get(..count)?;
    candidate.bytes().all(|b| b.is_ascii_digit()).then_some(candidate)
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns an error if the string is not a valid signed integer.
pub fn parse_integer(property: &str, s: &str) -> RfcResult<i64> {
    s.trim()
        .parse()
        .map_err(|e| RfcError::invalid_value(property, format!("invalid integer {s:?}: {e}")))
}

/// Parses a BOOLEAN value (RFC 5545 §3.3.2).
///
/// ## Errors
/// Returns an error if the string is not "TRUE" or "FALSE".
pub fn parse_boolean(property: &str, s: &str) -> RfcResult<bool> {
    match s.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(RfcError::invalid_value(property, format!("invalid boolean {s:?}"))),
    }
}

/// Parses a `GEO` value: `latitude;longitude` (RFC 5545 §3.8.1.6).
///
/// ## Errors
/// Returns an error if the value is not two `;`-separated floats.
pub fn parse_geo(property: &str, s: &str) -> RfcResult<(f64, f64)> {
    let (lat, lon) = s
        .split_once(';')
        .ok_or_else(|| RfcError::invalid_value(property, format!("expected lat;lon, got {s:?}")))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| RfcError::invalid_value(property, format!("invalid float {part:?}: {e}")))
    };
    Ok((parse(lat)?, parse(lon)?))
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Format: `(+|-)HHMM[SS]`
///
/// ## Errors
/// Returns an error if the string is not a valid UTC offset.
pub fn parse_utc_offset(property: &str, s: &str) -> RfcResult<FixedOffset> {
    let invalid = || RfcError::invalid_value(property, format!("invalid utc offset {s:?}"));

    let (sign, digits) = match s.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => return Err(invalid()),
    };
    if !matches!(digits.len(), 4 | 6) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let field = |range: std::ops::Range<usize>| digits[range].parse::<i32>().map_err(|_e| invalid());
    let hours = field(0..2)?;
    let minutes = field(2..4)?;
    let seconds = if digits.len() == 6 { field(4..6)? } else { 0 };
    if minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds)).ok_or_else(invalid)
}
