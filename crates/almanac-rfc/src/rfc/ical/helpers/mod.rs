//! Typed accessors layered over the generic property operations.
//!
//! Nothing here touches the wire format directly: setters build
//! [`Property`] values and hand them to [`PropertyList`], getters read them
//! back through the value parsers.

mod calendar;
mod component;

pub use component::{Attachment, Attendee};

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::RfcResult;
use crate::rfc::ical::build::{format_date, format_date_time_utc, format_floating};
use crate::rfc::ical::core::names::param;
use crate::rfc::ical::core::{
    Parameter, ParsedTime, Property, PropertyList, TimeValue, ValueType,
};
use crate::rfc::ical::parse::{parse_duration, parse_integer, parse_time_value};

/// Parses the first property named `name`, if present.
fn typed<L, T>(
    list: &L,
    name: &str,
    parse: impl FnOnce(&Property) -> RfcResult<T>,
) -> RfcResult<Option<T>>
where
    L: PropertyList + ?Sized,
{
    list.get_property(name).map(parse).transpose()
}

fn token<L, T>(list: &L, name: &str) -> RfcResult<Option<T>>
where
    L: PropertyList + ?Sized,
    T: std::str::FromStr<Err = crate::error::RfcError>,
{
    typed(list, name, |p| p.value.parse())
}

fn integer<L: PropertyList + ?Sized>(list: &L, name: &str) -> RfcResult<Option<i64>> {
    typed(list, name, |p| parse_integer(&p.name, &p.value))
}

fn duration<L: PropertyList + ?Sized>(
    list: &L,
    name: &str,
) -> RfcResult<Option<crate::rfc::ical::core::Duration>> {
    typed(list, name, |p| parse_duration(&p.name, &p.value))
}

/// Reads a DATE or DATE-TIME property; `VALUE=DATE` marks it all-day.
fn time<L: PropertyList + ?Sized>(list: &L, name: &str) -> RfcResult<Option<ParsedTime>> {
    typed(list, name, |p| {
        parse_time_value(p, p.value_type() == ValueType::Date)
    })
}

/// Builds a DATE-TIME property in the form matching `value`.
fn date_time_property(name: &str, value: &TimeValue) -> Property {
    match value {
        TimeValue::Utc(dt) => Property::new(name, format_date_time_utc(dt)),
        TimeValue::Zoned(dt) => Property::with_params(
            name,
            format_floating(&dt.naive_local()),
            [Parameter::tzid(dt.timezone().name())],
        ),
        TimeValue::Floating(naive) => Property::new(name, format_floating(naive)),
    }
}

fn utc_property(name: &str, value: &DateTime<Utc>) -> Property {
    Property::new(name, format_date_time_utc(value))
}

fn date_property(name: &str, date: NaiveDate) -> Property {
    Property::with_params(
        name,
        format_date(date),
        [Parameter::value_type(&ValueType::Date)],
    )
}

/// Prefixes `mailto:` unless a scheme is already present.
fn cal_address(address: &str) -> String {
    if address
        .get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
    {
        address.to_string()
    } else {
        format!("mailto:{address}")
    }
}

fn strip_mailto(address: &str) -> &str {
    match address.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => &address[7..],
        _ => address,
    }
}

fn is_base64(property: &Property) -> bool {
    property
        .get_param_value(param::ENCODING)
        .is_some_and(|encoding| encoding.eq_ignore_ascii_case("BASE64"))
}
