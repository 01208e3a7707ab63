//! iCalendar parameter types (RFC 5545 §3.2).

use std::collections::BTreeMap;

use serde::Serialize;

use super::names::param;
use super::value_type::ValueType;
use super::vocabulary::{
    CalendarUserType, FreeBusyType, ParticipationRole, ParticipationStatus, RelationshipType,
    TriggerRelated,
};

/// A single property parameter, used to build properties.
///
/// For example: `DTSTART;TZID=America/New_York:20260123T120000`
///
/// The `TZID` is a parameter with name `TZID` and value `America/New_York`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Most parameters have one value, but some (like MEMBER) can have several.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// Creates a new parameter with multiple values.
    ///
    /// An empty `values` yields a single empty value, which is what an empty
    /// list reads back as.
    #[must_use]
    pub fn with_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            values.push(String::new());
        }
        Self {
            name: name.into(),
            values,
        }
    }

    #[must_use]
    pub fn cn(name: impl Into<String>) -> Self {
        Self::new(param::CN, name)
    }

    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new(param::TZID, tzid)
    }

    /// Creates an ALTREP parameter. Always serialized quoted.
    #[must_use]
    pub fn altrep(uri: impl Into<String>) -> Self {
        Self::new(param::ALTREP, uri)
    }

    #[must_use]
    pub fn encoding(encoding: impl Into<String>) -> Self {
        Self::new(param::ENCODING, encoding)
    }

    #[must_use]
    pub fn fmttype(media_type: impl Into<String>) -> Self {
        Self::new(param::FMTTYPE, media_type)
    }

    #[must_use]
    pub fn value_type(value_type: &ValueType) -> Self {
        Self::new(param::VALUE, value_type.as_str())
    }

    #[must_use]
    pub fn language(lang: impl Into<String>) -> Self {
        Self::new(param::LANGUAGE, lang)
    }

    #[must_use]
    pub fn rsvp(rsvp: bool) -> Self {
        Self::new(param::RSVP, if rsvp { "TRUE" } else { "FALSE" })
    }

    #[must_use]
    pub fn partstat(status: ParticipationStatus) -> Self {
        Self::new(param::PARTSTAT, status.as_str())
    }

    #[must_use]
    pub fn role(role: ParticipationRole) -> Self {
        Self::new(param::ROLE, role.as_str())
    }

    #[must_use]
    pub fn cutype(cutype: CalendarUserType) -> Self {
        Self::new(param::CUTYPE, cutype.as_str())
    }

    #[must_use]
    pub fn fbtype(fbtype: FreeBusyType) -> Self {
        Self::new(param::FBTYPE, fbtype.as_str())
    }

    #[must_use]
    pub fn reltype(reltype: RelationshipType) -> Self {
        Self::new(param::RELTYPE, reltype.as_str())
    }

    #[must_use]
    pub fn related(related: TriggerRelated) -> Self {
        Self::new(param::RELATED, related.as_str())
    }

    #[must_use]
    pub fn member<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_values(param::MEMBER, members)
    }

    #[must_use]
    pub fn delegated_to<I, S>(delegates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_values(param::DELEGATED_TO, delegates)
    }

    #[must_use]
    pub fn delegated_from<I, S>(delegators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_values(param::DELEGATED_FROM, delegators)
    }

    #[must_use]
    pub fn dir(uri: impl Into<String>) -> Self {
        Self::new(param::DIR, uri)
    }

    #[must_use]
    pub fn sent_by(address: impl Into<String>) -> Self {
        Self::new(param::SENT_BY, address)
    }

    /// Vendor parameter; `X-` is prepended when `name` lacks it.
    #[must_use]
    pub fn x_name(name: &str, value: impl Into<String>) -> Self {
        if name.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("X-")) {
            Self::new(name, value)
        } else {
            Self::new(format!("X-{name}"), value)
        }
    }
}

/// Parameters attached to a property.
///
/// Keys keep the spelling they were written with and iterate in sorted order,
/// which is also the serialization order. Lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, Vec<String>>);

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn key_for(&self, name: &str) -> Option<&String> {
        if let Some((key, _)) = self.0.get_key_value(name) {
            return Some(key);
        }
        self.0.keys().find(|k| k.eq_ignore_ascii_case(name))
    }

    /// Returns all values of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        let key = self.key_for(name)?;
        self.0.get(key).map(Vec::as_slice)
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)?.first().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.key_for(name).is_some()
    }

    /// Replaces the values of a parameter, returning the previous ones.
    ///
    /// An empty `values` is stored as one empty value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        mut values: Vec<String>,
    ) -> Option<Vec<String>> {
        if values.is_empty() {
            values.push(String::new());
        }
        let name = name.into();
        let key = self.key_for(&name).cloned().unwrap_or(name);
        self.0.insert(key, values)
    }

    /// Appends one value to a parameter, creating it when absent.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let key = self.key_for(&name).cloned().unwrap_or(name);
        self.0.entry(key).or_default().push(value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let key = self.key_for(name)?.clone();
        self.0.remove(&key)
    }

    /// Iterates parameters in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Extend<Parameter> for Parameters {
    fn extend<T: IntoIterator<Item = Parameter>>(&mut self, iter: T) {
        for parameter in iter {
            self.insert(parameter.name, parameter.values);
        }
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<T: IntoIterator<Item = Parameter>>(iter: T) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates_in_order() {
        let mut params = Parameters::new();
        params.append("MEMBER", "mailto:a@example.com");
        params.append("member", "mailto:b@example.com");
        assert_eq!(params.len(), 1);
        assert_eq!(
            params.get("MEMBER").unwrap(),
            ["mailto:a@example.com", "mailto:b@example.com"]
        );
    }

    #[test]
    fn empty_value_lists_hold_one_empty_value() {
        let member = Parameter::member(Vec::<String>::new());
        assert_eq!(member.values, [""]);

        let mut params = Parameters::new();
        params.insert("X-P", Vec::new());
        assert_eq!(params.get("X-P").unwrap(), [""]);
    }

    #[test]
    fn lookups_ignore_case_but_keep_spelling() {
        let mut params = Parameters::new();
        params.append("X-Custom", "one");
        assert_eq!(params.first("x-custom"), Some("one"));
        assert_eq!(params.iter().next().map(|(k, _)| k), Some("X-Custom"));
    }

    #[test]
    fn iteration_is_sorted() {
        let params: Parameters = [
            Parameter::tzid("Europe/Berlin"),
            Parameter::cn("Jane"),
            Parameter::value_type(&ValueType::DateTime),
        ]
        .into_iter()
        .collect();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["CN", "TZID", "VALUE"]);
    }

    #[test]
    fn later_builder_parameter_replaces_earlier() {
        let params: Parameters = [Parameter::rsvp(false), Parameter::rsvp(true)]
            .into_iter()
            .collect();
        assert_eq!(params.get("RSVP").unwrap(), ["TRUE"]);
    }

    #[test]
    fn remove_returns_values() {
        let mut params: Parameters = [Parameter::member(["a", "b"])].into_iter().collect();
        assert_eq!(params.remove("member"), Some(vec!["a".to_string(), "b".to_string()]));
        assert!(params.is_empty());
    }

    #[test]
    fn x_name_adds_prefix_once() {
        assert_eq!(Parameter::x_name("FOO", "1").name, "X-FOO");
        assert_eq!(Parameter::x_name("x-bar", "2").name, "x-bar");
    }
}
