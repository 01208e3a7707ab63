//! Calendar-level accessors.

use almanac_core::constants::{DEFAULT_PRODID, PRODUCT_NAME};
use chrono::{DateTime, Utc};

use super::{duration, time, token, utc_property};
use crate::error::RfcResult;
use crate::rfc::ical::core::names::prop;
use crate::rfc::ical::core::{
    Calendar, Component, ComponentKind, Duration, Method, Parameter, ParsedTime, Property,
    PropertyList, ValueType,
};

const DEFAULT_CALSCALE: &str = "GREGORIAN";

impl Calendar {
    /// Creates a calendar with `VERSION:2.0` and this library's `PRODID`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_product_id(DEFAULT_PRODID)
    }

    /// Creates a calendar whose `PRODID` names `service`.
    #[must_use]
    pub fn new_for(service: &str) -> Self {
        Self::with_product_id(&format!("-//{service}//{PRODUCT_NAME}//EN"))
    }

    fn with_product_id(product_id: &str) -> Self {
        let mut calendar = Self::empty();
        calendar.set_version("2.0");
        calendar.set_product_id(product_id);
        calendar
    }

    pub fn set_method(&mut self, method: Method) {
        self.set_property(Property::new(prop::METHOD, method.as_str()));
    }

    /// ## Errors
    /// Returns an error if `METHOD` holds an unknown token.
    pub fn method(&self) -> RfcResult<Option<Method>> {
        token(self, prop::METHOD)
    }

    pub fn set_version(&mut self, version: &str) {
        self.set_property(Property::new(prop::VERSION, version));
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.property_value(prop::VERSION)
    }

    pub fn set_product_id(&mut self, product_id: &str) {
        self.set_property(Property::new(prop::PRODID, product_id));
    }

    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        self.property_value(prop::PRODID)
    }

    pub fn set_calscale(&mut self, calscale: &str) {
        self.set_property(Property::new(prop::CALSCALE, calscale));
    }

    /// Returns `CALSCALE`, which defaults to `GREGORIAN`.
    #[must_use]
    pub fn calscale(&self) -> &str {
        self.property_value(prop::CALSCALE)
            .unwrap_or(DEFAULT_CALSCALE)
    }

    /// Sets `NAME` and the `X-WR-CALNAME` most clients read.
    pub fn set_name(&mut self, name: &str) {
        self.set_property(Property::new(prop::NAME, name));
        self.set_property(Property::new(prop::X_WR_CALNAME, name));
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.property_value(prop::NAME)
            .or_else(|| self.property_value(prop::X_WR_CALNAME))
    }

    /// Sets `DESCRIPTION` and `X-WR-CALDESC`.
    pub fn set_description(&mut self, description: &str) {
        self.set_property(Property::new(prop::DESCRIPTION, description));
        self.set_property(Property::new(prop::X_WR_CALDESC, description));
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.property_value(prop::DESCRIPTION)
            .or_else(|| self.property_value(prop::X_WR_CALDESC))
    }

    pub fn set_color(&mut self, color: &str) {
        self.set_property(Property::new(prop::COLOR, color));
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.property_value(prop::COLOR)
    }

    /// Sets the default zone hint `X-WR-TIMEZONE`.
    pub fn set_timezone_id(&mut self, tzid: &str) {
        self.set_property(Property::new(prop::X_WR_TIMEZONE, tzid));
    }

    #[must_use]
    pub fn timezone_id(&self) -> Option<&str> {
        self.property_value(prop::X_WR_TIMEZONE)
    }

    pub fn set_url(&mut self, url: &str) {
        self.set_property(Property::new(prop::URL, url));
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.property_value(prop::URL)
    }

    pub fn set_refresh_interval(&mut self, interval: Duration) {
        self.set_property(Property::with_params(
            prop::REFRESH_INTERVAL,
            interval.to_string(),
            [Parameter::value_type(&ValueType::Duration)],
        ));
    }

    /// ## Errors
    /// Returns an error if `REFRESH-INTERVAL` is not a duration.
    pub fn refresh_interval(&self) -> RfcResult<Option<Duration>> {
        duration(self, prop::REFRESH_INTERVAL)
    }

    pub fn set_published_ttl(&mut self, ttl: Duration) {
        self.set_property(Property::new(prop::X_PUBLISHED_TTL, ttl.to_string()));
    }

    /// ## Errors
    /// Returns an error if `X-PUBLISHED-TTL` is not a duration.
    pub fn published_ttl(&self) -> RfcResult<Option<Duration>> {
        duration(self, prop::X_PUBLISHED_TTL)
    }

    pub fn set_last_modified(&mut self, at: &DateTime<Utc>) {
        self.set_property(utc_property(prop::LAST_MODIFIED, at));
    }

    /// ## Errors
    /// Returns an error if `LAST-MODIFIED` is not a valid date-time.
    pub fn last_modified(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::LAST_MODIFIED)
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.components_of(ComponentKind::Event).collect()
    }

    pub fn events_mut(&mut self) -> Vec<&mut Component> {
        self.components_of_mut(ComponentKind::Event).collect()
    }

    #[must_use]
    pub fn todos(&self) -> Vec<&Component> {
        self.components_of(ComponentKind::Todo).collect()
    }

    pub fn todos_mut(&mut self) -> Vec<&mut Component> {
        self.components_of_mut(ComponentKind::Todo).collect()
    }

    #[must_use]
    pub fn journals(&self) -> Vec<&Component> {
        self.components_of(ComponentKind::Journal).collect()
    }

    pub fn journals_mut(&mut self) -> Vec<&mut Component> {
        self.components_of_mut(ComponentKind::Journal).collect()
    }

    #[must_use]
    pub fn free_busy(&self) -> Vec<&Component> {
        self.components_of(ComponentKind::FreeBusy).collect()
    }

    pub fn free_busy_mut(&mut self) -> Vec<&mut Component> {
        self.components_of_mut(ComponentKind::FreeBusy).collect()
    }

    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.components_of(ComponentKind::Timezone).collect()
    }

    pub fn timezones_mut(&mut self) -> Vec<&mut Component> {
        self.components_of_mut(ComponentKind::Timezone).collect()
    }

    /// Appends a `VEVENT` with the given `UID`.
    pub fn add_event(&mut self, uid: &str) -> &mut Component {
        self.add_with_uid(ComponentKind::Event, uid)
    }

    pub fn add_todo(&mut self, uid: &str) -> &mut Component {
        self.add_with_uid(ComponentKind::Todo, uid)
    }

    pub fn add_journal(&mut self, uid: &str) -> &mut Component {
        self.add_with_uid(ComponentKind::Journal, uid)
    }

    pub fn add_free_busy(&mut self, uid: &str) -> &mut Component {
        self.add_with_uid(ComponentKind::FreeBusy, uid)
    }

    /// Appends a `VTIMEZONE` with the given `TZID`.
    pub fn add_timezone(&mut self, tzid: &str) -> &mut Component {
        let mut timezone = Component::timezone();
        timezone.set_property(Property::new(prop::TZID, tzid));
        self.add_component(timezone)
    }

    /// Removes every `VEVENT` with this `UID`, overrides included.
    pub fn remove_event(&mut self, uid: &str) -> Vec<Component> {
        self.remove_components_if(|c| c.is(ComponentKind::Event) && c.uid() == Some(uid))
    }

    fn add_with_uid(&mut self, kind: ComponentKind, uid: &str) -> &mut Component {
        let mut component = Component::new(kind);
        component.set_uid(uid);
        self.add_component(component)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::rfc::ical::build::serialize;
    use crate::rfc::ical::parse::parse_str;

    #[test]
    fn new_calendar_has_version_and_prodid() {
        let cal = Calendar::new();
        assert_eq!(cal.version(), Some("2.0"));
        assert_eq!(cal.product_id(), Some(DEFAULT_PRODID));
        assert_eq!(cal.calscale(), "GREGORIAN");

        let cal = Calendar::new_for("ACME");
        assert_eq!(cal.product_id(), Some("-//ACME//almanac//EN"));
    }

    #[test]
    fn name_and_description_set_both_spellings() {
        let mut cal = Calendar::new();
        cal.set_name("Team");
        cal.set_description("Shared, sort of");
        assert_eq!(cal.property_value("X-WR-CALNAME"), Some("Team"));
        assert_eq!(cal.property_value("X-WR-CALDESC"), Some("Shared, sort of"));

        cal.remove_property("NAME");
        assert_eq!(cal.name(), Some("Team"));
    }

    #[test]
    fn typed_calendar_properties() {
        let mut cal = Calendar::new();
        cal.set_method(Method::Publish);
        cal.set_refresh_interval(Duration::hours(12));
        cal.set_published_ttl(Duration::days(1));
        cal.set_last_modified(&Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap());

        let text = serialize(&cal);
        assert!(text.contains("METHOD:PUBLISH\r\n"));
        assert!(text.contains("REFRESH-INTERVAL;VALUE=DURATION:PT12H\r\n"));
        assert!(text.contains("X-PUBLISHED-TTL:P1D\r\n"));
        assert!(text.contains("LAST-MODIFIED:20260102T030405Z\r\n"));

        let parsed = parse_str(&text).unwrap();
        assert_eq!(parsed.method().unwrap(), Some(Method::Publish));
        assert_eq!(parsed.refresh_interval().unwrap(), Some(Duration::hours(12)));
        assert_eq!(parsed.published_ttl().unwrap(), Some(Duration::days(1)));
        assert!(parsed.last_modified().unwrap().is_some());
    }

    #[test]
    fn unknown_method_is_an_error() {
        let mut cal = Calendar::new();
        cal.set_property(Property::new("METHOD", "SHOUT"));
        assert!(cal.method().is_err());
    }

    #[test]
    fn add_and_filter_components() {
        let mut cal = Calendar::new();
        cal.add_event("e1").set_summary("First");
        cal.add_todo("t1");
        cal.add_event("e2");
        cal.add_journal("j1");
        cal.add_free_busy("f1");
        cal.add_timezone("Europe/Paris");

        assert_eq!(cal.events().len(), 2);
        assert_eq!(cal.events()[0].summary(), Some("First"));
        assert_eq!(cal.todos().len(), 1);
        assert_eq!(cal.journals().len(), 1);
        assert_eq!(cal.free_busy().len(), 1);
        assert_eq!(cal.timezones()[0].property_value("TZID"), Some("Europe/Paris"));

        for event in cal.events_mut() {
            event.set_location("Room 1");
        }
        assert!(cal.events().iter().all(|e| e.location() == Some("Room 1")));
    }

    #[test]
    fn remove_event_by_uid() {
        let mut cal = Calendar::new();
        cal.add_event("keep");
        cal.add_event("drop");
        cal.add_todo("drop");

        let removed = cal.remove_event("drop");
        assert_eq!(removed.len(), 1);
        assert_eq!(cal.events().len(), 1);
        assert_eq!(cal.todos().len(), 1);
    }

    #[test]
    fn refresh_interval_carries_value_param() {
        let mut cal = Calendar::new();
        cal.set_refresh_interval(Duration::minutes(30));
        let prop = cal.get_property("REFRESH-INTERVAL").unwrap();
        assert_eq!(prop.get_param_value("VALUE"), Some("DURATION"));
    }
}
