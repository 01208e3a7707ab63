//! Component-level accessors for events, to-dos, journals, alarms and
//! timezone definitions.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use super::{
    cal_address, date_property, date_time_property, duration, integer, is_base64, strip_mailto,
    time, token, typed, utc_property,
};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::format_utc_offset;
use crate::rfc::ical::core::names::{param, prop};
use crate::rfc::ical::core::{
    Action, Classification, Component, ComponentKind, Duration, ObjectStatus, Parameter,
    ParsedTime, ParticipationRole, ParticipationStatus, Property, PropertyList, TimeTransparency,
    TimeValue, ValueType,
};
use crate::rfc::ical::parse::{parse_boolean, parse_geo, parse_time_value, parse_utc_offset};

/// Content of an `ATTACH` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment<'a> {
    Uri {
        uri: &'a str,
        fmttype: Option<&'a str>,
    },
    /// Inline data, already decoded from base64.
    Binary {
        data: Vec<u8>,
        fmttype: Option<&'a str>,
    },
}

/// A borrowed view of an `ATTENDEE` property.
#[derive(Debug, Clone, Copy)]
pub struct Attendee<'a> {
    property: &'a Property,
}

impl<'a> Attendee<'a> {
    #[must_use]
    pub fn property(&self) -> &'a Property {
        self.property
    }

    /// The calendar address without its `mailto:` scheme.
    #[must_use]
    pub fn email(&self) -> &'a str {
        strip_mailto(&self.property.value)
    }

    #[must_use]
    pub fn common_name(&self) -> Option<&'a str> {
        self.property.get_param_value(param::CN)
    }

    /// ## Errors
    /// Returns an error if `PARTSTAT` holds an unknown token.
    pub fn participation_status(&self) -> RfcResult<Option<ParticipationStatus>> {
        self.property
            .get_param_value(param::PARTSTAT)
            .map(str::parse)
            .transpose()
    }

    /// ## Errors
    /// Returns an error if `ROLE` holds an unknown token.
    pub fn role(&self) -> RfcResult<Option<ParticipationRole>> {
        self.property
            .get_param_value(param::ROLE)
            .map(str::parse)
            .transpose()
    }

    /// ## Errors
    /// Returns an error if `RSVP` is not a boolean.
    pub fn rsvp(&self) -> RfcResult<Option<bool>> {
        self.property
            .get_param_value(param::RSVP)
            .map(|value| parse_boolean(param::RSVP, value))
            .transpose()
    }
}

impl Component {
    pub fn set_uid(&mut self, uid: &str) {
        self.set_property(Property::new(prop::UID, uid));
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.property_value(prop::UID)
    }

    pub fn set_summary(&mut self, summary: &str) {
        self.set_property(Property::new(prop::SUMMARY, summary));
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.property_value(prop::SUMMARY)
    }

    pub fn set_description(&mut self, description: &str) {
        self.set_property(Property::new(prop::DESCRIPTION, description));
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.property_value(prop::DESCRIPTION)
    }

    pub fn set_location(&mut self, location: &str) {
        self.set_property(Property::new(prop::LOCATION, location));
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.property_value(prop::LOCATION)
    }

    pub fn set_url(&mut self, url: &str) {
        self.set_property(Property::new(prop::URL, url));
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.property_value(prop::URL)
    }

    pub fn set_color(&mut self, color: &str) {
        self.set_property(Property::new(prop::COLOR, color));
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.property_value(prop::COLOR)
    }

    pub fn set_status(&mut self, status: ObjectStatus) {
        self.set_property(Property::new(prop::STATUS, status.as_str()));
    }

    /// ## Errors
    /// Returns an error if `STATUS` holds an unknown token.
    pub fn status(&self) -> RfcResult<Option<ObjectStatus>> {
        token(self, prop::STATUS)
    }

    pub fn set_class(&mut self, class: Classification) {
        self.set_property(Property::new(prop::CLASS, class.as_str()));
    }

    /// ## Errors
    /// Returns an error if `CLASS` holds an unknown token.
    pub fn class(&self) -> RfcResult<Option<Classification>> {
        token(self, prop::CLASS)
    }

    pub fn set_transparency(&mut self, transp: TimeTransparency) {
        self.set_property(Property::new(prop::TRANSP, transp.as_str()));
    }

    /// ## Errors
    /// Returns an error if `TRANSP` holds an unknown token.
    pub fn transparency(&self) -> RfcResult<Option<TimeTransparency>> {
        token(self, prop::TRANSP)
    }

    pub fn set_sequence(&mut self, sequence: u32) {
        self.set_property(Property::new(prop::SEQUENCE, sequence.to_string()));
    }

    /// ## Errors
    /// Returns an error if `SEQUENCE` is not an integer.
    pub fn sequence(&self) -> RfcResult<Option<i64>> {
        integer(self, prop::SEQUENCE)
    }

    pub fn set_priority(&mut self, priority: u8) {
        self.set_property(Property::new(prop::PRIORITY, priority.to_string()));
    }

    /// ## Errors
    /// Returns an error if `PRIORITY` is not an integer.
    pub fn priority(&self) -> RfcResult<Option<i64>> {
        integer(self, prop::PRIORITY)
    }

    pub fn set_percent_complete(&mut self, percent: u8) {
        self.set_property(Property::new(prop::PERCENT_COMPLETE, percent.to_string()));
    }

    /// ## Errors
    /// Returns an error if `PERCENT-COMPLETE` is not an integer.
    pub fn percent_complete(&self) -> RfcResult<Option<i64>> {
        integer(self, prop::PERCENT_COMPLETE)
    }

    pub fn set_geo(&mut self, latitude: f64, longitude: f64) {
        self.set_property(Property::new(prop::GEO, format!("{latitude};{longitude}")));
    }

    /// Returns `(latitude, longitude)`.
    ///
    /// ## Errors
    /// Returns an error if `GEO` is not two `;`-separated floats.
    pub fn geo(&self) -> RfcResult<Option<(f64, f64)>> {
        typed(self, prop::GEO, |p| parse_geo(&p.name, &p.value))
    }

    /// Appends a `CATEGORIES` line holding one category.
    pub fn add_category(&mut self, category: &str) {
        self.add_property(Property::new(prop::CATEGORIES, category));
    }

    /// Categories across every `CATEGORIES` line, split on commas.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.get_properties(prop::CATEGORIES)
            .into_iter()
            .flat_map(|p| p.value.split(','))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    }

    pub fn add_comment(&mut self, comment: &str) {
        self.add_property(Property::new(prop::COMMENT, comment));
    }

    #[must_use]
    pub fn comments(&self) -> Vec<&str> {
        self.get_properties(prop::COMMENT)
            .into_iter()
            .map(|p| p.value.as_str())
            .collect()
    }

    pub fn add_attachment_uri(&mut self, uri: &str, fmttype: Option<&str>) {
        let params = fmttype.map(Parameter::fmttype);
        self.add_property(Property::with_params(prop::ATTACH, uri, params));
    }

    /// Appends an inline `ATTACH` encoded as base64.
    pub fn add_attachment_binary(&mut self, data: &[u8], fmttype: Option<&str>) {
        let mut params = vec![
            Parameter::encoding("BASE64"),
            Parameter::value_type(&ValueType::Binary),
        ];
        params.extend(fmttype.map(Parameter::fmttype));
        self.add_property(Property::with_params(
            prop::ATTACH,
            STANDARD.encode(data),
            params,
        ));
    }

    /// ## Errors
    /// Returns an error if an inline attachment is not valid base64.
    pub fn attachments(&self) -> RfcResult<Vec<Attachment<'_>>> {
        self.get_properties(prop::ATTACH)
            .into_iter()
            .map(|p| -> RfcResult<Attachment<'_>> {
                let fmttype = p.get_param_value(param::FMTTYPE);
                if is_base64(p) {
                    let data = STANDARD.decode(p.value.trim()).map_err(|e| {
                        RfcError::invalid_value(&p.name, format!("invalid base64: {e}"))
                    })?;
                    Ok(Attachment::Binary { data, fmttype })
                } else {
                    Ok(Attachment::Uri {
                        uri: &p.value,
                        fmttype,
                    })
                }
            })
            .collect()
    }

    /// Sets `ORGANIZER`, adding `mailto:` when no scheme is given.
    pub fn set_organizer(&mut self, address: &str, common_name: Option<&str>) {
        let params = common_name.map(Parameter::cn);
        self.set_property(Property::with_params(
            prop::ORGANIZER,
            cal_address(address),
            params,
        ));
    }

    /// The organizer address without its `mailto:` scheme.
    #[must_use]
    pub fn organizer(&self) -> Option<&str> {
        self.property_value(prop::ORGANIZER).map(strip_mailto)
    }

    /// Appends an `ATTENDEE`, adding `mailto:` when no scheme is given.
    pub fn add_attendee(&mut self, address: &str, params: impl IntoIterator<Item = Parameter>) {
        self.add_property(Property::with_params(
            prop::ATTENDEE,
            cal_address(address),
            params,
        ));
    }

    #[must_use]
    pub fn attendees(&self) -> Vec<Attendee<'_>> {
        self.get_properties(prop::ATTENDEE)
            .into_iter()
            .map(|property| Attendee { property })
            .collect()
    }

    pub fn set_start(&mut self, start: &TimeValue) {
        self.set_property(date_time_property(prop::DTSTART, start));
    }

    pub fn set_all_day_start(&mut self, date: NaiveDate) {
        self.set_property(date_property(prop::DTSTART, date));
    }

    /// ## Errors
    /// Returns an error if `DTSTART` is malformed or names an unknown zone.
    pub fn start(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::DTSTART)
    }

    pub fn set_end(&mut self, end: &TimeValue) {
        self.set_property(date_time_property(prop::DTEND, end));
    }

    pub fn set_all_day_end(&mut self, date: NaiveDate) {
        self.set_property(date_property(prop::DTEND, date));
    }

    /// ## Errors
    /// Returns an error if `DTEND` is malformed or names an unknown zone.
    pub fn end(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::DTEND)
    }

    pub fn set_due(&mut self, due: &TimeValue) {
        self.set_property(date_time_property(prop::DUE, due));
    }

    pub fn set_all_day_due(&mut self, date: NaiveDate) {
        self.set_property(date_property(prop::DUE, date));
    }

    /// ## Errors
    /// Returns an error if `DUE` is malformed or names an unknown zone.
    pub fn due(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::DUE)
    }

    pub fn set_duration(&mut self, length: Duration) {
        self.set_property(Property::new(prop::DURATION, length.to_string()));
    }

    /// ## Errors
    /// Returns an error if `DURATION` is malformed.
    pub fn duration(&self) -> RfcResult<Option<Duration>> {
        duration(self, prop::DURATION)
    }

    pub fn set_completed(&mut self, at: &DateTime<Utc>) {
        self.set_property(utc_property(prop::COMPLETED, at));
    }

    /// ## Errors
    /// Returns an error if `COMPLETED` is malformed.
    pub fn completed(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::COMPLETED)
    }

    pub fn set_dtstamp(&mut self, at: &DateTime<Utc>) {
        self.set_property(utc_property(prop::DTSTAMP, at));
    }

    /// ## Errors
    /// Returns an error if `DTSTAMP` is malformed.
    pub fn dtstamp(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::DTSTAMP)
    }

    pub fn set_created(&mut self, at: &DateTime<Utc>) {
        self.set_property(utc_property(prop::CREATED, at));
    }

    /// ## Errors
    /// Returns an error if `CREATED` is malformed.
    pub fn created(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::CREATED)
    }

    pub fn set_last_modified(&mut self, at: &DateTime<Utc>) {
        self.set_property(utc_property(prop::LAST_MODIFIED, at));
    }

    /// ## Errors
    /// Returns an error if `LAST-MODIFIED` is malformed.
    pub fn last_modified(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::LAST_MODIFIED)
    }

    pub fn set_recurrence_id(&mut self, at: &TimeValue) {
        self.set_property(date_time_property(prop::RECURRENCE_ID, at));
    }

    /// ## Errors
    /// Returns an error if `RECURRENCE-ID` is malformed.
    pub fn recurrence_id(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::RECURRENCE_ID)
    }

    /// Appends an `RRULE`. The rule text is stored as given.
    pub fn add_rrule(&mut self, rule: &str) {
        self.add_property(Property::new(prop::RRULE, rule));
    }

    #[must_use]
    pub fn rrules(&self) -> Vec<&str> {
        self.get_properties(prop::RRULE)
            .into_iter()
            .map(|p| p.value.as_str())
            .collect()
    }

    pub fn add_exrule(&mut self, rule: &str) {
        self.add_property(Property::new(prop::EXRULE, rule));
    }

    pub fn add_exdate(&mut self, at: &TimeValue) {
        self.add_property(date_time_property(prop::EXDATE, at));
    }

    pub fn add_all_day_exdate(&mut self, date: NaiveDate) {
        self.add_property(date_property(prop::EXDATE, date));
    }

    /// Every `EXDATE` instance, including comma-separated lists.
    ///
    /// ## Errors
    /// Returns an error if any instance is malformed.
    pub fn exdates(&self) -> RfcResult<Vec<ParsedTime>> {
        self.time_list(prop::EXDATE)
    }

    pub fn add_rdate(&mut self, at: &TimeValue) {
        self.add_property(date_time_property(prop::RDATE, at));
    }

    /// Every `RDATE` instance. `PERIOD` values are not supported.
    ///
    /// ## Errors
    /// Returns an error if any instance is malformed.
    pub fn rdates(&self) -> RfcResult<Vec<ParsedTime>> {
        self.time_list(prop::RDATE)
    }

    fn time_list(&self, name: &str) -> RfcResult<Vec<ParsedTime>> {
        let mut times = Vec::new();
        for property in self.get_properties(name) {
            let all_day = property.value_type() == ValueType::Date;
            for instance in property.value.split(',') {
                let single = Property {
                    name: property.name.clone(),
                    params: property.params.clone(),
                    value: instance.to_string(),
                };
                times.push(parse_time_value(&single, all_day)?);
            }
        }
        Ok(times)
    }

    /// Appends a `VALARM` firing `trigger` relative to the start.
    pub fn add_alarm(&mut self, action: Action, trigger: Duration) -> &mut Component {
        let mut alarm = Component::alarm();
        alarm.set_action(action);
        alarm.set_trigger(trigger);
        self.add_child(alarm)
    }

    #[must_use]
    pub fn alarms(&self) -> Vec<&Component> {
        self.children_of(ComponentKind::Alarm).collect()
    }

    pub fn set_action(&mut self, action: Action) {
        self.set_property(Property::new(prop::ACTION, action.as_str()));
    }

    /// ## Errors
    /// Returns an error if `ACTION` holds an unknown token.
    pub fn action(&self) -> RfcResult<Option<Action>> {
        token(self, prop::ACTION)
    }

    pub fn set_trigger(&mut self, trigger: Duration) {
        self.set_property(Property::new(prop::TRIGGER, trigger.to_string()));
    }

    /// Sets an absolute `TRIGGER;VALUE=DATE-TIME`.
    pub fn set_trigger_at(&mut self, at: &DateTime<Utc>) {
        let mut property = utc_property(prop::TRIGGER, at);
        property.set_param(Parameter::value_type(&ValueType::DateTime));
        self.set_property(property);
    }

    /// The relative trigger. Absolute triggers are read with
    /// [`Component::trigger_at`].
    ///
    /// ## Errors
    /// Returns an error if `TRIGGER` is not a duration.
    pub fn trigger(&self) -> RfcResult<Option<Duration>> {
        duration(self, prop::TRIGGER)
    }

    /// ## Errors
    /// Returns an error if `TRIGGER` is not a date-time.
    pub fn trigger_at(&self) -> RfcResult<Option<ParsedTime>> {
        time(self, prop::TRIGGER)
    }

    pub fn set_repeat(&mut self, count: u32, interval: Duration) {
        self.set_property(Property::new(prop::REPEAT, count.to_string()));
        self.set_duration(interval);
    }

    /// ## Errors
    /// Returns an error if `REPEAT` is not an integer.
    pub fn repeat(&self) -> RfcResult<Option<i64>> {
        integer(self, prop::REPEAT)
    }

    pub fn set_tzid(&mut self, tzid: &str) {
        self.set_property(Property::new(prop::TZID, tzid));
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.property_value(prop::TZID)
    }

    /// Appends a `STANDARD` observance to a `VTIMEZONE`.
    pub fn add_standard(
        &mut self,
        start: &TimeValue,
        offset_from: FixedOffset,
        offset_to: FixedOffset,
    ) -> &mut Component {
        self.add_observance(ComponentKind::Standard, start, offset_from, offset_to)
    }

    /// Appends a `DAYLIGHT` observance to a `VTIMEZONE`.
    pub fn add_daylight(
        &mut self,
        start: &TimeValue,
        offset_from: FixedOffset,
        offset_to: FixedOffset,
    ) -> &mut Component {
        self.add_observance(ComponentKind::Daylight, start, offset_from, offset_to)
    }

    fn add_observance(
        &mut self,
        kind: ComponentKind,
        start: &TimeValue,
        offset_from: FixedOffset,
        offset_to: FixedOffset,
    ) -> &mut Component {
        let mut observance = Component::new(kind);
        observance.set_start(start);
        observance.set_offsets(offset_from, offset_to);
        self.add_child(observance)
    }

    pub fn set_offsets(&mut self, offset_from: FixedOffset, offset_to: FixedOffset) {
        self.set_property(Property::new(
            prop::TZOFFSETFROM,
            format_utc_offset(offset_from),
        ));
        self.set_property(Property::new(prop::TZOFFSETTO, format_utc_offset(offset_to)));
    }

    /// ## Errors
    /// Returns an error if `TZOFFSETFROM` is not a UTC offset.
    pub fn offset_from(&self) -> RfcResult<Option<FixedOffset>> {
        typed(self, prop::TZOFFSETFROM, |p| parse_utc_offset(&p.name, &p.value))
    }

    /// ## Errors
    /// Returns an error if `TZOFFSETTO` is not a UTC offset.
    pub fn offset_to(&self) -> RfcResult<Option<FixedOffset>> {
        typed(self, prop::TZOFFSETTO, |p| parse_utc_offset(&p.name, &p.value))
    }

    pub fn add_tzname(&mut self, name: &str) {
        self.add_property(Property::new(prop::TZNAME, name));
    }

    #[must_use]
    pub fn tzname(&self) -> Option<&str> {
        self.property_value(prop::TZNAME)
    }
}
