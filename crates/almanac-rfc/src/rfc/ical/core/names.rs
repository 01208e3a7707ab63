//! Literal component, property and parameter tokens.

/// Delimiter pseudo-properties.
pub const BEGIN: &str = "BEGIN";
pub const END: &str = "END";

pub mod component {
    pub const VCALENDAR: &str = "VCALENDAR";
    pub const VEVENT: &str = "VEVENT";
    pub const VTODO: &str = "VTODO";
    pub const VJOURNAL: &str = "VJOURNAL";
    pub const VFREEBUSY: &str = "VFREEBUSY";
    pub const VTIMEZONE: &str = "VTIMEZONE";
    pub const VALARM: &str = "VALARM";
    pub const STANDARD: &str = "STANDARD";
    pub const DAYLIGHT: &str = "DAYLIGHT";
}

pub mod prop {
    // Calendar properties
    pub const CALSCALE: &str = "CALSCALE";
    pub const METHOD: &str = "METHOD";
    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";

    // RFC 7986 and widely deployed calendar extensions
    pub const NAME: &str = "NAME";
    pub const COLOR: &str = "COLOR";
    pub const REFRESH_INTERVAL: &str = "REFRESH-INTERVAL";
    pub const SOURCE: &str = "SOURCE";
    pub const X_WR_CALNAME: &str = "X-WR-CALNAME";
    pub const X_WR_CALDESC: &str = "X-WR-CALDESC";
    pub const X_WR_TIMEZONE: &str = "X-WR-TIMEZONE";
    pub const X_WR_RELCALID: &str = "X-WR-RELCALID";
    pub const X_PUBLISHED_TTL: &str = "X-PUBLISHED-TTL";

    // Descriptive component properties
    pub const ATTACH: &str = "ATTACH";
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const CLASS: &str = "CLASS";
    pub const COMMENT: &str = "COMMENT";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const GEO: &str = "GEO";
    pub const LOCATION: &str = "LOCATION";
    pub const PERCENT_COMPLETE: &str = "PERCENT-COMPLETE";
    pub const PRIORITY: &str = "PRIORITY";
    pub const RESOURCES: &str = "RESOURCES";
    pub const STATUS: &str = "STATUS";
    pub const SUMMARY: &str = "SUMMARY";

    // Date and time properties
    pub const COMPLETED: &str = "COMPLETED";
    pub const DTEND: &str = "DTEND";
    pub const DUE: &str = "DUE";
    pub const DTSTART: &str = "DTSTART";
    pub const DURATION: &str = "DURATION";
    pub const FREEBUSY: &str = "FREEBUSY";
    pub const TRANSP: &str = "TRANSP";

    // Timezone properties
    pub const TZID: &str = "TZID";
    pub const TZNAME: &str = "TZNAME";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";
    pub const TZURL: &str = "TZURL";

    // Relationship properties
    pub const ATTENDEE: &str = "ATTENDEE";
    pub const CONTACT: &str = "CONTACT";
    pub const ORGANIZER: &str = "ORGANIZER";
    pub const RECURRENCE_ID: &str = "RECURRENCE-ID";
    pub const RELATED_TO: &str = "RELATED-TO";
    pub const URL: &str = "URL";
    pub const UID: &str = "UID";

    // Recurrence properties
    pub const EXDATE: &str = "EXDATE";
    pub const EXRULE: &str = "EXRULE";
    pub const RDATE: &str = "RDATE";
    pub const RRULE: &str = "RRULE";

    // Alarm properties
    pub const ACTION: &str = "ACTION";
    pub const REPEAT: &str = "REPEAT";
    pub const TRIGGER: &str = "TRIGGER";

    // Change management properties
    pub const CREATED: &str = "CREATED";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const LAST_MODIFIED: &str = "LAST-MODIFIED";
    pub const SEQUENCE: &str = "SEQUENCE";

    pub const REQUEST_STATUS: &str = "REQUEST-STATUS";
}

pub mod param {
    pub const ALTREP: &str = "ALTREP";
    pub const CN: &str = "CN";
    pub const CUTYPE: &str = "CUTYPE";
    pub const DELEGATED_FROM: &str = "DELEGATED-FROM";
    pub const DELEGATED_TO: &str = "DELEGATED-TO";
    pub const DIR: &str = "DIR";
    pub const ENCODING: &str = "ENCODING";
    pub const FMTTYPE: &str = "FMTTYPE";
    pub const FBTYPE: &str = "FBTYPE";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const MEMBER: &str = "MEMBER";
    pub const PARTSTAT: &str = "PARTSTAT";
    pub const RANGE: &str = "RANGE";
    pub const RELATED: &str = "RELATED";
    pub const RELTYPE: &str = "RELTYPE";
    pub const ROLE: &str = "ROLE";
    pub const RSVP: &str = "RSVP";
    pub const SENT_BY: &str = "SENT-BY";
    pub const TZID: &str = "TZID";
    pub const VALUE: &str = "VALUE";
}
