//! Formatters for typed values (RFC 5545 §3.3).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// `19970714T173000Z`
#[must_use]
pub fn format_date_time_utc(value: &DateTime<Utc>) -> String {
    value.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `19970714T173000`, for floating and `TZID` values.
#[must_use]
pub fn format_floating(value: &NaiveDateTime) -> String {
    value.format("%Y%m%dT%H%M%S").to_string()
}

/// `19970714`
#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%Y%m%d").to_string()
}

/// `+0530`, or `+053045` when seconds are present.
#[must_use]
pub fn format_utc_offset(offset: FixedOffset) -> String {
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let total = total.unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}{minutes:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, TimeZone};

    use super::*;

    #[test]
    fn formats_dates_and_times() {
        let utc = Utc.with_ymd_and_hms(1997, 7, 14, 17, 30, 0).unwrap();
        assert_eq!(format_date_time_utc(&utc), "19970714T173000Z");

        let date = NaiveDate::from_ymd_opt(1997, 7, 4).unwrap();
        assert_eq!(format_date(date), "19970704");
        assert_eq!(format_floating(&date.and_time(NaiveTime::MIN)), "19970704T000000");
    }

    #[test]
    fn formats_offsets() {
        assert_eq!(format_utc_offset(FixedOffset::west_opt(5 * 3600).unwrap()), "-0500");
        assert_eq!(format_utc_offset(FixedOffset::east_opt(0).unwrap()), "+0000");
        assert_eq!(format_utc_offset(FixedOffset::east_opt(19845).unwrap()), "+053045");
    }
}
