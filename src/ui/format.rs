use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

pub const INVALID_DATE: &str = "Invalid Date";

/// Định dạng thời gian theo giờ máy, kiểu `1/1/2024, 12:00:00 AM`.
pub fn format_created_at(raw: &str) -> String {
    format_timestamp_in(raw, &Local)
}

pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_timestamp(raw, tz) {
        Some(datetime) => datetime.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// RFC 3339 first; an offset-less date-time is read as local; a bare date as UTC midnight.
///
/// A local time inside a DST gap moves forward one hour, the way a browser `Date` does.
fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(tz));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return tz.from_local_datetime(&naive).earliest().or_else(|| {
            tz.from_local_datetime(&(naive + TimeDelta::hours(1)))
                .earliest()
        });
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().with_timezone(tz));
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, LocalResult, Utc};

    use super::*;

    #[test]
    fn formats_rfc3339_in_given_zone() {
        assert_eq!(
            format_timestamp_in("2024-01-01T00:00:00Z", &Utc),
            "1/1/2024, 12:00:00 AM"
        );
        assert_eq!(
            format_timestamp_in("2024-07-04T15:05:09.123Z", &Utc),
            "7/4/2024, 3:05:09 PM"
        );
    }

    #[test]
    fn converts_to_target_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp_in("2024-01-01T23:30:00Z", &plus_two),
            "1/2/2024, 1:30:00 AM"
        );
    }

    #[test]
    fn accepts_bare_date_and_local_datetime() {
        assert_eq!(
            format_timestamp_in("2024-03-10", &Utc),
            "3/10/2024, 12:00:00 AM"
        );
        assert_eq!(
            format_timestamp_in("2024-03-10T08:00:00", &Utc),
            "3/10/2024, 8:00:00 AM"
        );
    }

    /// UTC+0 until 2024-03-10 02:00, UTC+1 after: local 02:00..03:00 that day does not exist.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(2, 0, 0)
                .unwrap()
        }

        fn before() -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _local: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::before())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let switch = Self::switch();
            if *local < switch {
                LocalResult::Single(Self::before())
            } else if *local < switch + TimeDelta::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, _utc: &NaiveDate) -> FixedOffset {
            Self::before()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch() {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn local_time_in_dst_gap_moves_forward() {
        assert_eq!(
            format_timestamp_in("2024-03-10T02:30:00", &SpringForward),
            "3/10/2024, 3:30:00 AM"
        );
        assert_eq!(
            format_timestamp_in("2024-03-10T01:30:00", &SpringForward),
            "3/10/2024, 1:30:00 AM"
        );
    }

    #[test]
    fn created_at_uses_local_zone() {
        assert_ne!(format_created_at("2024-01-01T00:00:00Z"), INVALID_DATE);
        assert_eq!(format_created_at("soon"), INVALID_DATE);
    }

    #[test]
    fn garbage_is_invalid_date() {
        assert_eq!(format_timestamp_in("yesterday", &Utc), INVALID_DATE);
        assert_eq!(format_timestamp_in("", &Utc), INVALID_DATE);
    }
}
