// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Naive local formats accepted for hand-entered activity times.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored manual activity time.
///
/// RFC3339 strings carry their own offset. Naive forms are read as wall-clock
/// time in `tz`. Anything else is `None`.
pub fn parse_activity_time(raw: &str, tz: &FixedOffset) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| local_to_utc(naive, tz))
}

/// Combine the manual-entry form's date (`YYYY-MM-DD`) and time (`HH:MM`,
/// seconds optional) into a single instant in `tz`.
pub fn combine_local_date_time(date: &str, time: &str, tz: &FixedOffset) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .ok()?;
    local_to_utc(date.and_time(time), tz)
}

fn local_to_utc(naive: NaiveDateTime, tz: &FixedOffset) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Long-form calendar date, e.g. "Sunday, October 18, 2026".
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Wall-clock time of an instant in `tz`, e.g. "10:05 PM".
pub fn format_clock_time(instant: DateTime<Utc>, tz: &FixedOffset) -> String {
    instant.with_timezone(tz).format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pacific() -> FixedOffset {
        FixedOffset::west_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let parsed = parse_activity_time("2026-10-18T06:15:00+02:00", &pacific()).unwrap();
        assert_eq!(format_utc_rfc3339(parsed), "2026-10-18T04:15:00Z");
    }

    #[test]
    fn test_parse_naive_uses_display_zone() {
        let parsed = parse_activity_time("2026-10-18T06:15", &pacific()).unwrap();
        assert_eq!(format_utc_rfc3339(parsed), "2026-10-18T13:15:00Z");

        let parsed = parse_activity_time("2026-10-18 06:15:30", &pacific()).unwrap();
        assert_eq!(format_utc_rfc3339(parsed), "2026-10-18T13:15:30Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_activity_time("", &pacific()).is_none());
        assert!(parse_activity_time("10/18/2026, 6:15:00 AM", &pacific()).is_none());
        assert!(parse_activity_time("2026-13-40T99:00", &pacific()).is_none());
    }

    #[test]
    fn test_combine_form_fields() {
        let instant = combine_local_date_time("2026-10-17", "22:00", &pacific()).unwrap();
        assert_eq!(format_utc_rfc3339(instant), "2026-10-18T05:00:00Z");

        assert!(combine_local_date_time("2026-10-17", "", &pacific()).is_none());
        assert!(combine_local_date_time("yesterday", "22:00", &pacific()).is_none());
    }

    #[test]
    fn test_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(format_day_label(date), "Sunday, October 18, 2026");

        let instant = DateTime::parse_from_rfc3339("2026-10-18T05:05:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_clock_time(instant, &pacific()), "10:05 PM");
    }
}
