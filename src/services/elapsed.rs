// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Elapsed-time formatting ("2h 5m", "just now").
//!
//! One policy everywhere: minutes only under an hour, hours only on the
//! hour, otherwise both.

use chrono::{DateTime, Utc};

/// Shown when there is no reference instant.
pub const UNKNOWN: &str = "unknown";

/// Shown for less than one whole minute.
pub const JUST_NOW: &str = "just now";

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Time from `reference` to `now`, in whole minutes rounded down.
pub fn format_elapsed(reference: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(reference) = reference else {
        return UNKNOWN.to_string();
    };

    let total_minutes = (now - reference)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_MINUTE);

    if total_minutes < 1 {
        return JUST_NOW.to_string();
    }

    format_minutes(total_minutes)
}

/// Format a minute count as `"{h}h {m}m"`, dropping a zero part.
pub fn format_minutes(total_minutes: i64) -> String {
    let total_minutes = total_minutes.max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_same_instant_is_just_now() {
        assert_eq!(format_elapsed(Some(now()), now()), "just now");
    }

    #[test]
    fn test_under_a_minute_is_just_now() {
        let reference = now() - Duration::seconds(59);
        assert_eq!(format_elapsed(Some(reference), now()), "just now");
    }

    #[test]
    fn test_future_reference_is_just_now() {
        let reference = now() + Duration::minutes(5);
        assert_eq!(format_elapsed(Some(reference), now()), "just now");
    }

    #[test]
    fn test_missing_reference() {
        assert_eq!(format_elapsed(None, now()), "unknown");
    }

    #[test]
    fn test_ninety_minutes() {
        let reference = now() - Duration::minutes(90);
        assert_eq!(format_elapsed(Some(reference), now()), "1h 30m");
    }

    #[test]
    fn test_rounds_down_to_whole_minutes() {
        let reference = now() - Duration::seconds(59 * 60 + 59);
        assert_eq!(format_elapsed(Some(reference), now()), "59m");
    }

    #[test]
    fn test_exact_hours_drop_minutes() {
        let reference = now() - Duration::hours(3);
        assert_eq!(format_elapsed(Some(reference), now()), "3h");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h");
        assert_eq!(format_minutes(495), "8h 15m");
        assert_eq!(format_minutes(-3), "0m");
    }
}
