// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{NaiveDate, NaiveDateTime};

/// Timestamp layout used by Strava for `start_date`.
pub const STRAVA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a Strava UTC timestamp (`2024-01-01T06:00:00Z`).
pub fn parse_strava_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, STRAVA_TIMESTAMP_FORMAT)
}

/// Format a Strava timestamp for display, e.g. `01 January 2024, 06:00:00 AM`.
///
/// Unparseable input is returned unchanged.
pub fn format_activity_datetime(value: &str) -> String {
    match parse_strava_timestamp(value) {
        Ok(dt) => dt.format("%d %B %Y, %I:%M:%S %p").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Render a duration in seconds as `1 hour, 2 minutes and 5 seconds`.
pub fn format_precise_duration(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let units = [
        (total / 86_400, "day"),
        (total % 86_400 / 3_600, "hour"),
        (total % 3_600 / 60, "minute"),
        (total % 60, "second"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| {
            if *n == 1 {
                format!("1 {}", unit)
            } else {
                format!("{} {}s", n, unit)
            }
        })
        .collect();

    match parts.split_last() {
        None => "0 seconds".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

/// Render a distance in meters as kilometres with two decimals.
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Render a date the way Strava prefixes `start_date` (`YYYY-MM-DD`).
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strava_timestamp() {
        let dt = parse_strava_timestamp("2024-01-01T06:00:00Z").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn test_parse_strava_timestamp_rejects_offsets() {
        assert!(parse_strava_timestamp("2024-01-01T06:00:00+02:00").is_err());
        assert!(parse_strava_timestamp("2024-01-01").is_err());
        assert!(parse_strava_timestamp("").is_err());
    }

    #[test]
    fn test_format_activity_datetime() {
        assert_eq!(
            format_activity_datetime("2024-01-01T18:30:05Z"),
            "01 January 2024, 06:30:05 PM"
        );
        assert_eq!(format_activity_datetime("garbage"), "garbage");
    }

    #[test]
    fn test_format_precise_duration() {
        assert_eq!(format_precise_duration(0), "0 seconds");
        assert_eq!(format_precise_duration(1), "1 second");
        assert_eq!(format_precise_duration(1800), "30 minutes");
        assert_eq!(format_precise_duration(3725), "1 hour, 2 minutes and 5 seconds");
        assert_eq!(format_precise_duration(90_000), "1 day and 1 hour");
    }

    #[test]
    fn test_format_distance_km() {
        assert_eq!(format_distance_km(5000.0), "5.00 km");
        assert_eq!(format_distance_km(12_346.0), "12.35 km");
    }
}
