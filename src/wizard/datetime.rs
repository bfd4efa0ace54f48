//! Conversion between epoch milliseconds and the `YYYY-MM-DDTHH:mm` strings
//! a date-time input works with. Display strings are in local time.

use chrono::{Local, LocalResult, NaiveDateTime, TimeZone};

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Local date-time string for an epoch-ms timestamp. Seconds are dropped;
/// `None` (or an out-of-range value) gives an empty string.
pub fn format_timestamp(timestamp_ms: Option<i64>) -> String {
    let Some(ms) = timestamp_ms else {
        return String::new();
    };
    match Local.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) => dt.format(INPUT_FORMAT).to_string(),
        LocalResult::Ambiguous(earliest, _) => earliest.format(INPUT_FORMAT).to_string(),
        LocalResult::None => String::new(),
    }
}

/// Epoch-ms timestamp for a local date-time string, or `None` if the string
/// is empty, malformed, or names a local time that does not exist.
pub fn parse_date_time(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(value, INPUT_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE_MS: i64 = 60_000;

    #[test]
    fn test_absent_timestamp_is_empty() {
        assert_eq!(format_timestamp(None), "");
        assert_eq!(parse_date_time(""), None);
        assert_eq!(parse_date_time("   "), None);
    }

    #[test]
    fn test_format_shape() {
        let formatted = format_timestamp(Some(1_700_000_000_000));
        assert_eq!(formatted.len(), 16);
        assert_eq!(&formatted[10..11], "T");
        assert_eq!(&formatted[13..14], ":");
    }

    #[test]
    fn test_round_trip_truncates_to_minute() {
        let timestamps: [i64; 7] = [
            1_700_000_000_123, // 2023-11-14 22:13:20.123 UTC
            1_650_000_059_999,
            1_718_000_030_500,
            4_102_444_812_345, // 2100
            1_000_000_001,
            -1,
            -86_399_001,
        ];
        for ts in timestamps {
            let formatted = format_timestamp(Some(ts));
            let parsed = parse_date_time(&formatted)
                .unwrap_or_else(|| panic!("{ts} formatted as {formatted:?} did not parse"));
            assert_eq!(parsed, ts - ts.rem_euclid(MINUTE_MS), "timestamp {ts}");
        }

        let aligned = 1_700_000_040_000;
        assert_eq!(parse_date_time(&format_timestamp(Some(aligned))), Some(aligned));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert_eq!(parse_date_time("2024-13-01T10:00"), None);
        assert_eq!(parse_date_time("yesterday"), None);
        assert_eq!(parse_date_time("2024-01-01 10:00"), None);
    }
}
