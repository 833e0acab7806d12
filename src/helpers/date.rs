//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a front-matter date string in various formats.
///
/// Dates without a time component are taken as midnight UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

/// ISO 8601 timestamp with millisecond precision, e.g. `2024-01-15T00:00:00.000Z`
pub fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// RFC 2822 date as used by RSS `pubDate`, e.g. `Mon, 15 Jan 2024 00:00:00 GMT`
pub fn rfc822_date(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!(iso_timestamp(&dt), "2024-01-15T00:00:00.000Z");
    }

    #[test]
    fn test_parse_with_offset() {
        let dt = parse_date_string("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(iso_timestamp(&dt), "2024-01-15T08:30:00.000Z");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_date_string("soon").is_none());
        assert!(parse_date_string("2024-13-01").is_none());
        assert!(parse_date_string("").is_none());
    }

    #[test]
    fn test_iso_timestamp_round_trips() {
        let dt = parse_date_string("2024-06-01 12:05:09").unwrap();
        let iso = iso_timestamp(&dt);
        assert_eq!(DateTime::parse_from_rfc3339(&iso).unwrap(), dt);
    }

    #[test]
    fn test_rfc822_date() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!(rfc822_date(&dt), "Mon, 15 Jan 2024 00:00:00 GMT");
    }
}
