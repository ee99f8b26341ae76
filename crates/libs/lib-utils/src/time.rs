//! # Time Utilities
//!
//! Record timestamps use the `YYYY-MM-DD HH:MM:SS.mmmZ` layout the web client
//! already sorts and displays.

use chrono::{DateTime, Utc};

const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3fZ";

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format time as a record timestamp.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.format(RECORD_TIME_FORMAT).to_string()
}

/// Current time as a record timestamp.
pub fn now_timestamp() -> String {
    format_time(now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_millis_and_zulu_suffix() {
        let time = Utc.with_ymd_and_hms(2026, 1, 9, 0, 0, 0).unwrap();
        assert_eq!(format_time(time), "2026-01-09 00:00:00.000Z");
    }

    #[test]
    fn timestamps_sort_lexicographically() {
        let earlier = format_time(Utc.with_ymd_and_hms(2026, 1, 9, 8, 0, 0).unwrap());
        let later = format_time(Utc.with_ymd_and_hms(2026, 1, 9, 10, 30, 0).unwrap());
        assert!(earlier < later);
    }
}
