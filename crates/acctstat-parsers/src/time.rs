//! Time conversion utilities for accounting records.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serializer;
use std::time::Duration;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Convert epoch seconds (possibly fractional) to a UTC timestamp.
///
/// Returns None for NaN, infinities, and values outside chrono's range.
pub fn epoch_to_datetime(epoch: f64) -> Option<DateTime<Utc>> {
    if !epoch.is_finite() {
        return None;
    }

    let whole = epoch.floor();
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }

    let secs = whole as i64;
    let nanos = ((epoch - whole) * NANOS_PER_SEC).round() as u32;
    if nanos >= 1_000_000_000 {
        DateTime::from_timestamp(secs.checked_add(1)?, 0)
    } else {
        DateTime::from_timestamp(secs, nanos)
    }
}

/// Convert a logged seconds value to a duration.
///
/// Negative values are the "unavailable" sentinel and become zero.
/// Returns None for NaN or values too large to represent.
pub fn seconds_to_duration(secs: f64) -> Option<Duration> {
    let secs = if secs < 0.0 { 0.0 } else { secs };
    Duration::try_from_secs_f64(secs).ok()
}

/// Total seconds in a time delta, including the fractional part.
pub fn total_seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / NANOS_PER_SEC
}

/// Serialize a time delta as fractional seconds.
pub fn serialize_seconds<S: Serializer>(delta: &TimeDelta, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(total_seconds(*delta))
}

/// Format a time delta as "1d 02:30:00" or "01:30:00".
pub fn format_duration(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let seconds = delta.num_seconds().unsigned_abs();

    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours >= 24 {
        let days = hours / 24;
        let hours = hours % 24;
        format!("{}{}d {:02}:{:02}:{:02}", sign, days, hours, mins, secs)
    } else {
        format!("{}{:02}:{:02}:{:02}", sign, hours, mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_to_datetime() {
        let dt = epoch_to_datetime(1_300_000_000.0).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2011-03-13 07:06:40");

        let dt = epoch_to_datetime(0.5).unwrap();
        assert_eq!(dt.timestamp(), 0);
        assert_eq!(dt.timestamp_subsec_millis(), 500);

        assert_eq!(epoch_to_datetime(0.0).unwrap().timestamp(), 0);
        assert!(epoch_to_datetime(f64::NAN).is_none());
        assert!(epoch_to_datetime(f64::INFINITY).is_none());
        assert!(epoch_to_datetime(1e300).is_none());
    }

    #[test]
    fn test_seconds_to_duration() {
        assert_eq!(seconds_to_duration(1.5), Some(Duration::from_millis(1500)));
        assert_eq!(seconds_to_duration(-1.0), Some(Duration::ZERO));
        assert!(seconds_to_duration(f64::NAN).is_none());
    }

    #[test]
    fn test_total_seconds() {
        assert_eq!(total_seconds(TimeDelta::seconds(3600)), 3600.0);
        assert_eq!(total_seconds(TimeDelta::milliseconds(1500)), 1.5);
        assert_eq!(total_seconds(TimeDelta::seconds(-30)), -30.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::seconds(330)), "00:05:30");
        assert_eq!(format_duration(TimeDelta::seconds(5400)), "01:30:00");
        assert_eq!(format_duration(TimeDelta::seconds(86400 + 9000)), "1d 02:30:00");
        assert_eq!(format_duration(TimeDelta::seconds(-60)), "-00:01:00");
    }
}
