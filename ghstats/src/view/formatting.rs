//! Shared formatting utilities for the ghstats views.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

use ghstats_common::Timestamp;

/// Format a numeric value for display with appropriate scale suffix.
///
/// - Values >= 1M display as "X.XM"
/// - Values >= 1K display as "X.XK"
/// - Integer values display without decimal places
/// - Other values display with 2 decimal places
pub fn format_value(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Value accepted by the date-time picker formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerValue {
    /// Raw timestamp (epoch millis or text).
    Timestamp(Timestamp),
    /// Already-resolved datetime.
    DateTime(DateTime<Utc>),
}

impl From<Timestamp> for PickerValue {
    fn from(t: Timestamp) -> Self {
        PickerValue::Timestamp(t)
    }
}

impl From<&Timestamp> for PickerValue {
    fn from(t: &Timestamp) -> Self {
        PickerValue::Timestamp(t.clone())
    }
}

impl From<DateTime<Utc>> for PickerValue {
    fn from(dt: DateTime<Utc>) -> Self {
        PickerValue::DateTime(dt)
    }
}

impl From<i64> for PickerValue {
    fn from(ms: i64) -> Self {
        PickerValue::Timestamp(Timestamp::Millis(ms))
    }
}

impl From<&str> for PickerValue {
    fn from(s: &str) -> Self {
        PickerValue::Timestamp(Timestamp::from(s))
    }
}

/// Format a value for a date-time picker field in local time.
///
/// See [`format_picker_value_in`].
pub fn format_picker_value(value: impl Into<PickerValue>) -> Option<String> {
    format_picker_value_in(value, &Local)
}

/// Format a value as `YYYY-MM-DDTHH:MM:00` in the given time zone.
///
/// Seconds are always rendered as `00`. Returns `None` for an empty value
/// (`""` or epoch zero) or one that cannot be parsed.
pub fn format_picker_value_in<Tz: TimeZone>(
    value: impl Into<PickerValue>,
    tz: &Tz,
) -> Option<String> {
    let dt = match value.into() {
        PickerValue::Timestamp(t) if t.is_empty() => return None,
        PickerValue::Timestamp(t) => t.to_datetime()?,
        PickerValue::DateTime(dt) => dt,
    };
    let local = dt.with_timezone(tz);

    Some(format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:00",
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute()
    ))
}

/// Format a time-axis label (local time).
pub fn format_axis_time(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.with_timezone(&Local).format("%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(3.14159), "3.14");
        assert_eq!(format_value(1500.0), "1.5K");
        assert_eq!(format_value(2500000.0), "2.5M");
        assert_eq!(format_value(-1500.0), "-1.5K");
    }

    #[test]
    fn test_picker_zero_pads_and_drops_seconds() {
        let formatted = format_picker_value_in("2024-03-09T09:05:47Z", &utc());
        assert_eq!(formatted.as_deref(), Some("2024-03-09T09:05:00"));
    }

    #[test]
    fn test_picker_uses_time_zone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let formatted = format_picker_value_in("2024-12-31T23:30:00Z", &plus_two);
        assert_eq!(formatted.as_deref(), Some("2025-01-01T01:30:00"));
    }

    #[test]
    fn test_picker_accepts_millis_and_datetime() {
        // 1970-01-02T03:04:59Z
        let ms: i64 = 86_400_000 + 3 * 3_600_000 + 4 * 60_000 + 59_000;
        assert_eq!(
            format_picker_value_in(ms, &utc()).as_deref(),
            Some("1970-01-02T03:04:00")
        );

        let dt = DateTime::from_timestamp_millis(ms).unwrap();
        assert_eq!(
            format_picker_value_in(dt, &utc()).as_deref(),
            Some("1970-01-02T03:04:00")
        );
    }

    #[test]
    fn test_picker_empty_is_noop() {
        assert_eq!(format_picker_value(""), None);
        assert_eq!(format_picker_value(0_i64), None);
        assert_eq!(format_picker_value("not a date"), None);
    }
}
