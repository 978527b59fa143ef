//! Date-time helpers shared by the viewer and the demo data source.
//!
//! Chart payloads carry timestamps either as `DT_FMT` strings (UTC) or as
//! epoch milliseconds. Picker values are naive local times.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wire format for timestamps in chart payloads and query strings.
pub const DT_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Naive formats accepted from date-time picker fields.
const PICKER_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Current UTC time.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a `DT_FMT` string as UTC.
pub fn parse_dt(s: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, DT_FMT)?;
    Ok(naive.and_utc())
}

/// Format a UTC datetime using `DT_FMT`.
pub fn dt_to_str(dt: &DateTime<Utc>) -> String {
    dt.format(DT_FMT).to_string()
}

/// Convert epoch seconds (possibly fractional) to a datetime.
pub fn timestamp_to_dt(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

/// Convert a datetime to epoch seconds.
pub fn dt_to_timestamp(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64 / 1000.0
}

/// Parse a datetime from a query parameter.
///
/// Accepts, in order: numeric epoch seconds, `DT_FMT`, RFC 3339, and the
/// naive picker formats (interpreted in the local time zone).
pub fn parse_query_dt(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::DateTime("empty value".to_string()));
    }

    if let Ok(seconds) = s.parse::<f64>() {
        return timestamp_to_dt(seconds)
            .ok_or_else(|| Error::DateTime(format!("timestamp out of range: {}", s)));
    }

    if let Ok(dt) = parse_dt(s) {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in PICKER_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| Error::DateTime(format!("nonexistent local time: {}", s)));
        }
    }

    Err(Error::DateTime(format!(
        "could not parse datetime from {:?}",
        s
    )))
}

/// A timestamp as it appears in a chart payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Epoch milliseconds.
    Millis(i64),
    /// Text timestamp (`DT_FMT` or any format accepted by [`parse_query_dt`]).
    Text(String),
}

impl Timestamp {
    /// Whether this value is empty (`""` or epoch zero).
    pub fn is_empty(&self) -> bool {
        match self {
            Timestamp::Millis(ms) => *ms == 0,
            Timestamp::Text(s) => s.trim().is_empty(),
        }
    }

    /// Resolve to a UTC datetime, if the value is parseable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Timestamp::Text(s) => parse_query_dt(s).ok(),
        }
    }

    /// Epoch milliseconds, if the value is parseable.
    pub fn millis(&self) -> Option<i64> {
        self.to_datetime().map(|dt| dt.timestamp_millis())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::Text(dt_to_str(&dt))
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Timestamp::Millis(ms)
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Timestamp::Text(s.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(s: String) -> Self {
        Timestamp::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_and_format_roundtrip() {
        let dt = parse_dt("2018-04-01T09:05:30Z").unwrap();
        assert_eq!(dt.year(), 2018);
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 5);
        assert_eq!(dt_to_str(&dt), "2018-04-01T09:05:30Z");
    }

    #[test]
    fn test_parse_query_dt_numeric() {
        let dt = parse_query_dt("86400").unwrap();
        assert_eq!(dt_to_str(&dt), "1970-01-02T00:00:00Z");
        assert_eq!(dt_to_timestamp(&dt), 86400.0);
    }

    #[test]
    fn test_parse_query_dt_rfc3339() {
        let dt = parse_query_dt("2020-01-01T12:00:00+02:00").unwrap();
        assert_eq!(dt_to_str(&dt), "2020-01-01T10:00:00Z");
    }

    #[test]
    fn test_parse_query_dt_rejects_garbage() {
        assert!(parse_query_dt("").is_err());
        assert!(parse_query_dt("yesterday").is_err());
    }

    #[test]
    fn test_timestamp_empty() {
        assert!(Timestamp::Millis(0).is_empty());
        assert!(Timestamp::from("").is_empty());
        assert!(!Timestamp::Millis(1).is_empty());
    }

    #[test]
    fn test_timestamp_deserialize_untagged() {
        let ms: Timestamp = serde_json::from_str("1522573530000").unwrap();
        assert_eq!(ms, Timestamp::Millis(1_522_573_530_000));

        let text: Timestamp = serde_json::from_str("\"2018-04-01T09:05:30Z\"").unwrap();
        assert_eq!(text.millis(), Some(1_522_573_530_000));
    }
}
