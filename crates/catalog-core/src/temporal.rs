//! # Temporal Types — UTC-Only Timestamps
//!
//! `Timestamp` is the single time representation for end dates and expiry
//! dates. It is always UTC and truncated to whole seconds, so two values
//! compare the same way on every machine and the "strictly in the future"
//! check is exact at the boundary.
//!
//! The backend speaks ISO 8601 with a `Z` suffix. Admin input may carry a
//! local offset; [`Timestamp::parse_lenient()`] normalises it to UTC.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CatalogError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 string, accepting only the `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidTimestamp`] if the string is not
    /// RFC 3339 or carries an explicit offset (even `+00:00`).
    pub fn parse(s: &str) -> Result<Self, CatalogError> {
        if !s.ends_with('Z') {
            return Err(CatalogError::InvalidTimestamp {
                input: s.to_string(),
                reason: "must use Z suffix (UTC only)".into(),
            });
        }
        Self::parse_lenient(s)
    }

    /// Parse an RFC 3339 string with any offset, converting to UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, CatalogError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| CatalogError::InvalidTimestamp {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// From Unix epoch seconds.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, CatalogError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or_else(|| CatalogError::InvalidTimestamp {
            input: secs.to_string(),
            reason: "out of range".into(),
        })?;
        Ok(Self(dt))
    }

    /// This timestamp shifted by `secs` seconds (negative shifts backwards).
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unix epoch seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

// Backend values may carry fractional seconds or an offset; both are
// normalised on the way in.
impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_lenient(&raw).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(123_456_789).unwrap());
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn parse_strict_rejects_offsets() {
        assert!(Timestamp::parse("2026-01-15T12:00:00Z").is_ok());
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15T17:00:00+05:00").is_err());
    }

    #[test]
    fn parse_lenient_converts_offset() {
        let ts = Timestamp::parse_lenient("2026-01-15T19:00:00+07:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn parse_invalid_format() {
        assert!(Timestamp::parse("tomorrow").is_err());
        assert!(Timestamp::parse("2026-01-15").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn plus_secs_and_ordering() {
        let base = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let later = base.plus_secs(1);
        assert!(base < later);
        assert_eq!(later.plus_secs(-1), base);
        assert_eq!(base.plus_secs(86_400).to_iso8601(), "2026-01-16T12:00:00Z");
    }

    #[test]
    fn epoch_roundtrip() {
        let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        assert_eq!(Timestamp::from_epoch_secs(ts.epoch_secs()).unwrap(), ts);
    }

    #[test]
    fn serde_uses_rfc3339() {
        let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-01-15T12:00:00Z\"");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn deserialize_truncates_backend_subseconds() {
        let ts: Timestamp = serde_json::from_str("\"2026-01-15T12:00:00.999Z\"").unwrap();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts, Timestamp::parse("2026-01-15T12:00:00Z").unwrap());

        let shifted: Timestamp = serde_json::from_str("\"2026-01-15T19:00:00.5+07:00\"").unwrap();
        assert_eq!(shifted.to_iso8601(), "2026-01-15T12:00:00Z");

        assert!(serde_json::from_str::<Timestamp>("\"next week\"").is_err());
    }
}
