//! Time and timestamp helpers.

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for notice times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a strict 24-hour `HH:MM` wall-clock time.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTime`] for anything that is not exactly
/// two digits, a colon, and two digits forming a valid time. The empty string
/// is rejected like any other malformed value.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidTime {
        value: value.to_string(),
    };
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())
}

/// Format a wall-clock time as `HH:MM`.
#[must_use]
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter storing a [`NaiveTime`] as an `HH:MM` string.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_parse_valid_hhmm() {
        let t = parse_hhmm("06:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
        assert_eq!(format_hhmm(t), "06:30");
    }

    #[test]
    fn should_reject_empty_time() {
        assert!(matches!(
            parse_hhmm(""),
            Err(ValidationError::InvalidTime { .. })
        ));
    }

    #[test]
    fn should_reject_out_of_range_or_loose_formats() {
        assert!(parse_hhmm("24:00").is_err());
        assert!(parse_hhmm("6:30").is_err());
        assert!(parse_hhmm("06:60").is_err());
        assert!(parse_hhmm("06-30").is_err());
    }
}
