//! Schedule: a daily on-window for blinds, irrigation, and lighting.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::device::DeviceKind;
use crate::error::ValidationError;
use crate::time::{format_hhmm, parse_hhmm};

const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Recurrence of a schedule. Only daily schedules exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    #[default]
    Daily,
}

/// A daily window during which a schedulable device runs.
///
/// For irrigation, `duration_minutes` is how long the valve stays open per
/// activation and takes precedence over `end_time` when computing the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(with = "crate::time::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::time::hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub schedule_type: ScheduleType,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl Schedule {
    /// Build a non-repeating daily schedule from two `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTime`] if either time is malformed.
    pub fn daily(start_time: &str, end_time: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            start_time: parse_hhmm(start_time)?,
            end_time: parse_hhmm(end_time)?,
            schedule_type: ScheduleType::Daily,
            repeat: false,
            duration_minutes: None,
        })
    }

    #[must_use]
    pub fn repeating(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Check that this schedule makes sense for a device of `kind`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::DurationNotSupported`] when a duration is given
    ///   for anything but irrigation
    /// - [`ValidationError::InvalidDuration`] when the duration is zero or
    ///   longer than a day
    pub fn validate_for(&self, kind: DeviceKind) -> Result<(), ValidationError> {
        let Some(minutes) = self.duration_minutes else {
            return Ok(());
        };
        if kind != DeviceKind::Irrigation {
            return Err(ValidationError::DurationNotSupported { kind });
        }
        if minutes == 0 || minutes > MAX_DURATION_MINUTES {
            return Err(ValidationError::InvalidDuration { minutes });
        }
        Ok(())
    }

    /// End of the active window, honouring `duration_minutes` when present.
    #[must_use]
    pub fn window_end(&self) -> NaiveTime {
        match self.duration_minutes {
            Some(minutes) => {
                let (end, _) = self
                    .start_time
                    .overflowing_add_signed(TimeDelta::minutes(i64::from(minutes)));
                end
            }
            None => self.end_time,
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "daily {}-{}",
            format_hhmm(self.start_time),
            format_hhmm(self.window_end())
        )?;
        if self.repeat {
            f.write_str(" (repeat)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn should_build_daily_schedule_from_hhmm() {
        let s = Schedule::daily("06:00", "06:30").unwrap();
        assert_eq!(s.start_time, at(6, 0));
        assert_eq!(s.end_time, at(6, 30));
        assert_eq!(s.schedule_type, ScheduleType::Daily);
        assert!(!s.repeat);
        assert!(s.duration_minutes.is_none());
    }

    #[test]
    fn should_reject_empty_sentinel_times() {
        assert!(matches!(
            Schedule::daily("", ""),
            Err(ValidationError::InvalidTime { .. })
        ));
    }

    #[test]
    fn should_accept_duration_for_irrigation_only() {
        let s = Schedule::daily("06:00", "06:30")
            .unwrap()
            .with_duration_minutes(30);
        assert!(s.validate_for(DeviceKind::Irrigation).is_ok());
        assert!(matches!(
            s.validate_for(DeviceKind::Lighting),
            Err(ValidationError::DurationNotSupported {
                kind: DeviceKind::Lighting
            })
        ));
    }

    #[test]
    fn should_reject_zero_or_oversized_duration() {
        let zero = Schedule::daily("06:00", "06:30")
            .unwrap()
            .with_duration_minutes(0);
        assert!(matches!(
            zero.validate_for(DeviceKind::Irrigation),
            Err(ValidationError::InvalidDuration { minutes: 0 })
        ));
        let long = zero.with_duration_minutes(2000);
        assert!(long.validate_for(DeviceKind::Irrigation).is_err());
    }

    #[test]
    fn should_use_duration_for_window_end() {
        let s = Schedule::daily("06:00", "07:00")
            .unwrap()
            .with_duration_minutes(15);
        assert_eq!(s.window_end(), at(6, 15));
    }

    #[test]
    fn should_wrap_window_end_past_midnight() {
        let s = Schedule::daily("23:30", "23:45")
            .unwrap()
            .with_duration_minutes(60);
        assert_eq!(s.window_end(), at(0, 30));
    }

    #[test]
    fn should_serialize_times_as_hhmm() {
        let s = Schedule::daily("06:00", "06:30")
            .unwrap()
            .with_duration_minutes(30);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["start_time"], "06:00");
        assert_eq!(json["end_time"], "06:30");
        assert_eq!(json["schedule_type"], "daily");
        assert_eq!(json["duration_minutes"], 30);
    }

    #[test]
    fn should_reject_unknown_schedule_type_when_deserializing() {
        let json = serde_json::json!({
            "start_time": "06:00",
            "end_time": "06:30",
            "schedule_type": "weekly"
        });
        let result: Result<Schedule, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_malformed_time_when_deserializing() {
        let json = serde_json::json!({ "start_time": "", "end_time": "" });
        let result: Result<Schedule, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn should_display_window() {
        let s = Schedule::daily("07:00", "08:00").unwrap().repeating(true);
        assert_eq!(s.to_string(), "daily 07:00-08:00 (repeat)");
    }
}
