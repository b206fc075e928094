//! Temperature thresholds and sensor reading parsing.

use serde::{Deserialize, Serialize};

use crate::device::DeviceKind;
use crate::error::ValidationError;

/// Activation bounds in °C. Heating uses `min`, cooling uses `max`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl TemperatureThresholds {
    /// Thresholds for a heating device: on below `min`.
    #[must_use]
    pub fn heating(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Thresholds for a cooling device: on above `max`.
    #[must_use]
    pub fn cooling(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Check that the bound required by `kind` is present and sane.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidThreshold`] for non-finite bounds or
    ///   `min > max`
    /// - [`ValidationError::MissingThreshold`] when heating lacks `min` or
    ///   cooling lacks `max`
    pub fn validate_for(&self, kind: DeviceKind) -> Result<(), ValidationError> {
        if self.min.is_some_and(|v| !v.is_finite()) || self.max.is_some_and(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidThreshold {
                reason: "bounds must be finite numbers",
            });
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(ValidationError::InvalidThreshold {
                reason: "min must not exceed max",
            });
        }
        match kind {
            DeviceKind::Heating if self.min.is_none() => Err(ValidationError::MissingThreshold {
                kind,
                bound: "min",
            }),
            DeviceKind::Cooling if self.max.is_none() => Err(ValidationError::MissingThreshold {
                kind,
                bound: "max",
            }),
            _ => Ok(()),
        }
    }

    /// Whether a device of `kind` reading `current` °C should be on.
    ///
    /// Heating is on strictly below `min`, cooling strictly above `max`.
    /// A missing bound never activates the device.
    #[must_use]
    pub fn should_activate(&self, kind: DeviceKind, current: f64) -> bool {
        match kind {
            DeviceKind::Heating => self.min.is_some_and(|min| current < min),
            DeviceKind::Cooling => self.max.is_some_and(|max| current > max),
            DeviceKind::Blinds | DeviceKind::Irrigation | DeviceKind::Lighting => false,
        }
    }
}

/// Parse a reading such as `"21°C"` or `"-3.5 °C"` into degrees.
///
/// The unit suffix (everything after the last digit or dot) is stripped.
/// A missing reading counts as `0.0`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTemperature`] when no number remains
/// after stripping the suffix.
pub fn parse_reading(reading: Option<&str>) -> Result<f64, ValidationError> {
    let Some(raw) = reading else {
        return Ok(0.0);
    };
    let numeric = raw
        .trim()
        .trim_end_matches(|c: char| !(c.is_ascii_digit() || c == '.'))
        .trim();
    numeric
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidTemperature {
            reading: raw.to_string(),
        })
}
