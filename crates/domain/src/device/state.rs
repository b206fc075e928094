//! Derived device state: which node of the control state machine a device is in.

use serde::{Deserialize, Serialize};

/// The six states a device can be in.
///
/// Derived from `control_mode`, `status`, schedule and thresholds; never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    ManualOff,
    ManualOn,
    AutoUnscheduled,
    AutoScheduledActive,
    AutoThresholdActive,
    AutoThresholdInactive,
}

impl DeviceState {
    #[must_use]
    pub fn is_auto(self) -> bool {
        !matches!(self, Self::ManualOff | Self::ManualOn)
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ManualOff => f.write_str("manual_off"),
            Self::ManualOn => f.write_str("manual_on"),
            Self::AutoUnscheduled => f.write_str("auto_unscheduled"),
            Self::AutoScheduledActive => f.write_str("auto_scheduled_active"),
            Self::AutoThresholdActive => f.write_str("auto_threshold_active"),
            Self::AutoThresholdInactive => f.write_str("auto_threshold_inactive"),
        }
    }
}
