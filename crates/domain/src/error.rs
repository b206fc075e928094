//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeDashError`] via `#[from]`.

use crate::device::{ControlMode, DeviceKind};
use crate::operation::Operation;

/// Top-level error returned by domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum HomeDashError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    ControlMode(#[from] ControlModeError),
}

/// A domain invariant or an input check failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid identifier {value:?}: expected lowercase letters, digits, '-' or '_'")]
    InvalidId { value: String },

    #[error("room {room_id} declares device {device_id} more than once")]
    DuplicateDeviceId { room_id: String, device_id: String },

    #[error("room {room_id} is declared more than once")]
    DuplicateRoomId { room_id: String },

    #[error("invalid request body: {reason}")]
    InvalidPayload { reason: String },

    #[error("invalid time {value:?}: expected HH:MM")]
    InvalidTime { value: String },

    #[error("{operation} is not supported by {kind} devices")]
    UnsupportedOperation {
        kind: DeviceKind,
        operation: Operation,
    },

    #[error("{kind} devices require a {bound} threshold")]
    MissingThreshold {
        kind: DeviceKind,
        bound: &'static str,
    },

    #[error("invalid temperature thresholds: {reason}")]
    InvalidThreshold { reason: &'static str },

    #[error("cannot read temperature from {reading:?}")]
    InvalidTemperature { reading: String },

    #[error("duration must be between 1 and 1440 minutes, got {minutes}")]
    InvalidDuration { minutes: u32 },

    #[error("a duration is only meaningful for irrigation, not {kind}")]
    DurationNotSupported { kind: DeviceKind },

    #[error("device {device_id} is in manual mode but carries a schedule")]
    ScheduleInManualMode { device_id: String },

    #[error("{kind} device {device_id} cannot carry a schedule")]
    ScheduleOnThermalDevice { kind: DeviceKind, device_id: String },

    #[error("{kind} device {device_id} cannot carry temperature thresholds")]
    ThresholdsOnSchedulableDevice { kind: DeviceKind, device_id: String },

    #[error("device {device_id} must be {expected} for its thresholds and reading")]
    ThresholdStatusMismatch {
        device_id: String,
        expected: &'static str,
    },
}

/// A room or device lookup came back empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// An operation was attempted while the device was in the wrong control mode.
///
/// This is the only expected failure of the state machine: the store is left
/// untouched and the caller is told which mode to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{operation} requires {required} mode, device is in {actual} mode")]
pub struct ControlModeError {
    pub operation: Operation,
    pub required: ControlMode,
    pub actual: ControlMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_top_level_error() {
        let err: HomeDashError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            HomeDashError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_describe_control_mode_rejection() {
        let err = ControlModeError {
            operation: Operation::ToggleDevice,
            required: ControlMode::Manual,
            actual: ControlMode::Auto,
        };
        assert_eq!(
            err.to_string(),
            "toggle_device requires manual mode, device is in auto mode"
        );
    }

    #[test]
    fn should_describe_missing_entity() {
        let err = NotFoundError {
            entity: "Room",
            id: "attic".to_string(),
        };
        assert_eq!(err.to_string(), "Room attic not found");
    }
}
