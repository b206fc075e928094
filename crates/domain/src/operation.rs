//! Operations: the only ways device state may change.

use serde::{Deserialize, Serialize};

use crate::device::{Schedule, TemperatureThresholds};

/// Name of a state-machine operation, used in errors, notices, and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ToggleDevice,
    ToggleControlMode,
    SetSchedule,
    ClearSchedule,
    SetTemperatureThresholds,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToggleDevice => f.write_str("toggle_device"),
            Self::ToggleControlMode => f.write_str("toggle_control_mode"),
            Self::SetSchedule => f.write_str("set_schedule"),
            Self::ClearSchedule => f.write_str("clear_schedule"),
            Self::SetTemperatureThresholds => f.write_str("set_temperature_thresholds"),
        }
    }
}

/// A mutation request addressed to a single device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Flip `status`. Manual mode only.
    ToggleDevice,
    /// Flip between manual and auto.
    ToggleControlMode,
    /// Install a daily schedule and switch the device on. Auto mode only.
    SetSchedule { schedule: Schedule },
    /// Remove the schedule. Auto mode only.
    ClearSchedule,
    /// Store thresholds and evaluate `status` once. Auto mode only.
    SetTemperatureThresholds { thresholds: TemperatureThresholds },
}

impl Command {
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::ToggleDevice => Operation::ToggleDevice,
            Self::ToggleControlMode => Operation::ToggleControlMode,
            Self::SetSchedule { .. } => Operation::SetSchedule,
            Self::ClearSchedule => Operation::ClearSchedule,
            Self::SetTemperatureThresholds { .. } => Operation::SetTemperatureThresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_commands_to_operations() {
        assert_eq!(Command::ToggleDevice.operation(), Operation::ToggleDevice);
        assert_eq!(Command::ClearSchedule.operation(), Operation::ClearSchedule);
        assert_eq!(
            Command::SetTemperatureThresholds {
                thresholds: TemperatureThresholds::heating(20.0),
            }
            .operation(),
            Operation::SetTemperatureThresholds
        );
    }

    #[test]
    fn should_deserialize_tagged_schedule_command() {
        let json = serde_json::json!({
            "type": "set_schedule",
            "schedule": { "start_time": "06:00", "end_time": "06:30", "duration_minutes": 30 }
        });
        let command: Command = serde_json::from_value(json).unwrap();
        assert!(matches!(
            command,
            Command::SetSchedule { schedule } if schedule.duration_minutes == Some(30)
        ));
    }
}
