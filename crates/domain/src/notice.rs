//! Notice: the human-readable outcome of an operation.
//!
//! Every operation, applied or rejected, yields exactly one notice. Notices
//! are informational: nothing reads them back into device state.

use serde::{Deserialize, Serialize};

use crate::device::{ControlMode, DeviceKind};
use crate::error::{ControlModeError, HomeDashError};
use crate::id::NoticeId;
use crate::operation::Operation;
use crate::store::Transition;
use crate::time::{Timestamp, format_hhmm, now};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A title and description shown to the user after an operation.
///
/// The address is kept as given, so a notice can describe a rejection whose
/// room or device id never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
    pub room_id: String,
    pub device_id: String,
    pub timestamp: Timestamp,
}

impl Notice {
    fn new(
        level: NoticeLevel,
        title: impl Into<String>,
        description: impl Into<String>,
        room_id: &str,
        device_id: &str,
    ) -> Self {
        Self {
            id: NoticeId::new(),
            level,
            title: title.into(),
            description: description.into(),
            room_id: room_id.to_string(),
            device_id: device_id.to_string(),
            timestamp: now(),
        }
    }

    /// Describe a successfully applied transition.
    #[must_use]
    pub fn applied(transition: &Transition) -> Self {
        let device = &transition.device;
        let name = &device.name;
        let (title, description) = match transition.operation {
            Operation::ToggleDevice => {
                let word = on_off(device.status);
                (
                    format!("Device turned {word}"),
                    format!("{name} is now {word}."),
                )
            }
            Operation::ToggleControlMode => match device.control_mode {
                ControlMode::Auto => (
                    "Automatic mode enabled".to_string(),
                    format!("{name} is now controlled automatically."),
                ),
                ControlMode::Manual => {
                    let mut description = format!("{name} is now controlled manually.");
                    if transition.from == crate::device::DeviceState::AutoScheduledActive {
                        description.push_str(" Its schedule was removed.");
                    }
                    ("Manual mode enabled".to_string(), description)
                }
            },
            Operation::SetSchedule => {
                let description = device.scheduled_time.as_ref().map_or_else(
                    || format!("{name} has a new schedule."),
                    |schedule| {
                        let mut text = format!(
                            "{name} will run daily from {} to {}",
                            format_hhmm(schedule.start_time),
                            format_hhmm(schedule.window_end())
                        );
                        if let Some(minutes) = schedule.duration_minutes {
                            text.push_str(&format!(" ({minutes} minutes)"));
                        }
                        text.push_str(if schedule.repeat {
                            ", repeating every day."
                        } else {
                            "."
                        });
                        text
                    },
                );
                ("Schedule saved".to_string(), description)
            }
            Operation::ClearSchedule => (
                "Schedule removed".to_string(),
                format!("{name} no longer runs on a schedule."),
            ),
            Operation::SetTemperatureThresholds => {
                let word = on_off(device.status);
                let rule = match (device.kind, device.temperature_thresholds) {
                    (DeviceKind::Heating, Some(t)) => t
                        .min
                        .map(|min| format!("{name} heats below {min}°C")),
                    (DeviceKind::Cooling, Some(t)) => t
                        .max
                        .map(|max| format!("{name} cools above {max}°C")),
                    _ => None,
                };
                let description = match rule {
                    Some(rule) => format!("{rule} and is now {word}."),
                    None => format!("{name} is now {word}."),
                };
                ("Thresholds updated".to_string(), description)
            }
        };
        Self::new(
            NoticeLevel::Info,
            title,
            description,
            transition.room_id.as_str(),
            device.id.as_str(),
        )
    }

    /// Describe a rejected operation.
    ///
    /// `device_name` is `None` when the address itself did not resolve.
    #[must_use]
    pub fn rejected(
        room_id: &str,
        device_id: &str,
        device_name: Option<&str>,
        error: &HomeDashError,
    ) -> Self {
        let name = device_name.unwrap_or(device_id);
        match error {
            HomeDashError::ControlMode(ControlModeError {
                operation,
                required,
                ..
            }) => {
                let (title, description) = match (required, operation) {
                    (ControlMode::Manual, _) => (
                        "Automatic mode active",
                        format!("Switch {name} to manual mode first to control it directly."),
                    ),
                    (ControlMode::Auto, Operation::SetTemperatureThresholds) => (
                        "Manual mode active",
                        format!(
                            "Switch {name} to automatic mode first to set temperature thresholds."
                        ),
                    ),
                    (ControlMode::Auto, _) => (
                        "Manual mode active",
                        format!("Switch {name} to automatic mode first to change its schedule."),
                    ),
                };
                Self::new(NoticeLevel::Warning, title, description, room_id, device_id)
            }
            HomeDashError::NotFound(err) => Self::new(
                NoticeLevel::Error,
                "Device not found",
                err.to_string(),
                room_id,
                device_id,
            ),
            HomeDashError::Validation(err) => Self::new(
                NoticeLevel::Error,
                "Invalid request",
                format!("{name}: {err}."),
                room_id,
                device_id,
            ),
        }
    }
}

fn on_off(status: bool) -> &'static str {
    if status { "on" } else { "off" }
}
