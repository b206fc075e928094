//! Device: a controllable unit (heating, cooling, blinds, irrigation,
//! lighting) owned by exactly one room.
//!
//! The transition methods here are the device control state machine. They
//! are crate-private: callers go through [`DeviceStore`](crate::store::DeviceStore).
//! Every transition checks all of its preconditions before touching any
//! field, so a rejected call leaves the device exactly as it was.

mod control_mode;
mod kind;
mod schedule;
mod state;
mod thresholds;

pub use control_mode::ControlMode;
pub use kind::DeviceKind;
pub use schedule::{Schedule, ScheduleType};
pub use state::DeviceState;
pub use thresholds::{TemperatureThresholds, parse_reading};

use serde::{Deserialize, Serialize};

use crate::error::{ControlModeError, HomeDashError, ValidationError};
use crate::id::DeviceId;
use crate::operation::{Command, Operation};

/// A single controllable device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub control_mode: ControlMode,
    /// Last sensor reading with unit suffix, e.g. `"21°C"`. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_thresholds: Option<TemperatureThresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<Schedule>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - a manual device carries a schedule ([`ValidationError::ScheduleInManualMode`])
    /// - a thermal device carries a schedule ([`ValidationError::ScheduleOnThermalDevice`])
    /// - a schedulable device carries thresholds ([`ValidationError::ThresholdsOnSchedulableDevice`])
    /// - the schedule or thresholds are invalid for this kind
    /// - an automatic heating or cooling device has a `status` its thresholds
    ///   would not produce ([`ValidationError::ThresholdStatusMismatch`])
    pub fn validate(&self) -> Result<(), HomeDashError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if let Some(schedule) = &self.scheduled_time {
            if self.kind.is_thermal() {
                return Err(ValidationError::ScheduleOnThermalDevice {
                    kind: self.kind,
                    device_id: self.id.to_string(),
                }
                .into());
            }
            if self.control_mode == ControlMode::Manual {
                return Err(ValidationError::ScheduleInManualMode {
                    device_id: self.id.to_string(),
                }
                .into());
            }
            schedule.validate_for(self.kind)?;
        }
        if let Some(thresholds) = &self.temperature_thresholds {
            if self.kind.is_schedulable() {
                return Err(ValidationError::ThresholdsOnSchedulableDevice {
                    kind: self.kind,
                    device_id: self.id.to_string(),
                }
                .into());
            }
            thresholds.validate_for(self.kind)?;
            if self.control_mode == ControlMode::Auto {
                let expected = thresholds.should_activate(self.kind, self.current_temperature()?);
                if self.status != expected {
                    return Err(ValidationError::ThresholdStatusMismatch {
                        device_id: self.id.to_string(),
                        expected: on_off(expected),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Which state-machine node this device is currently in.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        match self.control_mode {
            ControlMode::Manual if self.status => DeviceState::ManualOn,
            ControlMode::Manual => DeviceState::ManualOff,
            ControlMode::Auto if self.kind.is_thermal() && self.temperature_thresholds.is_some() => {
                if self.status {
                    DeviceState::AutoThresholdActive
                } else {
                    DeviceState::AutoThresholdInactive
                }
            }
            ControlMode::Auto if self.scheduled_time.is_some() => DeviceState::AutoScheduledActive,
            ControlMode::Auto => DeviceState::AutoUnscheduled,
        }
    }

    /// Current reading in °C; a device without a sensor reads `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTemperature`] when the reading has
    /// no numeric part.
    pub fn current_temperature(&self) -> Result<f64, ValidationError> {
        parse_reading(self.temperature.as_deref())
    }

    /// Apply a command to this device.
    pub(crate) fn apply(&mut self, command: Command) -> Result<(), HomeDashError> {
        match command {
            Command::ToggleDevice => self.toggle(),
            Command::ToggleControlMode => {
                self.toggle_control_mode();
                Ok(())
            }
            Command::SetSchedule { schedule } => self.set_schedule(schedule),
            Command::ClearSchedule => self.clear_schedule(),
            Command::SetTemperatureThresholds { thresholds } => {
                self.set_temperature_thresholds(thresholds)
            }
        }
    }

    /// Flip the control mode. Leaving auto drops the schedule; status and
    /// thresholds are kept.
    pub(crate) fn toggle_control_mode(&mut self) {
        if self.control_mode == ControlMode::Auto {
            self.scheduled_time = None;
        }
        self.control_mode = self.control_mode.toggled();
    }

    /// Flip `status`. Manual mode only.
    pub(crate) fn toggle(&mut self) -> Result<(), HomeDashError> {
        self.check(Operation::ToggleDevice)?;
        self.status = !self.status;
        if !self.status {
            self.scheduled_time = None;
        }
        Ok(())
    }

    /// Install `schedule` and switch the device on.
    pub(crate) fn set_schedule(&mut self, schedule: Schedule) -> Result<(), HomeDashError> {
        self.check(Operation::SetSchedule)?;
        schedule.validate_for(self.kind)?;
        self.scheduled_time = Some(schedule);
        self.status = true;
        Ok(())
    }

    /// Drop the schedule, leaving `status` as is.
    pub(crate) fn clear_schedule(&mut self) -> Result<(), HomeDashError> {
        self.check(Operation::ClearSchedule)?;
        self.scheduled_time = None;
        Ok(())
    }

    /// Store thresholds and evaluate `status` once against the current reading.
    pub(crate) fn set_temperature_thresholds(
        &mut self,
        thresholds: TemperatureThresholds,
    ) -> Result<(), HomeDashError> {
        self.check(Operation::SetTemperatureThresholds)?;
        thresholds.validate_for(self.kind)?;
        let current = self.current_temperature()?;
        self.status = thresholds.should_activate(self.kind, current);
        self.temperature_thresholds = Some(thresholds);
        Ok(())
    }

    /// Check that `operation` fits this device's kind, then its control mode.
    /// The payload, if any, is not looked at.
    pub(crate) fn check(&self, operation: Operation) -> Result<(), HomeDashError> {
        match operation {
            Operation::ToggleControlMode => {}
            Operation::ToggleDevice => self.require_mode(operation, ControlMode::Manual)?,
            Operation::SetSchedule | Operation::ClearSchedule => {
                self.require_schedulable(operation)?;
                self.require_mode(operation, ControlMode::Auto)?;
            }
            Operation::SetTemperatureThresholds => {
                if !self.kind.is_thermal() {
                    return Err(ValidationError::UnsupportedOperation {
                        kind: self.kind,
                        operation,
                    }
                    .into());
                }
                self.require_mode(operation, ControlMode::Auto)?;
            }
        }
        Ok(())
    }

    fn require_mode(
        &self,
        operation: Operation,
        required: ControlMode,
    ) -> Result<(), ControlModeError> {
        if self.control_mode == required {
            Ok(())
        } else {
            Err(ControlModeError {
                operation,
                required,
                actual: self.control_mode,
            })
        }
    }

    fn require_schedulable(&self, operation: Operation) -> Result<(), ValidationError> {
        if self.kind.is_schedulable() {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedOperation {
                kind: self.kind,
                operation,
            })
        }
    }
}

fn on_off(status: bool) -> &'static str {
    if status { "on" } else { "off" }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    kind: Option<DeviceKind>,
    status: bool,
    control_mode: ControlMode,
    temperature: Option<String>,
    temperature_thresholds: Option<TemperatureThresholds>,
    scheduled_time: Option<Schedule>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn control_mode(mut self, control_mode: ControlMode) -> Self {
        self.control_mode = control_mode;
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: impl Into<String>) -> Self {
        self.temperature = Some(temperature.into());
        self
    }

    #[must_use]
    pub fn temperature_thresholds(mut self, thresholds: TemperatureThresholds) -> Self {
        self.temperature_thresholds = Some(thresholds);
        self
    }

    #[must_use]
    pub fn scheduled_time(mut self, schedule: Schedule) -> Self {
        self.scheduled_time = Some(schedule);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// The id defaults to a slug derived from the kind (`heating`, …) and
    /// the kind defaults to lighting.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] if `name` is missing or any
    /// invariant of [`Device::validate`] fails.
    pub fn build(self) -> Result<Device, HomeDashError> {
        let kind = self.kind.unwrap_or(DeviceKind::Lighting);
        let id = match self.id {
            Some(id) => id,
            None => DeviceId::new(kind.to_string())?,
        };
        let device = Device {
            id,
            name: self.name.unwrap_or_default(),
            kind,
            status: self.status,
            control_mode: self.control_mode,
            temperature: self.temperature,
            temperature_thresholds: self.temperature_thresholds,
            scheduled_time: self.scheduled_time,
        };
        device.validate()?;
        Ok(device)
    }
}
