//! Device store: the single owner of all rooms and devices.
//!
//! The store is created once from seed data and then mutated only through
//! [`DeviceStore::apply`] (or the per-operation shorthands). Each call either
//! applies one [`Command`] to one device and returns a [`Transition`], or
//! fails and leaves the store untouched.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::device::{Device, DeviceKind, DeviceState, Schedule, TemperatureThresholds};
use crate::error::{HomeDashError, NotFoundError, ValidationError};
use crate::id::{DeviceId, RoomId};
use crate::operation::{Command, Operation};
use crate::room::Room;

/// Record of one applied operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub room_id: RoomId,
    pub device_id: DeviceId,
    pub operation: Operation,
    pub from: DeviceState,
    pub to: DeviceState,
    /// Snapshot of the device after the operation.
    pub device: Device,
}

/// Aggregate counts for the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub rooms: usize,
    pub devices: usize,
    pub devices_on: usize,
    pub devices_auto: usize,
    pub by_kind: BTreeMap<DeviceKind, usize>,
}

/// In-memory collection of rooms, each owning its devices.
#[derive(Debug, Clone, Default)]
pub struct DeviceStore {
    rooms: Vec<Room>,
}

impl DeviceStore {
    /// Build a store from seed rooms.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] if two rooms share an id or any
    /// room fails [`Room::validate`].
    pub fn new(rooms: Vec<Room>) -> Result<Self, HomeDashError> {
        let mut seen = HashSet::new();
        for room in &rooms {
            if !seen.insert(&room.id) {
                return Err(ValidationError::DuplicateRoomId {
                    room_id: room.id.to_string(),
                }
                .into());
            }
            room.validate()?;
        }
        Ok(Self { rooms })
    }

    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Look up a room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] when no room has this id.
    pub fn room(&self, room_id: &RoomId) -> Result<&Room, HomeDashError> {
        self.rooms
            .iter()
            .find(|r| &r.id == room_id)
            .ok_or_else(|| room_not_found(room_id))
    }

    /// Look up a device by its room-qualified address.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] when the room or the device is missing.
    pub fn device(&self, room_id: &RoomId, device_id: &DeviceId) -> Result<&Device, HomeDashError> {
        self.room(room_id)?
            .device(device_id)
            .ok_or_else(|| device_not_found(room_id, device_id))
    }

    /// First device with this id in room order, with its room.
    #[must_use]
    pub fn find_device(&self, device_id: &DeviceId) -> Option<(&Room, &Device)> {
        self.rooms
            .iter()
            .find_map(|room| room.device(device_id).map(|device| (room, device)))
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            rooms: self.rooms.len(),
            ..Summary::default()
        };
        for device in self.rooms.iter().flat_map(|r| &r.devices) {
            summary.devices += 1;
            if device.status {
                summary.devices_on += 1;
            }
            if device.state().is_auto() {
                summary.devices_auto += 1;
            }
            *summary.by_kind.entry(device.kind).or_default() += 1;
        }
        summary
    }

    /// Apply `command` to one device.
    ///
    /// The device is mutated on a scratch copy and written back only when the
    /// command succeeds.
    ///
    /// # Errors
    ///
    /// - [`HomeDashError::NotFound`] for an unknown room or device
    /// - [`HomeDashError::ControlMode`] when the device is in the wrong mode
    /// - [`HomeDashError::Validation`] when the command does not fit the
    ///   device kind or its payload is invalid
    pub fn apply(
        &mut self,
        room_id: &RoomId,
        device_id: &DeviceId,
        command: Command,
    ) -> Result<Transition, HomeDashError> {
        self.submit(room_id, device_id, command.operation(), Ok(command))
    }

    /// Apply an operation whose payload was decoded by the caller.
    ///
    /// Checks run in a fixed order: address, kind, mode, then payload. A
    /// payload that failed to decode is reported only once the device has
    /// been found and accepts `operation` in its current mode.
    ///
    /// # Errors
    ///
    /// Same as [`DeviceStore::apply`], plus the payload's own
    /// [`ValidationError`] when every earlier check passes.
    pub fn submit(
        &mut self,
        room_id: &RoomId,
        device_id: &DeviceId,
        operation: Operation,
        payload: Result<Command, ValidationError>,
    ) -> Result<Transition, HomeDashError> {
        let slot = self
            .rooms
            .iter_mut()
            .find(|r| &r.id == room_id)
            .ok_or_else(|| room_not_found(room_id))?
            .device_mut(device_id)
            .ok_or_else(|| device_not_found(room_id, device_id))?;
        slot.check(operation)?;
        let command = payload?;

        let from = slot.state();
        let mut next = slot.clone();
        next.apply(command)?;
        *slot = next;

        Ok(Transition {
            room_id: room_id.clone(),
            device_id: device_id.clone(),
            operation,
            from,
            to: slot.state(),
            device: slot.clone(),
        })
    }

    /// Flip manual/auto. Leaving auto clears the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] for an unknown address.
    pub fn toggle_control_mode(
        &mut self,
        room_id: &RoomId,
        device_id: &DeviceId,
    ) -> Result<Transition, HomeDashError> {
        self.apply(room_id, device_id, Command::ToggleControlMode)
    }

    /// Switch a manual device on or off.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::apply`].
    pub fn toggle_device(
        &mut self,
        room_id: &RoomId,
        device_id: &DeviceId,
    ) -> Result<Transition, HomeDashError> {
        self.apply(room_id, device_id, Command::ToggleDevice)
    }

    /// Schedule an automatic blinds, irrigation, or lighting device.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::apply`].
    pub fn set_schedule(
        &mut self,
        room_id: &RoomId,
        device_id: &DeviceId,
        schedule: Schedule,
    ) -> Result<Transition, HomeDashError> {
        self.apply(room_id, device_id, Command::SetSchedule { schedule })
    }

    /// Remove the schedule of an automatic device.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::apply`].
    pub fn clear_schedule(
        &mut self,
        room_id: &RoomId,
        device_id: &DeviceId,
    ) -> Result<Transition, HomeDashError> {
        self.apply(room_id, device_id, Command::ClearSchedule)
    }

    /// Set the thresholds of an automatic heating or cooling device.
    ///
    /// # Errors
    ///
    /// See [`DeviceStore::apply`].
    pub fn set_temperature_thresholds(
        &mut self,
        room_id: &RoomId,
        device_id: &DeviceId,
        thresholds: TemperatureThresholds,
    ) -> Result<Transition, HomeDashError> {
        self.apply(
            room_id,
            device_id,
            Command::SetTemperatureThresholds { thresholds },
        )
    }
}

/// Parse a raw room id from a request path.
///
/// # Errors
///
/// A string that is not a valid slug names no room, so it is reported as
/// [`NotFoundError`].
pub fn resolve_room(room: &str) -> Result<RoomId, NotFoundError> {
    RoomId::new(room).map_err(|_| NotFoundError {
        entity: "Room",
        id: room.to_string(),
    })
}

/// Parse a raw `room/device` address from a request path.
///
/// # Errors
///
/// Returns [`NotFoundError`] when either part is not a valid slug.
pub fn resolve_address(room: &str, device: &str) -> Result<(RoomId, DeviceId), NotFoundError> {
    let room_id = resolve_room(room)?;
    let device_id = DeviceId::new(device).map_err(|_| NotFoundError {
        entity: "Device",
        id: format!("{room}/{device}"),
    })?;
    Ok((room_id, device_id))
}

fn room_not_found(room_id: &RoomId) -> HomeDashError {
    NotFoundError {
        entity: "Room",
        id: room_id.to_string(),
    }
    .into()
}

fn device_not_found(room_id: &RoomId, device_id: &DeviceId) -> HomeDashError {
    NotFoundError {
        entity: "Device",
        id: format!("{room_id}/{device_id}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ControlMode;
    use crate::error::ControlModeError;

    fn room_id(s: &str) -> RoomId {
        RoomId::new(s).unwrap()
    }

    fn device_id(s: &str) -> DeviceId {
        DeviceId::new(s).unwrap()
    }

    fn device(id: &str, kind: DeviceKind, mode: ControlMode, status: bool) -> Device {
        Device::builder()
            .id(device_id(id))
            .name(id.replace('-', " "))
            .kind(kind)
            .control_mode(mode)
            .status(status)
            .build()
            .unwrap()
    }

    fn store() -> DeviceStore {
        let living = Room::builder()
            .id(room_id("living-room"))
            .name("Living Room")
            .device(
                Device::builder()
                    .id(device_id("heating-1"))
                    .name("Radiator")
                    .kind(DeviceKind::Heating)
                    .control_mode(ControlMode::Auto)
                    .temperature("18°C")
                    .build()
                    .unwrap(),
            )
            .device(device("blinds-1", DeviceKind::Blinds, ControlMode::Manual, true))
            .build()
            .unwrap();
        let kitchen = Room::builder()
            .id(room_id("kitchen"))
            .name("Kitchen")
            .device(
                Device::builder()
                    .id(device_id("cooling-1"))
                    .name("Air Conditioner")
                    .kind(DeviceKind::Cooling)
                    .temperature("26°C")
                    .build()
                    .unwrap(),
            )
            .device(device("blinds-1", DeviceKind::Blinds, ControlMode::Auto, false))
            .build()
            .unwrap();
        let garden = Room::builder()
            .id(room_id("garden"))
            .name("Garden")
            .device(device(
                "irrigation-1",
                DeviceKind::Irrigation,
                ControlMode::Auto,
                false,
            ))
            .build()
            .unwrap();
        DeviceStore::new(vec![living, kitchen, garden]).unwrap()
    }

    fn snapshot(store: &DeviceStore, room: &str, dev: &str) -> Device {
        store
            .device(&room_id(room), &device_id(dev))
            .unwrap()
            .clone()
    }

    #[test]
    fn should_reject_duplicate_room_ids() {
        let a = Room::builder().name("Hall").build().unwrap();
        let b = Room::builder().name("Hall").build().unwrap();
        assert!(matches!(
            DeviceStore::new(vec![a, b]),
            Err(HomeDashError::Validation(
                ValidationError::DuplicateRoomId { .. }
            ))
        ));
    }

    #[test]
    fn should_activate_heating_when_reading_below_min() {
        let mut store = store();
        let t = store
            .set_temperature_thresholds(
                &room_id("living-room"),
                &device_id("heating-1"),
                TemperatureThresholds::heating(20.0),
            )
            .unwrap();
        assert!(t.device.status);
        assert_eq!(t.from, DeviceState::AutoUnscheduled);
        assert_eq!(t.to, DeviceState::AutoThresholdActive);
        assert!(snapshot(&store, "living-room", "heating-1").status);
    }

    #[test]
    fn should_reject_thresholds_on_manual_cooling_without_changes() {
        let mut store = store();
        let before = snapshot(&store, "kitchen", "cooling-1");

        let err = store
            .set_temperature_thresholds(
                &room_id("kitchen"),
                &device_id("cooling-1"),
                TemperatureThresholds::cooling(24.0),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            HomeDashError::ControlMode(ControlModeError {
                required: ControlMode::Auto,
                ..
            })
        ));
        assert_eq!(snapshot(&store, "kitchen", "cooling-1"), before);
    }

    #[test]
    fn should_activate_cooling_above_max_once_in_auto() {
        let mut store = store();
        let (room, dev) = (room_id("kitchen"), device_id("cooling-1"));
        store.toggle_control_mode(&room, &dev).unwrap();
        let t = store
            .set_temperature_thresholds(&room, &dev, TemperatureThresholds::cooling(24.0))
            .unwrap();
        assert!(t.device.status);
        assert_eq!(t.device.temperature_thresholds.and_then(|t| t.max), Some(24.0));
    }

    #[test]
    fn should_schedule_irrigation_and_switch_it_on() {
        let mut store = store();
        let schedule = Schedule::daily("06:00", "06:30")
            .unwrap()
            .with_duration_minutes(30);
        let t = store
            .set_schedule(&room_id("garden"), &device_id("irrigation-1"), schedule.clone())
            .unwrap();
        assert!(t.device.status);
        assert_eq!(t.device.scheduled_time, Some(schedule));
        assert_eq!(t.to, DeviceState::AutoScheduledActive);
    }

    #[test]
    fn should_switch_manual_blinds_off() {
        let mut store = store();
        let t = store
            .toggle_device(&room_id("living-room"), &device_id("blinds-1"))
            .unwrap();
        assert!(!t.device.status);
        assert!(t.device.scheduled_time.is_none());
        assert_eq!(t.from, DeviceState::ManualOn);
        assert_eq!(t.to, DeviceState::ManualOff);
    }

    #[test]
    fn should_address_same_device_id_per_room() {
        let mut store = store();
        store
            .toggle_device(&room_id("living-room"), &device_id("blinds-1"))
            .unwrap();
        assert!(!snapshot(&store, "living-room", "blinds-1").status);
        assert!(!snapshot(&store, "kitchen", "blinds-1").status);
        assert_eq!(
            snapshot(&store, "kitchen", "blinds-1").control_mode,
            ControlMode::Auto
        );
    }

    #[test]
    fn should_reject_toggle_for_every_auto_device() {
        let mut store = store();
        let auto: Vec<(RoomId, DeviceId)> = store
            .rooms()
            .iter()
            .flat_map(|r| {
                r.devices
                    .iter()
                    .filter(|d| d.control_mode == ControlMode::Auto)
                    .map(|d| (r.id.clone(), d.id.clone()))
            })
            .collect();
        assert!(!auto.is_empty());

        for (room, dev) in auto {
            let before = store.device(&room, &dev).unwrap().clone();
            let err = store.toggle_device(&room, &dev).unwrap_err();
            assert!(matches!(err, HomeDashError::ControlMode(_)));
            assert_eq!(store.device(&room, &dev).unwrap(), &before);
        }
    }

    #[test]
    fn should_restore_mode_and_keep_schedule_cleared_after_double_toggle() {
        let mut store = store();
        let (room, dev) = (room_id("garden"), device_id("irrigation-1"));
        store
            .set_schedule(&room, &dev, Schedule::daily("06:00", "06:30").unwrap())
            .unwrap();

        let first = store.toggle_control_mode(&room, &dev).unwrap();
        assert_eq!(first.device.control_mode, ControlMode::Manual);
        assert!(first.device.scheduled_time.is_none());

        let second = store.toggle_control_mode(&room, &dev).unwrap();
        assert_eq!(second.device.control_mode, ControlMode::Auto);
        assert!(second.device.scheduled_time.is_none());
    }

    #[test]
    fn should_report_not_found_for_unknown_room_or_device() {
        let mut store = store();
        assert!(matches!(
            store.toggle_device(&room_id("attic"), &device_id("blinds-1")),
            Err(HomeDashError::NotFound(NotFoundError { entity: "Room", .. }))
        ));
        assert!(matches!(
            store.toggle_device(&room_id("garden"), &device_id("blinds-1")),
            Err(HomeDashError::NotFound(NotFoundError {
                entity: "Device",
                ..
            }))
        ));
    }

    #[test]
    fn should_clear_schedule_in_auto_mode() {
        let mut store = store();
        let (room, dev) = (room_id("garden"), device_id("irrigation-1"));
        store
            .set_schedule(&room, &dev, Schedule::daily("06:00", "06:30").unwrap())
            .unwrap();
        let t = store.clear_schedule(&room, &dev).unwrap();
        assert!(t.device.scheduled_time.is_none());
        assert_eq!(t.to, DeviceState::AutoUnscheduled);
    }

    #[test]
    fn should_find_first_device_across_rooms() {
        let store = store();
        let (room, device) = store.find_device(&device_id("blinds-1")).unwrap();
        assert_eq!(room.id.as_str(), "living-room");
        assert_eq!(device.control_mode, ControlMode::Manual);
        assert!(store.find_device(&device_id("nope")).is_none());
    }

    fn bad_payload() -> Result<Command, ValidationError> {
        Err(ValidationError::InvalidPayload {
            reason: "missing field `start_time`".to_string(),
        })
    }

    #[test]
    fn should_report_mode_before_payload_when_submitting() {
        let mut store = store();
        let err = store
            .submit(
                &room_id("living-room"),
                &device_id("blinds-1"),
                Operation::SetSchedule,
                bad_payload(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            HomeDashError::ControlMode(ControlModeError {
                required: ControlMode::Auto,
                ..
            })
        ));
    }

    #[test]
    fn should_report_address_and_kind_before_payload_when_submitting() {
        let mut store = store();
        assert!(matches!(
            store.submit(
                &room_id("garden"),
                &device_id("nope"),
                Operation::SetSchedule,
                bad_payload(),
            ),
            Err(HomeDashError::NotFound(_))
        ));
        assert!(matches!(
            store.submit(
                &room_id("living-room"),
                &device_id("heating-1"),
                Operation::SetSchedule,
                bad_payload(),
            ),
            Err(HomeDashError::Validation(
                ValidationError::UnsupportedOperation { .. }
            ))
        ));
    }

    #[test]
    fn should_report_payload_error_once_preconditions_hold() {
        let mut store = store();
        let before = snapshot(&store, "garden", "irrigation-1");
        let err = store
            .submit(
                &room_id("garden"),
                &device_id("irrigation-1"),
                Operation::SetSchedule,
                bad_payload(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            HomeDashError::Validation(ValidationError::InvalidPayload { .. })
        ));
        assert_eq!(snapshot(&store, "garden", "irrigation-1"), before);
    }

    #[test]
    fn should_resolve_malformed_addresses_as_not_found() {
        assert_eq!(resolve_room("Living Room").unwrap_err().entity, "Room");
        let err = resolve_address("garden", "Pump 9").unwrap_err();
        assert_eq!(err.entity, "Device");
        assert_eq!(err.id, "garden/Pump 9");
        assert!(resolve_address("garden", "irrigation-1").is_ok());
    }

    #[test]
    fn should_summarize_devices() {
        let summary = store().summary();
        assert_eq!(summary.rooms, 3);
        assert_eq!(summary.devices, 5);
        assert_eq!(summary.devices_on, 1);
        assert_eq!(summary.devices_auto, 3);
        assert_eq!(summary.by_kind.get(&DeviceKind::Blinds), Some(&2));
    }
}
