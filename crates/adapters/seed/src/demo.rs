//! Built-in demo house.

use homedash_domain::device::{
    ControlMode, Device, DeviceKind, Schedule, TemperatureThresholds,
};
use homedash_domain::error::HomeDashError;
use homedash_domain::id::{DeviceId, RoomId};
use homedash_domain::room::Room;

/// Four rooms covering every device kind and both control modes.
///
/// # Errors
///
/// Only fails if the hard-coded data breaks a domain invariant.
pub fn demo_rooms() -> Result<Vec<Room>, HomeDashError> {
    Ok(vec![
        Room::builder()
            .id(RoomId::new("living-room")?)
            .name("Living Room")
            .device(
                Device::builder()
                    .id(DeviceId::new("heating-1")?)
                    .name("Living Room Radiator")
                    .kind(DeviceKind::Heating)
                    .control_mode(ControlMode::Auto)
                    .temperature("18°C")
                    .temperature_thresholds(TemperatureThresholds::heating(20.0))
                    .status(true)
                    .build()?,
            )
            .device(
                Device::builder()
                    .id(DeviceId::new("lighting-1")?)
                    .name("Ceiling Light")
                    .kind(DeviceKind::Lighting)
                    .build()?,
            )
            .device(
                Device::builder()
                    .id(DeviceId::new("blinds-1")?)
                    .name("Window Blinds")
                    .kind(DeviceKind::Blinds)
                    .status(true)
                    .build()?,
            )
            .build()?,
        Room::builder()
            .id(RoomId::new("kitchen")?)
            .name("Kitchen")
            .device(
                Device::builder()
                    .id(DeviceId::new("cooling-1")?)
                    .name("Kitchen Air Conditioner")
                    .kind(DeviceKind::Cooling)
                    .temperature("26°C")
                    .build()?,
            )
            .device(
                Device::builder()
                    .id(DeviceId::new("lighting-1")?)
                    .name("Counter Lights")
                    .kind(DeviceKind::Lighting)
                    .status(true)
                    .build()?,
            )
            .build()?,
        Room::builder()
            .id(RoomId::new("bedroom")?)
            .name("Bedroom")
            .device(
                Device::builder()
                    .id(DeviceId::new("heating-1")?)
                    .name("Bedroom Heater")
                    .kind(DeviceKind::Heating)
                    .temperature("21°C")
                    .build()?,
            )
            .device(
                Device::builder()
                    .id(DeviceId::new("blinds-1")?)
                    .name("Bedroom Blinds")
                    .kind(DeviceKind::Blinds)
                    .control_mode(ControlMode::Auto)
                    .status(true)
                    .scheduled_time(Schedule::daily("07:00", "21:30")?.repeating(true))
                    .build()?,
            )
            .build()?,
        Room::builder()
            .id(RoomId::new("garden")?)
            .name("Garden")
            .device(
                Device::builder()
                    .id(DeviceId::new("irrigation-1")?)
                    .name("Lawn Sprinkler")
                    .kind(DeviceKind::Irrigation)
                    .control_mode(ControlMode::Auto)
                    .build()?,
            )
            .device(
                Device::builder()
                    .id(DeviceId::new("lighting-1")?)
                    .name("Path Lights")
                    .kind(DeviceKind::Lighting)
                    .build()?,
            )
            .build()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::device::DeviceState;
    use homedash_domain::store::DeviceStore;

    #[test]
    fn should_cover_every_device_kind() {
        let store = DeviceStore::new(demo_rooms().unwrap()).unwrap();
        let summary = store.summary();
        assert_eq!(summary.rooms, 4);
        assert_eq!(summary.by_kind.len(), 5);
    }

    #[test]
    fn should_include_each_auto_state() {
        let rooms = demo_rooms().unwrap();
        let states: Vec<DeviceState> = rooms
            .iter()
            .flat_map(|r| r.devices.iter().map(Device::state))
            .collect();
        assert!(states.contains(&DeviceState::AutoThresholdActive));
        assert!(states.contains(&DeviceState::AutoScheduledActive));
        assert!(states.contains(&DeviceState::AutoUnscheduled));
        assert!(states.contains(&DeviceState::ManualOff));
        assert!(states.contains(&DeviceState::ManualOn));
    }

    #[test]
    fn should_reuse_device_ids_across_rooms() {
        let rooms = demo_rooms().unwrap();
        let lights = rooms
            .iter()
            .filter(|r| r.device(&DeviceId::new("lighting-1").unwrap()).is_some())
            .count();
        assert_eq!(lights, 3);
    }
}
