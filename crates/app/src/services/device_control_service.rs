//! Device control service: the four device operations and read-only queries.

use std::sync::{Mutex, MutexGuard, PoisonError};

use homedash_domain::device::{Device, Schedule, TemperatureThresholds};
use homedash_domain::error::{HomeDashError, NotFoundError, ValidationError};
use homedash_domain::id::{DeviceId, RoomId};
use homedash_domain::notice::Notice;
use homedash_domain::operation::{Command, Operation};
use homedash_domain::room::Room;
use homedash_domain::store::{DeviceStore, Summary, Transition, resolve_address};

use crate::ports::NoticePublisher;

/// Application service owning the device store.
///
/// Every mutation holds the store lock for the whole apply step, so
/// operations never interleave. The lock is released before the resulting
/// notice is published.
pub struct DeviceControlService<P> {
    store: Mutex<DeviceStore>,
    publisher: P,
}

impl<P: NoticePublisher> DeviceControlService<P> {
    /// Create a new service around a seeded store.
    pub fn new(store: DeviceStore, publisher: P) -> Self {
        Self {
            store: Mutex::new(store),
            publisher,
        }
    }

    /// Apply one command and publish the resulting notice.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged; a rejection notice has already
    /// been published by the time the caller sees it.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        device_id: &DeviceId,
        command: Command,
    ) -> Result<Transition, HomeDashError> {
        self.submit(
            room_id.as_str(),
            device_id.as_str(),
            command.operation(),
            Ok(command),
        )
        .await
    }

    /// Apply `operation` to a device addressed by raw path segments.
    ///
    /// `payload` carries the decoded command, or the reason decoding failed.
    /// The address, then the device kind, then the control mode are checked
    /// before a payload error is reported. Every outcome publishes exactly one
    /// notice, including a malformed address.
    ///
    /// # Errors
    ///
    /// - [`HomeDashError::NotFound`] when the address is malformed or unknown
    /// - [`HomeDashError::Validation`] when the kind does not support
    ///   `operation` or the payload is invalid
    /// - [`HomeDashError::ControlMode`] when the device is in the wrong mode
    #[tracing::instrument(skip(self, payload))]
    pub async fn submit(
        &self,
        room: &str,
        device: &str,
        operation: Operation,
        payload: Result<Command, ValidationError>,
    ) -> Result<Transition, HomeDashError> {
        let (result, notice) = match resolve_address(room, device) {
            Ok((room_id, device_id)) => {
                let mut store = self.lock_store();
                match store.submit(&room_id, &device_id, operation, payload) {
                    Ok(transition) => {
                        let notice = Notice::applied(&transition);
                        (Ok(transition), notice)
                    }
                    Err(err) => {
                        let name = store
                            .device(&room_id, &device_id)
                            .ok()
                            .map(|d| d.name.clone());
                        let notice = Notice::rejected(room, device, name.as_deref(), &err);
                        (Err(err), notice)
                    }
                }
            }
            Err(err) => {
                let err = HomeDashError::from(err);
                let notice = Notice::rejected(room, device, None, &err);
                (Err(err), notice)
            }
        };

        match &result {
            Ok(t) => tracing::info!(from = %t.from, to = %t.to, "device transition applied"),
            Err(HomeDashError::ControlMode(err)) => {
                tracing::warn!(error = %err, "operation rejected by control mode");
            }
            Err(err) => tracing::warn!(error = %err, "operation rejected"),
        }

        self.publisher.publish(notice).await;
        result
    }

    /// Flip manual/auto; leaving auto clears the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] for an unknown address.
    pub async fn toggle_control_mode(
        &self,
        room_id: &RoomId,
        device_id: &DeviceId,
    ) -> Result<Device, HomeDashError> {
        self.execute(room_id, device_id, Command::ToggleControlMode)
            .await
            .map(|t| t.device)
    }

    /// Switch a manual device on or off.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::ControlMode`] when the device is in auto mode,
    /// or [`HomeDashError::NotFound`] for an unknown address.
    pub async fn toggle_device(
        &self,
        room_id: &RoomId,
        device_id: &DeviceId,
    ) -> Result<Device, HomeDashError> {
        self.execute(room_id, device_id, Command::ToggleDevice)
            .await
            .map(|t| t.device)
    }

    /// Schedule an automatic blinds, irrigation, or lighting device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::ControlMode`] in manual mode,
    /// [`HomeDashError::Validation`] for thermal devices or a bad schedule,
    /// or [`HomeDashError::NotFound`] for an unknown address.
    pub async fn set_schedule(
        &self,
        room_id: &RoomId,
        device_id: &DeviceId,
        schedule: Schedule,
    ) -> Result<Device, HomeDashError> {
        self.execute(room_id, device_id, Command::SetSchedule { schedule })
            .await
            .map(|t| t.device)
    }

    /// Remove the schedule of an automatic device.
    ///
    /// # Errors
    ///
    /// Same as [`set_schedule`](Self::set_schedule).
    pub async fn clear_schedule(
        &self,
        room_id: &RoomId,
        device_id: &DeviceId,
    ) -> Result<Device, HomeDashError> {
        self.execute(room_id, device_id, Command::ClearSchedule)
            .await
            .map(|t| t.device)
    }

    /// Set thresholds on an automatic heating or cooling device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::ControlMode`] in manual mode,
    /// [`HomeDashError::Validation`] for non-thermal devices, a missing bound,
    /// or an unreadable temperature, or [`HomeDashError::NotFound`].
    pub async fn set_temperature_thresholds(
        &self,
        room_id: &RoomId,
        device_id: &DeviceId,
        thresholds: TemperatureThresholds,
    ) -> Result<Device, HomeDashError> {
        self.execute(
            room_id,
            device_id,
            Command::SetTemperatureThresholds { thresholds },
        )
        .await
        .map(|t| t.device)
    }

    /// Snapshot of every room.
    #[must_use]
    pub fn list_rooms(&self) -> Vec<Room> {
        tracing::debug!("listing rooms");
        self.lock_store().rooms().to_vec()
    }

    /// Snapshot of one room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] when no room has this id.
    pub fn get_room(&self, room_id: &RoomId) -> Result<Room, HomeDashError> {
        self.lock_store().room(room_id).cloned()
    }

    /// Snapshot of one device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] when the room or device is missing.
    pub fn get_device(&self, room_id: &RoomId, device_id: &DeviceId) -> Result<Device, HomeDashError> {
        tracing::debug!(%room_id, %device_id, "looking up device");
        self.lock_store().device(room_id, device_id).cloned()
    }

    /// First device with this id in room order, with the id of its room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] when no room holds such a device.
    pub fn find_device(&self, device_id: &DeviceId) -> Result<(RoomId, Device), HomeDashError> {
        tracing::debug!(%device_id, "searching rooms for device");
        self.lock_store()
            .find_device(device_id)
            .map(|(room, device)| (room.id.clone(), device.clone()))
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Device",
                    id: device_id.to_string(),
                }
                .into()
            })
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        self.lock_store().summary()
    }

    fn lock_store(&self) -> MutexGuard<'_, DeviceStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
