//! Room: an ordered group of devices.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::{HomeDashError, ValidationError};
use crate::id::{DeviceId, RoomId};

/// A room and the devices it owns. No device is shared across rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Check domain invariants for the room and every device in it.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] when `name` is empty, a device
    /// id appears twice, or any device fails [`Device::validate`].
    pub fn validate(&self) -> Result<(), HomeDashError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let mut seen = HashSet::new();
        for device in &self.devices {
            if !seen.insert(&device.id) {
                return Err(ValidationError::DuplicateDeviceId {
                    room_id: self.id.to_string(),
                    device_id: device.id.to_string(),
                }
                .into());
            }
            device.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| &d.id == id)
    }

    pub(crate) fn device_mut(&mut self, id: &DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| &d.id == id)
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    devices: Vec<Device>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// Without an explicit id, one is derived from the name
    /// (`"Living Room"` becomes `living-room`).
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] if `name` is missing, no valid
    /// id can be derived, or [`Room::validate`] fails.
    pub fn build(self) -> Result<Room, HomeDashError> {
        let name = self.name.unwrap_or_default();
        let id = match self.id {
            Some(id) => id,
            None => RoomId::new(slugify(&name))?,
        };
        let room = Room {
            id,
            name,
            devices: self.devices,
        };
        room.validate()?;
        Ok(room)
    }
}

fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
