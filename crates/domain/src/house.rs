//! House — the owning object graph: floors, rooms, devices.
//!
//! Ownership is strictly forward: the house owns floors, floors own rooms,
//! rooms own devices. Back-references (room→floor, device→room) are plain
//! identifiers used for navigation and relocation bookkeeping, never a
//! second owning pointer.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::{IntegrityError, NotFoundError, SmartHouseError, ValidationError};
use crate::id::DeviceId;
use crate::normalize;

/// A floor of the house, identified by its level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub level: i64,
    rooms: Vec<Room>,
}

impl Floor {
    fn new(level: i64) -> Self {
        Self {
            level,
            rooms: Vec::new(),
        }
    }

    /// Rooms on this floor, in registration order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Derived attribute: sum of the owned room areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.rooms.iter().map(|room| room.area).sum()
    }
}

/// A room on a floor, owning the devices mounted in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub area: f64,
    /// Level of the owning floor (non-owning back-reference).
    floor_level: i64,
    devices: Vec<Device>,
}

impl Room {
    #[must_use]
    pub fn floor_level(&self) -> i64 {
        self.floor_level
    }

    /// Devices registered in this room, in registration order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }
}

/// Root of the object graph and entry point for layout mutations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct House {
    floors: Vec<Floor>,
}

impl House {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new floor at the given level.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateFloorLevel`] when the level is
    /// already taken.
    pub fn register_floor(&mut self, level: i64) -> Result<(), SmartHouseError> {
        if self.floor(level).is_some() {
            return Err(ValidationError::DuplicateFloorLevel(level).into());
        }
        self.floors.push(Floor::new(level));
        Ok(())
    }

    /// Register a room of `area` square meters on an existing floor.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError`] when no floor at `floor_level` exists, and
    /// [`ValidationError`] for an empty name, a duplicate name (compared
    /// trimmed and case-folded), or a non-positive area.
    pub fn register_room(
        &mut self,
        floor_level: i64,
        name: impl Into<String>,
        area: f64,
    ) -> Result<(), SmartHouseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if area <= 0.0 {
            return Err(ValidationError::NonPositiveArea(area).into());
        }
        if self.find_room(&name).is_some() {
            return Err(ValidationError::DuplicateRoomName(name).into());
        }
        let Some(floor) = self.floors.iter_mut().find(|f| f.level == floor_level) else {
            return Err(IntegrityError {
                subject: "room",
                target: "floor",
                reference: floor_level.to_string(),
            }
            .into());
        };
        floor.rooms.push(Room {
            name,
            area,
            floor_level,
            devices: Vec::new(),
        });
        Ok(())
    }

    /// Register a device in the named room. The room is matched with the
    /// trimmed, case-folded comparison used everywhere for room names.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError`] when no room matches `room_name`, and
    /// [`ValidationError::DuplicateDeviceId`] when the id is already taken.
    pub fn register_device(
        &mut self,
        room_name: &str,
        mut device: Device,
    ) -> Result<(), SmartHouseError> {
        if self.get_device_by_id(&device.id).is_some() {
            return Err(ValidationError::DuplicateDeviceId(device.id.to_string()).into());
        }
        let Some(room) = self.find_room_mut(room_name) else {
            return Err(IntegrityError {
                subject: "device",
                target: "room",
                reference: room_name.to_string(),
            }
            .into());
        };
        device.room = room.name.clone();
        room.devices.push(device);
        Ok(())
    }

    /// Move a device to another room, removing it from its current room's
    /// collection first; a device is never duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the device is unknown, and
    /// [`IntegrityError`] when the target room does not exist (the device
    /// stays where it was).
    pub fn relocate_device(
        &mut self,
        id: &DeviceId,
        room_name: &str,
    ) -> Result<(), SmartHouseError> {
        if self.find_room(room_name).is_none() {
            return Err(IntegrityError {
                subject: "device",
                target: "room",
                reference: room_name.to_string(),
            }
            .into());
        }
        let device = self.take_device(id).ok_or_else(|| NotFoundError {
            entity: "Device",
            id: id.to_string(),
        })?;
        self.register_device(room_name, device)
    }

    fn take_device(&mut self, id: &DeviceId) -> Option<Device> {
        for floor in &mut self.floors {
            for room in &mut floor.rooms {
                if let Some(position) = room.devices.iter().position(|d| &d.id == id) {
                    return Some(room.devices.remove(position));
                }
            }
        }
        None
    }

    /// Look up a floor by level.
    #[must_use]
    pub fn floor(&self, level: i64) -> Option<&Floor> {
        self.floors.iter().find(|floor| floor.level == level)
    }

    /// Floors sorted ascending by level, regardless of registration order.
    #[must_use]
    pub fn get_floors(&self) -> Vec<&Floor> {
        let mut floors: Vec<&Floor> = self.floors.iter().collect();
        floors.sort_by_key(|floor| floor.level);
        floors
    }

    /// All registered rooms, in no particular order.
    #[must_use]
    pub fn get_rooms(&self) -> Vec<&Room> {
        self.floors
            .iter()
            .flat_map(|floor| floor.rooms.iter())
            .collect()
    }

    /// All registered devices.
    #[must_use]
    pub fn get_devices(&self) -> Vec<&Device> {
        self.floors
            .iter()
            .flat_map(|floor| floor.rooms.iter())
            .flat_map(|room| room.devices.iter())
            .collect()
    }

    /// Look up a device by its id.
    #[must_use]
    pub fn get_device_by_id(&self, id: &DeviceId) -> Option<&Device> {
        self.floors
            .iter()
            .flat_map(|floor| floor.rooms.iter())
            .flat_map(|room| room.devices.iter())
            .find(|device| &device.id == id)
    }

    /// Mutable device lookup, used when applying measurement and state rows.
    pub fn device_mut(&mut self, id: &DeviceId) -> Option<&mut Device> {
        self.floors
            .iter_mut()
            .flat_map(|floor| floor.rooms.iter_mut())
            .flat_map(|room| room.devices.iter_mut())
            .find(|device| &device.id == id)
    }

    /// Total area of the house: the sum of every room's area.
    #[must_use]
    pub fn get_area(&self) -> f64 {
        self.floors.iter().map(Floor::area).sum()
    }

    /// Find a room by name, tolerating case and padding differences.
    #[must_use]
    pub fn find_room(&self, name: &str) -> Option<&Room> {
        let key = normalize::name_key(name);
        self.floors
            .iter()
            .flat_map(|floor| floor.rooms.iter())
            .find(|room| normalize::name_key(&room.name) == key)
    }

    fn find_room_mut(&mut self, name: &str) -> Option<&mut Room> {
        let key = normalize::name_key(name);
        self.floors
            .iter_mut()
            .flat_map(|floor| floor.rooms.iter_mut())
            .find(|room| normalize::name_key(&room.name) == key)
    }
}
