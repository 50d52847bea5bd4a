//! In-memory [`HouseStore`] used by the service tests.

use std::future::Future;
use std::sync::{Arc, Mutex};

use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::id::DeviceId;
use smarthouse_domain::normalize;

use crate::ports::HouseStore;
use crate::ports::storage::{ActuatorStateRow, DeviceRow, MeasurementRow, RoomRow};

/// Row-level fixture store. Room ids are `index + 1`, matching how an
/// autoincrement column would number them. Clones share the mutable state
/// table, so tests can hand a clone to a service and assert on the original.
#[derive(Default, Clone)]
pub(crate) struct InMemoryHouseStore {
    rooms: Vec<RoomRow>,
    devices: Vec<DeviceRow>,
    measurements: Vec<MeasurementRow>,
    states: Arc<Mutex<Vec<ActuatorStateRow>>>,
}

impl InMemoryHouseStore {
    pub(crate) fn with_room(mut self, floor_level: i64, area: f64, name: &str) -> Self {
        self.rooms.push(RoomRow {
            floor_level,
            area,
            name: name.to_string(),
        });
        self
    }

    pub(crate) fn with_device(mut self, room_name: &str, id: &str, category: &str) -> Self {
        self.devices.push(DeviceRow {
            room_name: room_name.to_string(),
            id: id.to_string(),
            supplier: "AetherCorp".to_string(),
            model: "Test Model".to_string(),
            category: category.to_string(),
        });
        self
    }

    pub(crate) fn with_measurement(
        mut self,
        device_id: &str,
        timestamp: &str,
        value: f64,
        unit: &str,
    ) -> Self {
        self.measurements.push(MeasurementRow {
            device_id: device_id.to_string(),
            timestamp: timestamp.to_string(),
            value,
            unit: unit.to_string(),
        });
        self
    }

    pub(crate) fn with_state(self, device_id: &str, state: f64) -> Self {
        self.states.lock().unwrap().push(ActuatorStateRow {
            device_id: device_id.to_string(),
            state,
        });
        self
    }

    pub(crate) fn state_of(&self, device_id: &str) -> Option<f64> {
        self.states
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.device_id == device_id)
            .map(|row| row.state)
    }

    fn room_name(&self, room_id: i64) -> Option<String> {
        let index = usize::try_from(room_id).ok()?.checked_sub(1)?;
        self.rooms.get(index).map(|row| row.name.clone())
    }
}

impl HouseStore for InMemoryHouseStore {
    fn room_rows(&self) -> impl Future<Output = Result<Vec<RoomRow>, SmartHouseError>> + Send {
        let rows = self.rooms.clone();
        async move { Ok(rows) }
    }

    fn device_rows(&self) -> impl Future<Output = Result<Vec<DeviceRow>, SmartHouseError>> + Send {
        let rows = self.devices.clone();
        async move { Ok(rows) }
    }

    fn measurement_rows(
        &self,
    ) -> impl Future<Output = Result<Vec<MeasurementRow>, SmartHouseError>> + Send {
        let rows = self.measurements.clone();
        async move { Ok(rows) }
    }

    fn actuator_state_rows(
        &self,
    ) -> impl Future<Output = Result<Vec<ActuatorStateRow>, SmartHouseError>> + Send {
        let rows = self.states.lock().unwrap().clone();
        async move { Ok(rows) }
    }

    fn find_room_id(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<i64>, SmartHouseError>> + Send {
        let key = normalize::name_key(name);
        let result = self
            .rooms
            .iter()
            .position(|row| normalize::name_key(&row.name) == key)
            .map(|index| i64::try_from(index).unwrap() + 1);
        async move { Ok(result) }
    }

    fn room_measurements(
        &self,
        room_id: i64,
    ) -> impl Future<Output = Result<Vec<MeasurementRow>, SmartHouseError>> + Send {
        let rows = self.room_name(room_id).map_or_else(Vec::new, |room_name| {
            let key = normalize::name_key(&room_name);
            let device_ids: Vec<&str> = self
                .devices
                .iter()
                .filter(|device| normalize::name_key(&device.room_name) == key)
                .map(|device| device.id.as_str())
                .collect();
            self.measurements
                .iter()
                .filter(|row| device_ids.contains(&row.device_id.as_str()))
                .cloned()
                .collect()
        });
        async move { Ok(rows) }
    }

    fn update_actuator_state(
        &self,
        device_id: &DeviceId,
        state: f64,
    ) -> impl Future<Output = Result<usize, SmartHouseError>> + Send {
        let mut states = self.states.lock().unwrap();
        let mut affected = 0;
        for row in states
            .iter_mut()
            .filter(|row| row.device_id == device_id.as_str())
        {
            row.state = state;
            affected += 1;
        }
        async move { Ok(affected) }
    }
}
