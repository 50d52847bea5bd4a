//! Deep load — reconstructing the [`House`] graph from flat relational rows.

use smarthouse_domain::device::{Device, DeviceKind};
use smarthouse_domain::error::{IntegrityError, SmartHouseError};
use smarthouse_domain::house::House;
use smarthouse_domain::id::DeviceId;
use smarthouse_domain::measurement::Measurement;
use smarthouse_domain::time;

use crate::ports::HouseStore;

/// Reconstructs the owning graph (house → floors → rooms → devices →
/// measurement history / actuator state) from the store's row sets,
/// resolving cross-references by matching keys across batches.
pub struct HouseLoader<S> {
    store: S,
}

impl<S: HouseStore> HouseLoader<S> {
    /// Create a loader backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the complete house. Deterministic for identical row sets.
    ///
    /// Four passes, each depending on the previous: floors (the distinct
    /// levels referenced by room rows, in row order), rooms, devices, then
    /// measurements and actuator state.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHouseError::Integrity`] when a structural
    /// cross-reference (room→floor, device→room, actuator-state→device)
    /// cannot be resolved, and [`SmartHouseError::Validation`] when the row
    /// sets violate a domain invariant (a duplicate room name or device
    /// id); no partial house is returned either way. Measurement rows
    /// referencing an unknown device are best-effort history: they are
    /// logged and skipped, never fatal.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<House, SmartHouseError> {
        let mut house = House::new();

        let rooms = self.store.room_rows().await?;
        for row in &rooms {
            if house.floor(row.floor_level).is_none() {
                house.register_floor(row.floor_level)?;
            }
        }
        for row in rooms {
            house.register_room(row.floor_level, row.name, row.area)?;
        }

        for row in self.store.device_rows().await? {
            let device =
                Device::from_category(DeviceId::new(row.id), row.supplier, row.model, &row.category);
            house.register_device(&row.room_name, device)?;
        }

        for row in self.store.measurement_rows().await? {
            let id = DeviceId::new(row.device_id);
            let Some(device) = house.device_mut(&id) else {
                tracing::warn!(device = %id, "measurement references an unknown device, skipping");
                continue;
            };
            let Some(timestamp) = time::parse_timestamp(&row.timestamp) else {
                tracing::warn!(
                    device = %id,
                    timestamp = %row.timestamp,
                    "measurement has an unparseable timestamp, skipping"
                );
                continue;
            };
            if !device.record_measurement(Measurement::new(timestamp, row.value, &row.unit)) {
                tracing::debug!(device = %id, "measurement addressed to an actuator, not kept in the graph");
            }
        }

        for row in self.store.actuator_state_rows().await? {
            let id = DeviceId::new(row.device_id);
            let Some(device) = house.device_mut(&id) else {
                return Err(IntegrityError {
                    subject: "actuator-state row",
                    target: "device",
                    reference: id.to_string(),
                }
                .into());
            };
            match &mut device.kind {
                DeviceKind::Actuator { state } => *state = row.state,
                DeviceKind::Sensor { .. } => {
                    tracing::warn!(device = %id, "actuator-state row addressed to a sensor, ignoring");
                }
            }
        }

        tracing::debug!(
            floors = house.get_floors().len(),
            rooms = house.get_rooms().len(),
            devices = house.get_devices().len(),
            "house graph reconstructed"
        );
        Ok(house)
    }
}
