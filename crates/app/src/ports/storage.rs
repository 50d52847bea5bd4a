//! Storage port — the read and write surfaces of the relational store.
//!
//! The core never issues SQL itself: it consumes these row-level surfaces
//! and reconstructs the graph or computes statistics on top of them. Each
//! method corresponds to one parameterized query.

use std::future::Future;

use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::id::DeviceId;

/// One row of the `rooms` relation.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomRow {
    pub floor_level: i64,
    pub area: f64,
    pub name: String,
}

/// One row of the `devices` relation, joined to its room's name.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRow {
    pub room_name: String,
    pub id: String,
    pub supplier: String,
    pub model: String,
    /// Loosely-normalized sensor/actuator discriminator.
    pub category: String,
}

/// One row of the `measurements` relation.
///
/// The timestamp is kept as stored text; parsing happens in the consumers so
/// malformed rows can be skipped instead of failing a whole query.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub device_id: String,
    pub timestamp: String,
    pub value: f64,
    pub unit: String,
}

/// One row of the `actuator_states` relation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorStateRow {
    pub device_id: String,
    pub state: f64,
}

/// Parameterized access to the four logical relations plus the single
/// actuator-state write surface.
pub trait HouseStore {
    /// All room rows, in storage iteration order.
    fn room_rows(&self) -> impl Future<Output = Result<Vec<RoomRow>, SmartHouseError>> + Send;

    /// All device rows, joined to their room names.
    fn device_rows(&self) -> impl Future<Output = Result<Vec<DeviceRow>, SmartHouseError>> + Send;

    /// All measurement rows, in storage iteration order. Consumers must
    /// preserve this order; ties on identical timestamps are broken by it.
    fn measurement_rows(
        &self,
    ) -> impl Future<Output = Result<Vec<MeasurementRow>, SmartHouseError>> + Send;

    /// All actuator-state rows.
    fn actuator_state_rows(
        &self,
    ) -> impl Future<Output = Result<Vec<ActuatorStateRow>, SmartHouseError>> + Send;

    /// Resolve a room name (compared trimmed and case-folded) to its stored
    /// room id.
    fn find_room_id(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<i64>, SmartHouseError>> + Send;

    /// All measurement rows taken by devices located in the given room,
    /// every unit, ordered by timestamp then row order.
    fn room_measurements(
        &self,
        room_id: i64,
    ) -> impl Future<Output = Result<Vec<MeasurementRow>, SmartHouseError>> + Send;

    /// Overwrite an actuator's stored state and commit. Returns the number
    /// of rows affected (zero when the device id is unknown).
    fn update_actuator_state(
        &self,
        device_id: &DeviceId,
        state: f64,
    ) -> impl Future<Output = Result<usize, SmartHouseError>> + Send;
}
