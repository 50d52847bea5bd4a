//! Device — a sensor or actuator mounted in a room.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::measurement::Measurement;
use crate::normalize;

/// Per-variant payload: sensors accumulate an append-only measurement
/// history, actuators hold a single last-write-wins state.
///
/// Dispatch is by pattern match; the shared fields live on [`Device`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum DeviceKind {
    Sensor { history: Vec<Measurement> },
    Actuator { state: f64 },
}

/// A smart device registered in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub supplier: String,
    pub model: String,
    /// Name of the owning room (non-owning back-reference), maintained by
    /// [`House`](crate::house::House) registration and relocation.
    pub(crate) room: String,
    #[serde(flatten)]
    pub kind: DeviceKind,
}

impl Device {
    /// Create an unattached sensor with an empty history.
    #[must_use]
    pub fn sensor(id: DeviceId, supplier: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id,
            supplier: supplier.into(),
            model: model.into(),
            room: String::new(),
            kind: DeviceKind::Sensor {
                history: Vec::new(),
            },
        }
    }

    /// Create an unattached actuator, initially off.
    #[must_use]
    pub fn actuator(id: DeviceId, supplier: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id,
            supplier: supplier.into(),
            model: model.into(),
            room: String::new(),
            kind: DeviceKind::Actuator { state: 0.0 },
        }
    }

    /// Classify a raw category column: a trimmed, case-folded value of
    /// `actuator` yields an actuator, anything else a sensor.
    #[must_use]
    pub fn from_category(
        id: DeviceId,
        supplier: impl Into<String>,
        model: impl Into<String>,
        category: &str,
    ) -> Self {
        if normalize::name_key(category) == "actuator" {
            Self::actuator(id, supplier, model)
        } else {
            Self::sensor(id, supplier, model)
        }
    }

    /// Name of the room this device is registered in.
    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    /// The sensor/actuator discriminator as stored in the `category` column.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self.kind {
            DeviceKind::Sensor { .. } => "sensor",
            DeviceKind::Actuator { .. } => "actuator",
        }
    }

    #[must_use]
    pub fn is_sensor(&self) -> bool {
        matches!(self.kind, DeviceKind::Sensor { .. })
    }

    #[must_use]
    pub fn is_actuator(&self) -> bool {
        matches!(self.kind, DeviceKind::Actuator { .. })
    }

    /// Append a reading to a sensor's history, preserving arrival order.
    ///
    /// Actuators carry no history; the reading is dropped and `false`
    /// returned so callers can log the mismatch.
    pub fn record_measurement(&mut self, measurement: Measurement) -> bool {
        match &mut self.kind {
            DeviceKind::Sensor { history } => {
                history.push(measurement);
                true
            }
            DeviceKind::Actuator { .. } => false,
        }
    }

    /// Most recent reading in this sensor's history, if any.
    #[must_use]
    pub fn last_measurement(&self) -> Option<&Measurement> {
        match &self.kind {
            DeviceKind::Sensor { history } => history.last(),
            DeviceKind::Actuator { .. } => None,
        }
    }

    /// Current state of an actuator, `None` for sensors.
    #[must_use]
    pub fn state(&self) -> Option<f64> {
        match self.kind {
            DeviceKind::Actuator { state } => Some(state),
            DeviceKind::Sensor { .. } => None,
        }
    }

    /// Overwrite an actuator's state (last write wins). No effect on sensors.
    pub fn set_state(&mut self, value: f64) {
        if let DeviceKind::Actuator { state } = &mut self.kind {
            *state = value;
        }
    }

    /// Whether an actuator is currently switched on (state ≠ 0).
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.kind, DeviceKind::Actuator { state } if state != 0.0)
    }
}
