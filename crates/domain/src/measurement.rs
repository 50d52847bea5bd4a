//! Measurement — an immutable reading taken from a sensor.

use serde::{Deserialize, Serialize};

use crate::normalize;
use crate::time::Timestamp;

/// A single sensor reading. Created during load or explicit append, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: Timestamp,
    pub value: f64,
    /// Physical unit of `value`, whitespace-trimmed (e.g. `°C`, `%`).
    pub unit: String,
}

impl Measurement {
    /// Create a measurement, normalizing the unit text.
    #[must_use]
    pub fn new(timestamp: Timestamp, value: f64, unit: &str) -> Self {
        Self {
            timestamp,
            value,
            unit: normalize::unit(unit).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;

    #[test]
    fn should_trim_unit_on_construction() {
        let ts = parse_timestamp("2024-01-01 10:00:00").unwrap();
        let measurement = Measurement::new(ts, 21.5, "  °C ");
        assert_eq!(measurement.unit, "°C");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let ts = parse_timestamp("2024-01-01 10:00:00").unwrap();
        let measurement = Measurement::new(ts, 55.0, "%");
        let json = serde_json::to_string(&measurement).unwrap();
        let parsed: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, measurement);
    }
}
