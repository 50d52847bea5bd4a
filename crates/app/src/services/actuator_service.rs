//! Actuator state writes — the single write surface of the core.

use smarthouse_domain::error::{NotFoundError, SmartHouseError};
use smarthouse_domain::id::DeviceId;

use crate::ports::HouseStore;

/// Persists actuator state changes. Last write wins; each change is a single
/// update followed by a commit, with no multi-statement transactions.
pub struct ActuatorService<S> {
    store: S,
}

impl<S: HouseStore> ActuatorService<S> {
    /// Create a service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrite the stored state of the given actuator.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHouseError::NotFound`] when no state row exists for
    /// the device; storage errors are propagated.
    #[tracing::instrument(skip(self))]
    pub async fn set_state(&self, device_id: &DeviceId, state: f64) -> Result<(), SmartHouseError> {
        let affected = self.store.update_actuator_state(device_id, state).await?;
        if affected == 0 {
            return Err(NotFoundError {
                entity: "Actuator",
                id: device_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Convenience for boolean actuators: on is stored as 1, off as 0.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_state`].
    pub async fn set_active(&self, device_id: &DeviceId, active: bool) -> Result<(), SmartHouseError> {
        self.set_state(device_id, if active { 1.0 } else { 0.0 })
            .await
    }
}
