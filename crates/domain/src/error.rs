//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartHouseError`] via `#[from]` or an explicit `From` impl (the storage
//! adapter wraps its errors into the `Storage` variant).

/// Top-level error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum SmartHouseError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A structurally required cross-reference could not be resolved.
    #[error("integrity error")]
    Integrity(#[from] IntegrityError),

    /// A caller-supplied reference does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The storage layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Violations of domain invariants, raised by graph-mutation primitives.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Floor levels are unique within a house.
    #[error("a floor at level {0} is already registered")]
    DuplicateFloorLevel(i64),

    /// Room names are unique within a house (compared trimmed, case-folded).
    #[error("a room named `{0}` is already registered")]
    DuplicateRoomName(String),

    /// Device ids are unique across the whole house.
    #[error("a device with id `{0}` is already registered")]
    DuplicateDeviceId(String),

    /// Room areas are positive reals.
    #[error("room area must be positive, got {0}")]
    NonPositiveArea(f64),

    /// Names must not be empty or whitespace-only.
    #[error("name must not be empty")]
    EmptyName,
}

/// A structural row (room→floor, device→room, actuator-state→device)
/// references something that does not exist. Structural errors abort a load:
/// a half-built house graph is worse than a hard failure.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{subject} references unknown {target} `{reference}`")]
pub struct IntegrityError {
    /// What carried the dangling reference (e.g. `"device"`).
    pub subject: &'static str,
    /// What the reference should have resolved to (e.g. `"room"`).
    pub target: &'static str,
    /// The unresolved key, as text.
    pub reference: String,
}

/// A caller-supplied room or device reference does not exist.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    /// Kind of the missing thing (e.g. `"Room"`).
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_integrity_error_with_reference() {
        let err = IntegrityError {
            subject: "device",
            target: "room",
            reference: "Sauna".to_string(),
        };
        assert_eq!(err.to_string(), "device references unknown room `Sauna`");
    }

    #[test]
    fn should_render_not_found_error() {
        let err = NotFoundError {
            entity: "Room",
            id: "Garage".to_string(),
        };
        assert_eq!(err.to_string(), "Room `Garage` not found");
    }

    #[test]
    fn should_convert_validation_error_into_top_level() {
        let err: SmartHouseError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            SmartHouseError::Validation(ValidationError::EmptyName)
        ));
    }
}
