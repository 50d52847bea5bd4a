//! # smarthouse-domain
//!
//! Pure domain model for the smarthouse system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the house layout graph (**House** → **Floor** → **Room** → **Device**)
//! - Define **Devices** as sensor/actuator variants with their payloads
//!   (measurement history vs. last-write-wins state)
//! - Define **Measurements** (immutable sensor readings)
//! - Contain all invariant enforcement: unique floor levels, unique room
//!   names, unique device ids, relocation bookkeeping
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod normalize;
pub mod time;

pub mod device;
pub mod house;
pub mod measurement;
