//! # smarthouse-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **storage port** the adapter must implement:
//!   - `HouseStore` — the four logical read surfaces (rooms, devices,
//!     measurements, actuator state) plus the single state write surface
//! - Define **driving use-cases** as service structs:
//!   - `HouseLoader` — deep load: reconstruct the house graph from flat rows
//!   - `StatisticsService` — per-day averages and hours-above-average
//!   - `ActuatorService` — persist actuator state changes
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `smarthouse-domain` only. Never imports adapter crates;
//! adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
