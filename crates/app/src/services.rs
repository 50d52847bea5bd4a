//! Application services (use-cases) built on the storage port.

pub mod actuator_service;
pub mod house_loader;
pub mod statistics_service;

#[cfg(test)]
pub(crate) mod testing;
