//! # smarthouse-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `HouseStore` port defined in `smarthouse-app`
//! - Manage the `SQLite` connection lifecycle (single pooled connection,
//!   acquired per call and always released)
//! - Run database migrations (using sqlx embedded migrations)
//! - Map database rows to the port's row types, including byte-encoded
//!   `unit` columns
//!
//! ## Dependency rule
//! Depends on `smarthouse-app` (for the port trait) and `smarthouse-domain`.
//! Those crates must never reference this adapter.

pub mod error;
pub mod house_store;
pub mod pool;

pub use error::StorageError;
pub use house_store::SqliteHouseStore;
pub use pool::{Config, Database};
