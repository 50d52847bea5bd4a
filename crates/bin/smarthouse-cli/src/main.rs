//! # smarthouse — house report CLI
//!
//! Composition root that wires the storage adapter into the application
//! services, deep-loads the house graph, and prints a structural and
//! statistical report.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the store (adapter) and inject it into the services
//! - Print the report
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use smarthouse_adapter_storage_sqlite_sqlx::{Config as DbConfig, SqliteHouseStore};
use smarthouse_app::services::house_loader::HouseLoader;
use smarthouse_app::services::statistics_service::{
    HUMIDITY_UNIT, StatisticsService, TEMPERATURE_UNIT,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Services
    let loader = HouseLoader::new(SqliteHouseStore::new(pool.clone()));
    let statistics = StatisticsService::new(SqliteHouseStore::new(pool));

    let house = loader.load().await?;
    tracing::info!(
        floors = house.get_floors().len(),
        rooms = house.get_rooms().len(),
        devices = house.get_devices().len(),
        "house loaded"
    );

    println!(
        "house: {} floors, {} rooms, {} devices, {:.2} m²",
        house.get_floors().len(),
        house.get_rooms().len(),
        house.get_devices().len(),
        house.get_area()
    );

    for floor in house.get_floors() {
        println!("floor {} — {:.2} m²", floor.level, floor.area());
        for room in floor.rooms() {
            println!("  {} ({:.2} m², {} devices)", room.name, room.area, room.devices().len());

            let temperatures = statistics
                .avg_by_day(&room.name, TEMPERATURE_UNIT, None, None)
                .await?;
            for (date, average) in &temperatures {
                println!("    {date}: avg {average:.2} {TEMPERATURE_UNIT}");
            }

            let humidity_days = statistics
                .avg_by_day(&room.name, HUMIDITY_UNIT, None, None)
                .await?;
            for date in humidity_days.keys() {
                let hours = statistics
                    .hours_above_avg(&room.name, HUMIDITY_UNIT, date.parse()?)
                    .await?;
                if !hours.is_empty() {
                    println!("    {date}: hours above avg humidity {hours:?}");
                }
            }
        }
    }

    Ok(())
}
