//! `SQLite` implementation of [`HouseStore`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthouse_app::ports::HouseStore;
use smarthouse_app::ports::storage::{ActuatorStateRow, DeviceRow, MeasurementRow, RoomRow};
use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::id::DeviceId;
use smarthouse_domain::normalize;

use crate::error::StorageError;

/// Wrappers for converting database rows into the port's row types without
/// implementing sqlx traits in the app crate.
struct RoomWrapper(RoomRow);
struct DeviceWrapper(DeviceRow);
struct MeasurementWrapper(MeasurementRow);
struct StateWrapper(ActuatorStateRow);

impl<'r> FromRow<'r, SqliteRow> for RoomWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(RoomRow {
            floor_level: row.try_get("floor")?,
            area: row.try_get("area")?,
            name: row.try_get("name")?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for DeviceWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(DeviceRow {
            room_name: row.try_get("room_name")?,
            id: row.try_get("id")?,
            supplier: row.try_get("supplier")?,
            model: row.try_get("model")?,
            category: row.try_get("category")?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for MeasurementWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(MeasurementRow {
            device_id: row.try_get("device")?,
            timestamp: row.try_get("ts")?,
            value: row.try_get("value")?,
            unit: decode_unit(row)?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for StateWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(ActuatorStateRow {
            device_id: row.try_get("device")?,
            state: row.try_get("state")?,
        }))
    }
}

/// Unit columns are inconsistently stored as TEXT or BLOB; blobs are decoded
/// as UTF-8 text before any further handling.
fn decode_unit(row: &SqliteRow) -> Result<String, sqlx::Error> {
    match row.try_get::<String, _>("unit") {
        Ok(text) => Ok(text),
        Err(_) => {
            let raw: Vec<u8> = row.try_get("unit")?;
            String::from_utf8(raw).map_err(|err| sqlx::Error::Decode(Box::new(err)))
        }
    }
}

const SELECT_ROOMS: &str = "SELECT floor, area, name FROM rooms";

const SELECT_DEVICES: &str = r"
    SELECT r.name AS room_name, d.id, d.supplier, d.model, d.category
    FROM devices AS d
    INNER JOIN rooms AS r ON d.room = r.id
";

const SELECT_MEASUREMENTS: &str = "SELECT device, ts, value, unit FROM measurements";

const SELECT_ACTUATOR_STATES: &str = "SELECT device, state FROM actuator_states";

const SELECT_ROOM_IDS: &str = "SELECT id, name FROM rooms";

const SELECT_ROOM_MEASUREMENTS: &str = r"
    SELECT m.device, m.ts, m.value, m.unit
    FROM devices AS d
    INNER JOIN measurements AS m ON d.id = m.device
    WHERE d.room = ?
    ORDER BY m.ts
";

const UPDATE_ACTUATOR_STATE: &str = "UPDATE actuator_states SET state = ? WHERE device = ?";

/// `SQLite`-backed house store.
pub struct SqliteHouseStore {
    pool: SqlitePool,
}

impl SqliteHouseStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HouseStore for SqliteHouseStore {
    fn room_rows(&self) -> impl Future<Output = Result<Vec<RoomRow>, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<RoomWrapper> = sqlx::query_as(SELECT_ROOMS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn device_rows(&self) -> impl Future<Output = Result<Vec<DeviceRow>, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<DeviceWrapper> = sqlx::query_as(SELECT_DEVICES)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn measurement_rows(
        &self,
    ) -> impl Future<Output = Result<Vec<MeasurementRow>, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<MeasurementWrapper> = sqlx::query_as(SELECT_MEASUREMENTS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn actuator_state_rows(
        &self,
    ) -> impl Future<Output = Result<Vec<ActuatorStateRow>, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<StateWrapper> = sqlx::query_as(SELECT_ACTUATOR_STATES)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_room_id(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<i64>, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        // SQLite's LOWER() folds ASCII only, so the comparison happens here
        // with the same key used at every other name-matching site.
        let key = normalize::name_key(name);
        async move {
            let rows: Vec<(i64, String)> = sqlx::query_as(SELECT_ROOM_IDS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows
                .into_iter()
                .find(|(_, name)| normalize::name_key(name) == key)
                .map(|(id, _)| id))
        }
    }

    fn room_measurements(
        &self,
        room_id: i64,
    ) -> impl Future<Output = Result<Vec<MeasurementRow>, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<MeasurementWrapper> = sqlx::query_as(SELECT_ROOM_MEASUREMENTS)
                .bind(room_id)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update_actuator_state(
        &self,
        device_id: &DeviceId,
        state: f64,
    ) -> impl Future<Output = Result<usize, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        let device_id = device_id.to_string();
        async move {
            let result = sqlx::query(UPDATE_ACTUATOR_STATE)
                .bind(state)
                .bind(device_id)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteHouseStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();

        sqlx::query("INSERT INTO rooms (floor, area, name) VALUES (2, 11.75, 'Office'), (1, 13.5, 'Entrance'), (1, 6.3, 'Bathroom')")
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query(
            "INSERT INTO devices (id, room, supplier, model, category) VALUES
                ('lock-1', 2, 'MythicalTech', 'Guardian Lock 7000', 'actuator'),
                ('hum-1', 3, 'AetherCorp', 'Aqua Alert 800', 'sensor')",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO measurements (device, ts, value, unit) VALUES
                ('hum-1', '2024-01-01 11:00:00', 60.0, '%'),
                ('hum-1', '2024-01-01 10:00:00', 55.0, ' % ')",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("INSERT INTO actuator_states (device, state) VALUES ('lock-1', 1.0)")
            .execute(&pool)
            .await
            .unwrap();

        SqliteHouseStore::new(pool)
    }

    #[tokio::test]
    async fn should_fetch_room_rows_in_storage_order() {
        let store = setup().await;
        let rooms = store.room_rows().await.unwrap();

        assert_eq!(rooms.len(), 3);
        assert_eq!(rooms[0].name, "Office");
        assert_eq!(rooms[0].floor_level, 2);
    }

    #[tokio::test]
    async fn should_join_device_rows_to_room_names() {
        let store = setup().await;
        let devices = store.device_rows().await.unwrap();

        assert_eq!(devices.len(), 2);
        let lock = devices.iter().find(|d| d.id == "lock-1").unwrap();
        assert_eq!(lock.room_name, "Entrance");
        assert_eq!(lock.category, "actuator");
    }

    #[tokio::test]
    async fn should_fetch_measurement_and_state_rows() {
        let store = setup().await;

        let measurements = store.measurement_rows().await.unwrap();
        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].unit, "%");
        assert_eq!(measurements[1].unit, " % ");

        let states = store.actuator_state_rows().await.unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].device_id, "lock-1");
        assert_eq!(states[0].state, 1.0);
    }

    #[tokio::test]
    async fn should_decode_blob_units_as_utf8_text() {
        let store = setup().await;
        sqlx::query("INSERT INTO measurements (device, ts, value, unit) VALUES ('hum-1', '2024-01-02 10:00:00', 21.0, ?)")
            .bind("°C".as_bytes())
            .execute(&store.pool)
            .await
            .unwrap();

        let measurements = store.measurement_rows().await.unwrap();
        let last = measurements.last().unwrap();
        assert_eq!(last.unit, "°C");
    }

    #[tokio::test]
    async fn should_resolve_room_ids_tolerating_case_and_padding() {
        let store = setup().await;

        assert_eq!(store.find_room_id("Bathroom").await.unwrap(), Some(3));
        assert_eq!(store.find_room_id("  bathROOM ").await.unwrap(), Some(3));
        assert_eq!(store.find_room_id("Sauna").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_resolve_room_names_with_non_ascii_letters() {
        let store = setup().await;
        sqlx::query("INSERT INTO rooms (floor, area, name) VALUES (1, 12.0, 'SOVEROM ÆRLIG')")
            .execute(&store.pool)
            .await
            .unwrap();

        // Folding must match the domain key, not SQLite's ASCII-only LOWER().
        assert_eq!(normalize::name_key("SOVEROM ÆRLIG"), "soverom ærlig");
        assert_eq!(
            store.find_room_id("soverom ærlig").await.unwrap(),
            Some(4)
        );
        assert_eq!(
            store.find_room_id(" Soverom Ærlig ").await.unwrap(),
            Some(4)
        );
    }

    #[tokio::test]
    async fn should_scope_room_measurements_and_order_by_timestamp() {
        let store = setup().await;

        let rows = store.room_measurements(3).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp, "2024-01-01 10:00:00");
        assert_eq!(rows[1].timestamp, "2024-01-01 11:00:00");

        // The entrance has no measuring devices.
        assert!(store.room_measurements(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_report_rows_affected_when_updating_state() {
        let store = setup().await;

        let affected = store
            .update_actuator_state(&DeviceId::new("lock-1"), 0.0)
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let states = store.actuator_state_rows().await.unwrap();
        assert_eq!(states[0].state, 0.0);

        let missing = store
            .update_actuator_state(&DeviceId::new("ghost"), 1.0)
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }
}
