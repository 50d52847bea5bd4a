//! Statistics over a room's measurement series.
//!
//! Both operations fetch the room's raw measurement rows from the store and
//! do the unit filtering and bucketing here, so the normalization rules stay
//! uniform with the rest of the core and the aggregation logic is testable
//! without a database.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};

use smarthouse_domain::error::{NotFoundError, SmartHouseError};
use smarthouse_domain::normalize;
use smarthouse_domain::time::{self, Timestamp};

use crate::ports::HouseStore;
use crate::ports::storage::MeasurementRow;

/// Unit string identifying temperature readings.
pub const TEMPERATURE_UNIT: &str = "°C";
/// Unit string identifying relative-humidity readings.
pub const HUMIDITY_UNIT: &str = "%";

/// An hour bucket needs more than this many at-or-above-average readings to
/// qualify as an hour above average.
const HOUR_BUCKET_THRESHOLD: usize = 3;

/// Query-style aggregations over a single room's measurement history.
///
/// Any device in the room carrying the target unit qualifies, including
/// actuator-embedded sensor readings (e.g. a heat pump reporting `°C`).
pub struct StatisticsService<S> {
    store: S,
}

/// A unit-filtered measurement with a parsed timestamp.
struct Sample {
    timestamp: Timestamp,
    value: f64,
}

impl<S: HouseStore> StatisticsService<S> {
    /// Create a service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Per-day arithmetic mean of the room's readings carrying `unit`,
    /// keyed by ISO `YYYY-MM-DD` date strings, iterated ascending.
    ///
    /// The optional bounds are inclusive whole days (`from 00:00:00` through
    /// `until 23:59:59`); an absent bound leaves that side open. Days
    /// without matching readings are absent from the result, never zero.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHouseError::NotFound`] when `room_name` does not
    /// resolve to a stored room; storage errors are propagated. A room with
    /// no matching readings yields an empty map.
    #[tracing::instrument(skip(self))]
    pub async fn avg_by_day(
        &self,
        room_name: &str,
        unit: &str,
        from_date: Option<NaiveDate>,
        until_date: Option<NaiveDate>,
    ) -> Result<BTreeMap<String, f64>, SmartHouseError> {
        let samples = self.room_samples(room_name, unit).await?;
        Ok(average_by_day(&samples, from_date, until_date))
    }

    /// Hours of `date` (0–23, deduplicated, ascending) during which more
    /// than three of the room's `unit` readings were at or above that day's
    /// average value.
    ///
    /// Returns an empty list when the day has no qualifying readings at all.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHouseError::NotFound`] when `room_name` does not
    /// resolve to a stored room; storage errors are propagated.
    #[tracing::instrument(skip(self))]
    pub async fn hours_above_avg(
        &self,
        room_name: &str,
        unit: &str,
        date: NaiveDate,
    ) -> Result<Vec<u32>, SmartHouseError> {
        let samples = self.room_samples(room_name, unit).await?;
        Ok(hours_above_daily_average(&samples, date))
    }

    async fn room_samples(
        &self,
        room_name: &str,
        unit: &str,
    ) -> Result<Vec<Sample>, SmartHouseError> {
        let room_id = self
            .store
            .find_room_id(room_name)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Room",
                id: room_name.to_string(),
            })?;
        let rows = self.store.room_measurements(room_id).await?;
        Ok(collect_samples(rows, unit))
    }
}

/// Filter rows to the target unit (trim-normalized exact match) and parse
/// timestamps, preserving row order. Rows with malformed timestamps are
/// logged and dropped.
fn collect_samples(rows: Vec<MeasurementRow>, unit: &str) -> Vec<Sample> {
    let unit = normalize::unit(unit);
    rows.into_iter()
        .filter(|row| normalize::unit(&row.unit) == unit)
        .filter_map(|row| {
            let Some(timestamp) = time::parse_timestamp(&row.timestamp) else {
                tracing::warn!(
                    timestamp = %row.timestamp,
                    "measurement has an unparseable timestamp, excluded from statistics"
                );
                return None;
            };
            Some(Sample {
                timestamp,
                value: row.value,
            })
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn average_by_day(
    samples: &[Sample],
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> BTreeMap<String, f64> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for sample in samples {
        let date = sample.timestamp.date();
        if from.is_some_and(|bound| date < bound) || until.is_some_and(|bound| date > bound) {
            continue;
        }
        let bucket = buckets.entry(date).or_insert((0.0, 0));
        bucket.0 += sample.value;
        bucket.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (sum, count))| (date.format("%Y-%m-%d").to_string(), sum / count as f64))
        .collect()
}

/// Two-stage aggregate: a whole-day baseline average, then hour buckets of
/// readings at or above that baseline. An hour qualifies iff its at-or-above
/// count exceeds [`HOUR_BUCKET_THRESHOLD`] — both conditions apply to the
/// same filtered subset.
#[allow(clippy::cast_precision_loss)]
fn hours_above_daily_average(samples: &[Sample], date: NaiveDate) -> Vec<u32> {
    let day: Vec<&Sample> = samples
        .iter()
        .filter(|sample| sample.timestamp.date() == date)
        .collect();
    if day.is_empty() {
        return Vec::new();
    }
    let day_avg = day.iter().map(|sample| sample.value).sum::<f64>() / day.len() as f64;

    let mut per_hour: BTreeMap<u32, usize> = BTreeMap::new();
    for sample in day.iter().filter(|sample| sample.value >= day_avg) {
        *per_hour.entry(sample.timestamp.hour()).or_default() += 1;
    }
    per_hour
        .into_iter()
        .filter(|(_, count)| *count > HOUR_BUCKET_THRESHOLD)
        .map(|(hour, _)| hour)
        .collect()
}
