//! Climate storage traits and implementations.
//!
//! The dataset is read-only, so the trait only exposes the queries the
//! service needs. Each method maps to exactly one query against the backend.

use crate::error::ClimateResult;
use crate::types::{
    Observation, PrecipitationRecord, Station, SummaryRange, TemperatureRecord,
    TemperatureSummary,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Trait for climate dataset access.
///
/// # Example
///
/// ```ignore
/// use climate::{ClimateStore, SummaryRange};
///
/// async fn example(store: &dyn ClimateStore) -> climate::ClimateResult<()> {
///     let summaries = store
///         .temperature_summary(&SummaryRange::between("2017-01-01", "2017-01-31"))
///         .await?;
///     for s in summaries {
///         println!("{}: {:?}", s.station_name, s.avg_tobs);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ClimateStore: Send + Sync {
    /// Every observation of `station` as `(date, prcp)`, in store order.
    async fn precipitation_for_station(
        &self,
        station: &str,
    ) -> ClimateResult<Vec<PrecipitationRecord>>;

    /// One name per station row, no deduplication.
    async fn station_names(&self) -> ClimateResult<Vec<String>>;

    /// Observations of `station` with `date > after` (strict), as `(date, tobs)`.
    async fn temperatures_for_station_after(
        &self,
        station: &str,
        after: &str,
    ) -> ClimateResult<Vec<TemperatureRecord>>;

    /// Min / avg / max / count of `tobs` per station name within `range`.
    ///
    /// Stations without matching observations are absent; an inverted range
    /// yields an empty list.
    async fn temperature_summary(
        &self,
        range: &SummaryRange,
    ) -> ClimateResult<Vec<TemperatureSummary>>;

    /// Number of station rows.
    async fn station_count(&self) -> ClimateResult<usize> {
        Ok(self.station_names().await?.len())
    }
}

/// In-memory implementation of ClimateStore.
///
/// Rows are kept in insertion order. Summary groups come back ordered by
/// station name, the order SQLite's `GROUP BY` produces.
#[derive(Debug)]
pub struct InMemoryClimateStore {
    stations: Arc<RwLock<Vec<Station>>>,
    observations: Arc<RwLock<Vec<Observation>>>,
}

impl InMemoryClimateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            stations: Arc::new(RwLock::new(Vec::new())),
            observations: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a store pre-loaded with rows.
    pub fn with_data(stations: Vec<Station>, observations: Vec<Observation>) -> Self {
        Self {
            stations: Arc::new(RwLock::new(stations)),
            observations: Arc::new(RwLock::new(observations)),
        }
    }

    pub fn add_station(&self, station: Station) {
        self.stations.write().push(station);
    }

    pub fn add_observation(&self, observation: Observation) {
        self.observations.write().push(observation);
    }

    /// Number of observation rows.
    pub fn len(&self) -> usize {
        self.observations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.read().is_empty()
    }
}

impl Default for InMemoryClimateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryClimateStore {
    fn clone(&self) -> Self {
        Self {
            stations: Arc::clone(&self.stations),
            observations: Arc::clone(&self.observations),
        }
    }
}

#[derive(Default)]
struct TobsAccumulator {
    min: Option<f64>,
    max: Option<f64>,
    sum: f64,
    count: i64,
}

impl TobsAccumulator {
    /// NULL readings are skipped, as SQL aggregates do.
    fn push(&mut self, tobs: Option<f64>) {
        let Some(tobs) = tobs else {
            return;
        };
        self.min = Some(self.min.map_or(tobs, |m| m.min(tobs)));
        self.max = Some(self.max.map_or(tobs, |m| m.max(tobs)));
        self.sum += tobs;
        self.count += 1;
    }

    fn into_summary(self, station_name: String) -> TemperatureSummary {
        let avg_tobs = (self.count > 0).then(|| self.sum / self.count as f64);
        TemperatureSummary {
            station_name,
            min_tobs: self.min,
            avg_tobs,
            max_tobs: self.max,
            count_tobs: self.count,
        }
    }
}

#[async_trait]
impl ClimateStore for InMemoryClimateStore {
    async fn precipitation_for_station(
        &self,
        station: &str,
    ) -> ClimateResult<Vec<PrecipitationRecord>> {
        Ok(self
            .observations
            .read()
            .iter()
            .filter(|o| o.station == station)
            .map(|o| PrecipitationRecord {
                date: o.date.clone(),
                prcp: o.prcp,
            })
            .collect())
    }

    async fn station_names(&self) -> ClimateResult<Vec<String>> {
        Ok(self.stations.read().iter().map(|s| s.name.clone()).collect())
    }

    async fn temperatures_for_station_after(
        &self,
        station: &str,
        after: &str,
    ) -> ClimateResult<Vec<TemperatureRecord>> {
        Ok(self
            .observations
            .read()
            .iter()
            .filter(|o| o.station == station && o.date.as_str() > after)
            .map(|o| TemperatureRecord {
                date: o.date.clone(),
                tobs: o.tobs,
            })
            .collect())
    }

    async fn temperature_summary(
        &self,
        range: &SummaryRange,
    ) -> ClimateResult<Vec<TemperatureSummary>> {
        let stations = self.stations.read();
        let observations = self.observations.read();

        // Inner join on station code, grouped by station name.
        let mut groups: BTreeMap<String, TobsAccumulator> = BTreeMap::new();
        for station in stations.iter() {
            for obs in observations
                .iter()
                .filter(|o| o.station == station.station && range.contains(&o.date))
            {
                groups.entry(station.name.clone()).or_default().push(obs.tobs);
            }
        }

        Ok(groups
            .into_iter()
            .map(|(name, acc)| acc.into_summary(name))
            .collect())
    }
}
