//! Database row models for the climate dataset.
//!
//! The schema is declared here rather than reflected from the file; the
//! store checks it against the dataset once at startup.

use crate::types::{PrecipitationRecord, TemperatureRecord, TemperatureSummary};
use sqlx::FromRow;

/// Station metadata table.
pub const STATION_TABLE: &str = "station";

/// Daily observation table.
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Columns the queries read from `station`.
pub const STATION_COLUMNS: &[&str] = &["station", "name"];

/// Columns the queries read from `measurement`.
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];

/// Tables and the columns each must expose.
pub const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (STATION_TABLE, STATION_COLUMNS),
    (MEASUREMENT_TABLE, MEASUREMENT_COLUMNS),
];

#[derive(Debug, Clone, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

impl From<PrecipitationRow> for PrecipitationRecord {
    fn from(row: PrecipitationRow) -> Self {
        Self {
            date: row.date,
            prcp: row.prcp,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TemperatureRow {
    pub date: String,
    pub tobs: Option<f64>,
}

impl From<TemperatureRow> for TemperatureRecord {
    fn from(row: TemperatureRow) -> Self {
        Self {
            date: row.date,
            tobs: row.tobs,
        }
    }
}

/// One `GROUP BY station.name` result row.
#[derive(Debug, Clone, FromRow)]
pub struct SummaryRow {
    pub station_name: String,
    pub min_tobs: Option<f64>,
    pub avg_tobs: Option<f64>,
    pub max_tobs: Option<f64>,
    pub count_tobs: i64,
}

impl From<SummaryRow> for TemperatureSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            station_name: row.station_name,
            min_tobs: row.min_tobs,
            avg_tobs: row.avg_tobs,
            max_tobs: row.max_tobs,
            count_tobs: row.count_tobs,
        }
    }
}
