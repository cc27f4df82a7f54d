//! Core domain types for the climate dataset.
//!
//! Dates travel as zero-padded ISO `YYYY-MM-DD` strings end to end, which is
//! how the dataset stores them and why plain string comparison orders them
//! correctly.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ClimateError, ClimateResult};

/// Format of every date in the dataset and on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A weather station row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station code, e.g. `USC00519281`.
    pub station: String,
    /// Human-readable name, e.g. `WAIHEE 837.5, HI US`.
    pub name: String,
}

impl Station {
    pub fn new(station: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            name: name.into(),
        }
    }
}

/// One dated reading at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub station: String,
    pub date: String,
    /// Precipitation; `None` when no reading was taken.
    pub prcp: Option<f64>,
    /// Observed temperature; `None` when no reading was taken.
    pub tobs: Option<f64>,
}

impl Observation {
    pub fn new(
        station: impl Into<String>,
        date: impl Into<String>,
        prcp: Option<f64>,
        tobs: impl Into<Option<f64>>,
    ) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp,
            tobs: tobs.into(),
        }
    }
}

/// `GET /api/v1.0/precipitation` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRecord {
    pub date: String,
    pub prcp: Option<f64>,
}

/// `GET /api/v1.0/tobs` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub date: String,
    pub tobs: Option<f64>,
}

/// Per-station aggregate returned by the start / start-end routes.
///
/// The aggregates are optional because SQL `MIN`/`AVG`/`MAX` are `NULL` over
/// groups whose readings are all `NULL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub station_name: String,
    pub min_tobs: Option<f64>,
    pub avg_tobs: Option<f64>,
    pub max_tobs: Option<f64>,
    pub count_tobs: i64,
}

/// Inclusive date bounds for a temperature summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRange {
    pub start: String,
    pub end: Option<String>,
}

impl SummaryRange {
    pub fn from_start(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    /// Lexical containment check, matching the store's SQL comparison.
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start.as_str() && self.end.as_deref().map_or(true, |end| date <= end)
    }
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_iso_date(value: &str) -> ClimateResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| ClimateError::invalid_date(value, e))
}

/// The same calendar day one year earlier; 29 February maps to 28 February.
pub fn year_before(date: NaiveDate) -> ClimateResult<NaiveDate> {
    date.checked_sub_months(Months::new(12)).ok_or_else(|| {
        ClimateError::ConfigError(format!("Cannot compute one year before {}", date))
    })
}
