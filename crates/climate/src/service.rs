//! Climate service - the query operations behind the HTTP routes.

use crate::error::{ClimateError, ClimateResult};
use crate::store::ClimateStore;
use crate::types::{
    parse_iso_date, year_before, PrecipitationRecord, SummaryRange, TemperatureRecord,
    TemperatureSummary, DATE_FORMAT,
};
use config::{DateValidation, ReferenceConfig};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Binds the configured reference station, lookback window and date handling
/// mode to a store. Built once at startup and shared by every request.
pub struct ClimateService {
    store: Arc<dyn ClimateStore>,
    reference_station: String,
    lookback_date: String,
    date_validation: DateValidation,
}

impl ClimateService {
    /// Create a new climate service.
    ///
    /// Fails with `ConfigError` when the reference station is blank or the
    /// reference date is not a valid `YYYY-MM-DD` date.
    pub fn new(
        store: Arc<dyn ClimateStore>,
        reference: &ReferenceConfig,
        date_validation: DateValidation,
    ) -> ClimateResult<Self> {
        let reference_station = reference.station.trim();
        if reference_station.is_empty() {
            return Err(ClimateError::ConfigError(
                "reference.station must not be empty".to_string(),
            ));
        }

        let reference_date = parse_iso_date(&reference.date).map_err(|e| {
            ClimateError::ConfigError(format!("reference.date: {}", e))
        })?;
        let lookback_date = year_before(reference_date)?
            .format(DATE_FORMAT)
            .to_string();

        info!(
            station = reference_station,
            reference_date = %reference_date,
            lookback_date = %lookback_date,
            date_validation = %date_validation,
            "Climate service configured"
        );

        Ok(Self {
            store,
            reference_station: reference_station.to_string(),
            lookback_date,
            date_validation,
        })
    }

    pub fn reference_station(&self) -> &str {
        &self.reference_station
    }

    /// `/tobs` returns observations strictly after this date.
    pub fn lookback_date(&self) -> &str {
        &self.lookback_date
    }

    pub fn date_validation(&self) -> DateValidation {
        self.date_validation
    }

    /// Daily precipitation for the reference station.
    #[instrument(skip(self))]
    pub async fn precipitation(&self) -> ClimateResult<Vec<PrecipitationRecord>> {
        self.store
            .precipitation_for_station(&self.reference_station)
            .await
    }

    /// Every station name.
    #[instrument(skip(self))]
    pub async fn station_names(&self) -> ClimateResult<Vec<String>> {
        self.store.station_names().await
    }

    /// Temperature observations for the reference station after the lookback date.
    #[instrument(skip(self))]
    pub async fn recent_temperatures(&self) -> ClimateResult<Vec<TemperatureRecord>> {
        self.store
            .temperatures_for_station_after(&self.reference_station, &self.lookback_date)
            .await
    }

    /// Per-station temperature aggregates from `start` through optional `end`, both inclusive.
    #[instrument(skip(self))]
    pub async fn temperature_summary(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> ClimateResult<Vec<TemperatureSummary>> {
        let range = self.summary_range(start, end)?;
        debug!(start = %range.start, end = ?range.end, "Resolved summary range");
        self.store.temperature_summary(&range).await
    }

    /// Turn path segments into store bounds according to the date handling mode.
    pub fn summary_range(&self, start: &str, end: Option<&str>) -> ClimateResult<SummaryRange> {
        match self.date_validation {
            DateValidation::Strict => {
                let start = canonical_date(start)?;
                let end = end.map(canonical_date).transpose()?;
                Ok(SummaryRange { start, end })
            }
            DateValidation::Lexical => Ok(SummaryRange {
                start: start.to_string(),
                end: end.map(str::to_string),
            }),
        }
    }
}

fn canonical_date(value: &str) -> ClimateResult<String> {
    Ok(parse_iso_date(value)?.format(DATE_FORMAT).to_string())
}
