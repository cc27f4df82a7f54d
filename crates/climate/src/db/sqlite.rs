//! SQLite implementation of the `ClimateStore` trait.
//!
//! The dataset file is opened read-only and never created. Each trait method
//! runs one statement on a pooled connection; the connection goes back to the
//! pool as soon as the rows are fetched.

use crate::db::models::{PrecipitationRow, SummaryRow, TemperatureRow, REQUIRED_SCHEMA};
use crate::error::{ClimateError, ClimateResult};
use crate::store::ClimateStore;
use crate::types::{PrecipitationRecord, SummaryRange, TemperatureRecord, TemperatureSummary};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info, instrument};

const SUMMARY_SELECT: &str = r#"
    SELECT s.name AS station_name,
           CAST(MIN(m.tobs) AS REAL) AS min_tobs,
           CAST(AVG(m.tobs) AS REAL) AS avg_tobs,
           CAST(MAX(m.tobs) AS REAL) AS max_tobs,
           COUNT(m.tobs) AS count_tobs
    FROM measurement m
    JOIN station s ON s.station = m.station
    WHERE m.date >= ?1
"#;

/// SQLite-backed climate store.
#[derive(Debug, Clone)]
pub struct SqliteClimateStore {
    pool: SqlitePool,
}

impl SqliteClimateStore {
    /// Open the dataset file read-only and verify its schema.
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> ClimateResult<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                ClimateError::StoreUnavailable(format!(
                    "Failed to open dataset {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let store = Self { pool };
        store.verify_schema().await?;

        info!(
            path = %path.display(),
            max_connections,
            "Opened climate dataset"
        );

        Ok(store)
    }

    /// Create from an existing connection pool. The schema is not checked.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check that every table and column the queries use exists.
    pub async fn verify_schema(&self) -> ClimateResult<()> {
        for (table, required) in REQUIRED_SCHEMA {
            let columns: Vec<String> =
                sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1)")
                    .bind(*table)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| {
                        ClimateError::StoreUnavailable(format!(
                            "Failed to inspect table '{}': {}",
                            table, e
                        ))
                    })?;

            let missing: Vec<String> = required
                .iter()
                .filter(|col| !columns.iter().any(|c| c.eq_ignore_ascii_case(col)))
                .map(|col| col.to_string())
                .collect();

            if !missing.is_empty() {
                return Err(ClimateError::SchemaMismatch {
                    table: table.to_string(),
                    missing,
                });
            }

            debug!(table, columns = columns.len(), "Verified table schema");
        }

        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ClimateStore for SqliteClimateStore {
    #[instrument(skip(self))]
    async fn precipitation_for_station(
        &self,
        station: &str,
    ) -> ClimateResult<Vec<PrecipitationRecord>> {
        let rows = sqlx::query_as::<_, PrecipitationRow>(
            "SELECT date, CAST(prcp AS REAL) AS prcp FROM measurement WHERE station = ?1",
        )
        .bind(station)
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Fetched precipitation");
        Ok(rows.into_iter().map(PrecipitationRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn station_names(&self) -> ClimateResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM station")
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = names.len(), "Fetched station names");
        Ok(names)
    }

    #[instrument(skip(self))]
    async fn temperatures_for_station_after(
        &self,
        station: &str,
        after: &str,
    ) -> ClimateResult<Vec<TemperatureRecord>> {
        let rows = sqlx::query_as::<_, TemperatureRow>(
            "SELECT date, CAST(tobs AS REAL) AS tobs FROM measurement WHERE station = ?1 AND date > ?2",
        )
        .bind(station)
        .bind(after)
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Fetched temperature observations");
        Ok(rows.into_iter().map(TemperatureRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn temperature_summary(
        &self,
        range: &SummaryRange,
    ) -> ClimateResult<Vec<TemperatureSummary>> {
        let sql = match range.end {
            Some(_) => format!(
                "{} AND m.date <= ?2 GROUP BY s.name",
                SUMMARY_SELECT
            ),
            None => format!("{} GROUP BY s.name", SUMMARY_SELECT),
        };

        let mut query = sqlx::query_as::<_, SummaryRow>(&sql).bind(&range.start);
        if let Some(ref end) = range.end {
            query = query.bind(end);
        }

        let rows = query.fetch_all(&self.pool).await?;

        debug!(groups = rows.len(), "Computed temperature summary");
        Ok(rows.into_iter().map(TemperatureSummary::from).collect())
    }
}
