//! End-to-end tests for the climate routes over an in-memory SQLite dataset.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use climate::{
    climate_routes, ClimateApiState, ClimateError, ClimateService, ClimateStore,
    SqliteClimateStore, TemperatureSummary,
};
use config::{DateValidation, ReferenceConfig};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

const SCHEMA: &str = r#"
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
"#;

const SEED: &str = r#"
    INSERT INTO station (station, name, latitude, longitude, elevation) VALUES
        ('USC00519281', 'WAIHEE 837.5, HI US', 21.45167, -157.84889, 32.9),
        ('USC00519397', 'WAIKIKI 717.2, HI US', 21.2716, -157.8168, 3.0),
        ('USC00518838', 'UPPER WAHIAWA 874.3, HI US', 21.4992, -158.0111, 306.6);
    INSERT INTO measurement (station, date, prcp, tobs) VALUES
        ('USC00519281', '2016-08-17', 0.01, 78),
        ('USC00519281', '2016-08-18', 0.06, 80),
        ('USC00519281', '2016-08-19', NULL, 79),
        ('USC00519397', '2016-08-19', 0.0, 81),
        ('USC00519397', '2017-08-23', 0.0, 81),
        ('USC00519281', '2017-08-18', 0.0, 76);
"#;

async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

async fn seeded_store(seed: &str) -> SqliteClimateStore {
    let pool = memory_pool().await;
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
    sqlx::raw_sql(seed).execute(&pool).await.unwrap();

    let store = SqliteClimateStore::from_pool(pool);
    store.verify_schema().await.unwrap();
    store
}

fn app_for(store: SqliteClimateStore, date_validation: DateValidation) -> Router {
    let reference = ReferenceConfig {
        station: "USC00519281".to_string(),
        date: "2017-08-18".to_string(),
    };
    let service = ClimateService::new(Arc::new(store), &reference, date_validation).unwrap();
    climate_routes(Arc::new(ClimateApiState::new(Arc::new(service))))
}

async fn test_app(date_validation: DateValidation) -> Router {
    app_for(seeded_store(SEED).await, date_validation)
}

/// Writable connection that creates a rollback-journal database file.
async fn file_writer(path: &Path) -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Delete),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get(app, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_index_lists_routes() {
    let app = test_app(DateValidation::Strict).await;

    let (status, bytes) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);

    let body = String::from_utf8(bytes).unwrap();
    assert!(body.starts_with("Available Routes:<br/>"));
    assert!(body.contains("/api/v1.0/precipitation<br/>"));
    assert!(body.contains("/api/v1.0/&lt;start date&gt;/&lt;end date&gt;<br/>"));
    assert!(body.ends_with("<i>where dates are YYYY-MM-DD</i>"));
}

#[tokio::test]
async fn test_precipitation_is_reference_station_only() {
    let app = test_app(DateValidation::Strict).await;

    let (status, body) = get_json(&app, "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0], serde_json::json!({"date": "2016-08-17", "prcp": 0.01}));
    assert_eq!(records[2], serde_json::json!({"date": "2016-08-19", "prcp": null}));
    assert!(records.iter().all(|r| r["date"] != "2017-08-23"));
}

#[tokio::test]
async fn test_stations_lists_every_row() {
    let app = test_app(DateValidation::Strict).await;

    let (status, body) = get_json(&app, "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            "WAIHEE 837.5, HI US",
            "WAIKIKI 717.2, HI US",
            "UPPER WAHIAWA 874.3, HI US"
        ])
    );
}

#[tokio::test]
async fn test_tobs_is_strictly_after_lookback() {
    let app = test_app(DateValidation::Strict).await;

    let (status, body) = get_json(&app, "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            {"date": "2016-08-19", "tobs": 79.0},
            {"date": "2017-08-18", "tobs": 76.0}
        ])
    );
}

#[tokio::test]
async fn test_summary_from_start() {
    let app = test_app(DateValidation::Strict).await;

    let (status, bytes) = get(&app, "/api/v1.0/2016-08-18").await;
    assert_eq!(status, StatusCode::OK);

    let summaries: Vec<TemperatureSummary> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(summaries.len(), 2);

    let waihee = &summaries[0];
    assert_eq!(waihee.station_name, "WAIHEE 837.5, HI US");
    assert_eq!(waihee.count_tobs, 3);
    assert_eq!(waihee.min_tobs, Some(76.0));
    assert_eq!(waihee.max_tobs, Some(80.0));

    let waikiki = &summaries[1];
    assert_eq!(waikiki.station_name, "WAIKIKI 717.2, HI US");
    assert_eq!(waikiki.count_tobs, 2);

    // No observations for UPPER WAHIAWA at all
    assert!(summaries
        .iter()
        .all(|s| s.station_name != "UPPER WAHIAWA 874.3, HI US"));
}

#[tokio::test]
async fn test_summary_between_dates() {
    let app = test_app(DateValidation::Strict).await;

    let (status, body) = get_json(&app, "/api/v1.0/2016-08-18/2016-08-19").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            {
                "station_name": "WAIHEE 837.5, HI US",
                "min_tobs": 79.0,
                "avg_tobs": 79.5,
                "max_tobs": 80.0,
                "count_tobs": 2
            },
            {
                "station_name": "WAIKIKI 717.2, HI US",
                "min_tobs": 81.0,
                "avg_tobs": 81.0,
                "max_tobs": 81.0,
                "count_tobs": 1
            }
        ])
    );
}

#[tokio::test]
async fn test_summary_two_observation_scenario() {
    let store = seeded_store(
        r#"
        INSERT INTO station (station, name) VALUES ('A', 'STATION A');
        INSERT INTO measurement (station, date, prcp, tobs) VALUES
            ('A', '2017-01-01', NULL, 60),
            ('A', '2017-01-05', NULL, 70);
        "#,
    )
    .await;
    let app = app_for(store, DateValidation::Strict);

    let (status, body) = get_json(&app, "/api/v1.0/2017-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([{
            "station_name": "STATION A",
            "min_tobs": 60.0,
            "avg_tobs": 65.0,
            "max_tobs": 70.0,
            "count_tobs": 2
        }])
    );
}

#[tokio::test]
async fn test_summary_merges_stations_sharing_a_name() {
    let store = seeded_store(
        r#"
        INSERT INTO station (station, name) VALUES
            ('A1', 'TWIN PEAKS, HI US'),
            ('A2', 'TWIN PEAKS, HI US'),
            ('B', 'VALLEY, HI US');
        INSERT INTO measurement (station, date, prcp, tobs) VALUES
            ('A1', '2017-01-01', NULL, 60),
            ('A1', '2017-01-02', NULL, 62),
            ('A2', '2017-01-01', NULL, 70),
            ('B', '2017-01-01', NULL, 75);
        "#,
    )
    .await;
    let app = app_for(store, DateValidation::Strict);

    let (status, body) = get_json(&app, "/api/v1.0/2017-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            {
                "station_name": "TWIN PEAKS, HI US",
                "min_tobs": 60.0,
                "avg_tobs": 64.0,
                "max_tobs": 70.0,
                "count_tobs": 3
            },
            {
                "station_name": "VALLEY, HI US",
                "min_tobs": 75.0,
                "avg_tobs": 75.0,
                "max_tobs": 75.0,
                "count_tobs": 1
            }
        ])
    );
}

#[tokio::test]
async fn test_missing_temperature_is_null() {
    let store = seeded_store(
        r#"
        INSERT INTO station (station, name) VALUES ('USC00519281', 'WAIHEE 837.5, HI US');
        INSERT INTO measurement (station, date, prcp, tobs) VALUES
            ('USC00519281', '2017-01-01', 0.1, 70),
            ('USC00519281', '2017-01-02', 0.2, NULL);
        "#,
    )
    .await;
    let app = app_for(store, DateValidation::Strict);

    let (status, body) = get_json(&app, "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            {"date": "2017-01-01", "tobs": 70.0},
            {"date": "2017-01-02", "tobs": null}
        ])
    );

    let (status, body) = get_json(&app, "/api/v1.0/2017-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["count_tobs"], 1);
    assert_eq!(body[0]["avg_tobs"], 70.0);
}

#[tokio::test]
async fn test_inverted_range_is_empty() {
    let app = test_app(DateValidation::Strict).await;

    let (status, body) = get_json(&app, "/api/v1.0/2017-08-23/2016-08-18").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let app = test_app(DateValidation::Strict).await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2016-08-18",
        "/api/v1.0/2016-08-18/2017-01-01",
    ] {
        let (_, first) = get(&app, uri).await;
        let (_, second) = get(&app, uri).await;
        assert_eq!(first, second, "{uri} changed between requests");
    }
}

#[tokio::test]
async fn test_strict_mode_rejects_malformed_date() {
    let app = test_app(DateValidation::Strict).await;

    let (status, body) = get_json(&app, "/api/v1.0/2017-13-45").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("2017-13-45"));

    let (status, _) = get_json(&app, "/api/v1.0/2016-08-18/later").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_strict_mode_canonicalizes_unpadded_date() {
    let app = test_app(DateValidation::Strict).await;

    let (_, padded) = get(&app, "/api/v1.0/2016-08-18").await;
    let (status, unpadded) = get(&app, "/api/v1.0/2016-8-18").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(padded, unpadded);
}

#[tokio::test]
async fn test_lexical_mode_passes_date_through() {
    let app = test_app(DateValidation::Lexical).await;

    let (status, body) = get_json(&app, "/api/v1.0/2017-13-45").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));

    // Plain string comparison: "2016-9" sorts after every "2016-08-.." date
    let (status, body) = get_json(&app, "/api/v1.0/2016-9").await;
    assert_eq!(status, StatusCode::OK);
    let summaries = body.as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["count_tobs"], 1);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let store = seeded_store(SEED).await;
    let pool = store.pool().clone();
    let app = app_for(store, DateValidation::Strict);

    pool.close().await;

    let (status, body) = get_json(&app, "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Failed to list stations"));
}

#[tokio::test]
async fn test_open_rejects_dataset_without_measurement_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.sqlite");

    let writer = file_writer(&path).await;
    sqlx::raw_sql("CREATE TABLE station (station TEXT, name TEXT);")
        .execute(&writer)
        .await
        .unwrap();
    writer.close().await;

    let err = SqliteClimateStore::open(&path, 1).await.unwrap_err();
    assert!(matches!(
        err,
        ClimateError::SchemaMismatch { ref table, .. } if table == "measurement"
    ));
}

#[tokio::test]
async fn test_open_reads_existing_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");

    let writer = file_writer(&path).await;
    sqlx::raw_sql(SCHEMA).execute(&writer).await.unwrap();
    sqlx::raw_sql(SEED).execute(&writer).await.unwrap();
    writer.close().await;

    let store = SqliteClimateStore::open(&path, 2).await.unwrap();
    assert_eq!(store.station_count().await.unwrap(), 3);
    store.close().await;
}
