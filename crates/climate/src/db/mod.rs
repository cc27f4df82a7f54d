//! Database layer for the climate dataset.
//!
//! Provides the SQLite-backed implementation of the `ClimateStore` trait over
//! the pre-populated `station` / `measurement` tables.

pub mod models;
pub mod sqlite;

pub use models::*;
pub use sqlite::SqliteClimateStore;
