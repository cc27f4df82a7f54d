//! Error types for the climate crate.

use thiserror::Error;

/// Result type alias for climate operations.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Errors that can occur while opening or querying the dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClimateError {
    /// The dataset could not be opened.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A required table or column is missing from the dataset.
    #[error("Schema mismatch in table '{table}': missing {}", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },

    /// A query failed while executing.
    #[error("Query failed: {0}")]
    QueryError(String),

    /// A date path segment is not a valid `YYYY-MM-DD` date.
    #[error("Invalid date '{value}': {reason}. Expected YYYY-MM-DD")]
    InvalidDate { value: String, reason: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ClimateError {
    pub fn invalid_date(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidDate {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the caller sent bad input rather than the store failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClimateError::InvalidDate { .. })
    }
}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for ClimateError {
    fn from(err: sqlx::Error) -> Self {
        ClimateError::QueryError(err.to_string())
    }
}
