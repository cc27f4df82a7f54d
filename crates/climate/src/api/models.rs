//! API response models.
//!
//! Successful responses serialize the domain records in `crate::types`
//! directly; only the error body and the index page live here.

use serde::{Deserialize, Serialize};

/// Error body for 400 / 500 responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Body of `GET /`.
pub const ROUTE_INDEX_HTML: &str = concat!(
    "Available Routes:<br/>",
    "/api/v1.0/precipitation<br/>",
    "/api/v1.0/stations<br/>",
    "/api/v1.0/tobs<br/>",
    "/api/v1.0/&lt;start date&gt;<br/>",
    "/api/v1.0/&lt;start date&gt;/&lt;end date&gt;<br/>",
    "<i>where dates are YYYY-MM-DD</i>",
);
