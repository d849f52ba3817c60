//! REST API module for HTTP endpoints
//!
//! Provides the dashboard's read and mutation surface over the store:
//! - `GET /api/events` - Filtered view, newest first
//! - `GET /api/events/:id` - Single event detail
//! - `POST /api/events` - Bulk replace from a JSON array
//! - `DELETE /api/events` - Clear the working set
//! - `GET /api/sources` - Distinct source labels
//! - `GET /api/filters` / `PUT /api/filters` - Filter fields
//! - `POST /api/filters/types/:type/toggle` - Flip one type predicate
//! - `GET /api/selection` / `PUT /api/selection` - Detail selection
//! - `GET /api/generator` / `POST /api/generator/{start,stop}` - Local source
//!
//! List responses are plain JSON arrays of the wire event shape so the bulk
//! transport round-trips losslessly.

pub mod events;
pub mod filters;
pub mod generator;

use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "NOT_FOUND".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }
}
