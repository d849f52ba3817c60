//! Event endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::ApiError;
use crate::api::websocket::state::AppState;
use crate::types::Event;

/// GET /api/events - The current filtered view, newest first
pub async fn list_events(State(state): State<Arc<AppState>>) -> Json<Vec<Event>> {
    Json(state.store.filtered_events())
}

/// GET /api/events/:id - Detail lookup for one retained event.
///
/// 404 once the event has been evicted; callers treat that as "nothing to
/// display".
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.event_by_id(&id) {
        Some(event) => (StatusCode::OK, Json(event)).into_response(),
        None => {
            let error = ApiError::not_found(format!("Event '{}' not found", id));
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
    }
}

/// POST /api/events - Bulk replace from a JSON array (initial snapshot load)
pub async fn replace_events(
    State(state): State<Arc<AppState>>,
    Json(events): Json<Vec<Event>>,
) -> StatusCode {
    state.store.set_events(events);
    StatusCode::NO_CONTENT
}

/// DELETE /api/events - Empty the working set and clear the selection
pub async fn clear_events(State(state): State<Arc<AppState>>) -> StatusCode {
    state.store.clear_events();
    StatusCode::NO_CONTENT
}

/// GET /api/sources - Distinct source labels among retained events, sorted
pub async fn list_sources(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.store.sources())
}
