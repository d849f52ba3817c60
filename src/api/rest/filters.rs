//! Filter and selection endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::api::websocket::state::AppState;
use crate::prefs::FilterPrefs;
use crate::types::Event;

/// GET /api/filters - Current filter fields
pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FilterPrefs> {
    Json(state.store.filters())
}

/// PUT /api/filters - Replace all filter fields at once.
///
/// Missing fields fall back to their defaults (all types, no source, empty
/// query), matching the persisted-blob shape.
pub async fn put_filters(
    State(state): State<Arc<AppState>>,
    Json(prefs): Json<FilterPrefs>,
) -> StatusCode {
    state.store.set_selected_types(prefs.selected_types);
    state.store.set_selected_source(prefs.selected_source);
    state.store.set_message_query(prefs.message_query);
    StatusCode::NO_CONTENT
}

/// POST /api/filters/types/:type/toggle - Flip one type in the selected set
pub async fn toggle_type(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> impl IntoResponse {
    match kind.parse() {
        Ok(kind) => {
            state.store.toggle_event_type(kind);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(message) => {
            let error = ApiError::bad_request(message);
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        }
    }
}

/// Body for PUT /api/selection; `{"id": null}` closes the detail view
#[derive(Debug, Deserialize)]
pub struct SelectionUpdate {
    pub id: Option<String>,
}

/// Current selection plus the resolved event, when still retained
#[derive(Debug, Serialize)]
pub struct SelectionView {
    #[serde(rename = "selectedEventId")]
    pub selected_event_id: Option<String>,
    /// `null` when nothing is selected or the event was evicted
    pub event: Option<Event>,
}

/// GET /api/selection
pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<SelectionView> {
    Json(SelectionView {
        selected_event_id: state.store.selected_event_id(),
        event: state.store.selected_event(),
    })
}

/// PUT /api/selection - Select an event for detail inspection, or clear.
///
/// Ids that are not (or no longer) retained are accepted; lookup simply
/// resolves to nothing.
pub async fn put_selection(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SelectionUpdate>,
) -> StatusCode {
    state.store.select_event(update.id);
    StatusCode::NO_CONTENT
}
