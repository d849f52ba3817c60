//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{events, filters, generator};
use super::websocket::{handler::ingest_handler, handler::ws_handler, state::AppState};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoints
        .route("/ws", get(ws_handler))
        .route("/ws/ingest", get(ingest_handler))
        // Health check
        .route("/health", get(health_check))
        // REST API endpoints
        .route(
            "/api/events",
            get(events::list_events)
                .post(events::replace_events)
                .delete(events::clear_events),
        )
        .route("/api/events/:id", get(events::get_event))
        .route("/api/sources", get(events::list_sources))
        .route(
            "/api/filters",
            get(filters::get_filters).put(filters::put_filters),
        )
        .route("/api/filters/types/:type/toggle", post(filters::toggle_type))
        .route(
            "/api/selection",
            get(filters::get_selection).put(filters::put_selection),
        )
        .route("/api/generator", get(generator::get_status))
        .route("/api/generator/start", post(generator::start))
        .route("/api/generator/stop", post(generator::stop))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
