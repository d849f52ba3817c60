//! Local generator control endpoints
//!
//! The dashboard's control panel starts and stops the synthetic source; while
//! running, every generated event flows through the store and the broadcast
//! feed exactly like a remotely pushed one.

use std::sync::{Arc, Weak};

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::websocket::state::AppState;
use crate::generator::GeneratorConfig;

/// Optional delay overrides for POST /api/generator/start
#[derive(Debug, Default, Deserialize)]
pub struct GeneratorOptions {
    #[serde(rename = "minDelayMs")]
    pub min_delay_ms: Option<u64>,
    #[serde(rename = "maxDelayMs")]
    pub max_delay_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct GeneratorStatus {
    pub running: bool,
    #[serde(rename = "minDelayMs")]
    pub min_delay_ms: u64,
    #[serde(rename = "maxDelayMs")]
    pub max_delay_ms: u64,
}

fn status_of(generator: &crate::generator::EventGenerator) -> GeneratorStatus {
    let config = generator.config();
    GeneratorStatus {
        running: generator.is_running(),
        min_delay_ms: config.min_delay_ms,
        max_delay_ms: config.max_delay_ms,
    }
}

/// GET /api/generator - Current generator status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<GeneratorStatus> {
    Json(status_of(&state.generator.lock()))
}

/// POST /api/generator/start - Start the local source; no-op while running
pub async fn start(
    State(state): State<Arc<AppState>>,
    options: Option<Json<GeneratorOptions>>,
) -> Json<GeneratorStatus> {
    let options = options.map(|Json(options)| options).unwrap_or_default();

    let mut generator = state.generator.lock();
    if generator.is_running() {
        // The live loop keeps its bounds; overrides only apply on a fresh start.
        return Json(status_of(&generator));
    }

    let current = generator.config();
    generator.configure(GeneratorConfig {
        min_delay_ms: options.min_delay_ms.unwrap_or(current.min_delay_ms),
        max_delay_ms: options.max_delay_ms.unwrap_or(current.max_delay_ms),
    });

    // Weak handle: the state owns the generator task, not the other way round.
    let weak: Weak<AppState> = Arc::downgrade(&state);
    generator.start(move |event| {
        if let Some(state) = weak.upgrade() {
            state.ingest(event);
        }
    });

    Json(status_of(&generator))
}

/// POST /api/generator/stop - Stop the local source; already-applied state stays
pub async fn stop(State(state): State<Arc<AppState>>) -> Json<GeneratorStatus> {
    let mut generator = state.generator.lock();
    generator.stop();
    Json(status_of(&generator))
}
