//! Event Deck Server - Binary Entry Point

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use event_deck::api::{create_router, AppState};
use event_deck::generator::sample_events;
use event_deck::store::EventStore;
use event_deck::types::DeckResult;
use event_deck::utils::time::now_millis;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_PREFS_PATH: &str = "filter_prefs.json";

#[tokio::main]
async fn main() -> DeckResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let prefs_path = std::env::var("EVENT_DECK_PREFS_PATH")
        .unwrap_or_else(|_| DEFAULT_PREFS_PATH.to_string());
    let store = Arc::new(EventStore::with_prefs_path(prefs_path));

    // Seed the working set with the fallback snapshot; a real deployment
    // replaces it through POST /api/events or the push channel.
    store.set_events(sample_events(now_millis()));

    let state = Arc::new(AppState::new(store));
    let app = create_router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "event deck server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
