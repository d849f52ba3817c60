//! WebSocket connection handlers
//!
//! `/ws` streams every arrived event to the client; `/ws/ingest` is the remote
//! push channel into the store. Both exchange the plain wire event object
//! `{id, type, message, timestamp, source}` as JSON text frames, one event per
//! frame, with no envelope.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use tokio::sync::broadcast;

use super::state::AppState;
use crate::types::Event;

/// Upgrade handler for the subscriber feed at `/ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_subscriber(socket, state))
}

/// Upgrade handler for the inbound push channel at `/ws/ingest`
pub async fn ingest_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_ingest(socket, state))
}

async fn handle_subscriber(mut socket: WebSocket, state: Arc<AppState>) {
    let mut rx = state.subscribe();

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if let Ok(json) = serde_json::to_string(&event) {
                            if socket.send(Message::Text(json)).await.is_err() {
                                break; // Client disconnected
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Slow client; it keeps the connection and refetches
                        // the snapshot on its own schedule.
                        tracing::debug!(missed, "subscriber lagged behind the event feed");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = socket.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {} // Subscribers have nothing else to say
                }
            }
        }
    }
}

async fn handle_ingest(mut socket: WebSocket, state: Arc<AppState>) {
    while let Some(result) = socket.recv().await {
        match result {
            Ok(Message::Text(text)) => ingest_frame(&state, &text),
            Ok(Message::Ping(data)) => {
                let _ = socket.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {} // Binary and pong frames are ignored
        }
    }
}

/// Apply one inbound text frame; malformed frames never reach the store and
/// the connection keeps reading.
fn ingest_frame(state: &AppState, text: &str) {
    match serde_json::from_str::<Event>(text) {
        Ok(event) => state.ingest(event),
        Err(e) => {
            tracing::debug!(error = %e, "dropping malformed ingest frame");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EventStore;

    #[test]
    fn test_ingest_frame_drops_malformed_and_keeps_accepting() {
        let state = AppState::new(Arc::new(EventStore::new()));

        ingest_frame(&state, "{not json");
        ingest_frame(
            &state,
            r#"{"id":"evt-1","type":"fatal","message":"m","timestamp":1,"source":"s"}"#,
        );
        ingest_frame(
            &state,
            r#"{"id":"evt-2","type":"info","message":"pushed","timestamp":5,"source":"remote"}"#,
        );

        let events = state.store.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "evt-2");
        assert_eq!(events[0].source, "remote");
    }

    #[tokio::test]
    async fn test_ingest_frame_fans_out_to_subscribers() {
        let state = AppState::new(Arc::new(EventStore::new()));
        let mut rx = state.subscribe();

        ingest_frame(
            &state,
            r#"{"id":"evt-1","type":"warning","message":"m","timestamp":1,"source":"s"}"#,
        );

        assert_eq!(rx.recv().await.unwrap().id, "evt-1");
    }
}
