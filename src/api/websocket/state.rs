//! Shared application state for the API surface

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::generator::EventGenerator;
use crate::store::EventStore;
use crate::types::Event;

/// State handed to every HTTP and WebSocket handler
pub struct AppState {
    /// The event store
    pub store: Arc<EventStore>,

    /// Broadcast channel fanning arrived events out to subscribed clients
    pub event_tx: broadcast::Sender<Event>,

    /// The local synthetic source, controlled via the generator endpoints
    pub generator: Mutex<EventGenerator>,
}

impl AppState {
    pub fn new(store: Arc<EventStore>) -> Self {
        // Buffer 1024 events - subscribers that fall further behind miss
        // events and are expected to refetch the snapshot.
        let (event_tx, _) = broadcast::channel(1024);

        Self {
            store,
            event_tx,
            generator: Mutex::new(EventGenerator::new()),
        }
    }

    /// Apply one arrived event atomically and fan it out to subscribers
    pub fn ingest(&self, event: Event) {
        self.store.add_event(event.clone());
        // Send errors just mean nobody is subscribed.
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to the live event feed
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventType;

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            kind: EventType::Info,
            message: "hello".to_string(),
            timestamp: 10,
            source: "test-source".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ingest_stores_and_broadcasts() {
        let state = AppState::new(Arc::new(EventStore::new()));
        let mut rx = state.subscribe();

        state.ingest(event("event-1"));

        assert_eq!(state.store.len(), 1);
        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, "event-1");
    }

    #[tokio::test]
    async fn test_ingest_without_subscribers_is_fine() {
        let state = AppState::new(Arc::new(EventStore::new()));
        state.ingest(event("event-1"));
        assert_eq!(state.store.len(), 1);
    }
}
