//! Event Deck - live event dashboard backend
//!
//! Ingests a continuous stream of timestamped events from interchangeable
//! sources (a synthetic local generator or a remote push channel), keeps a
//! bounded in-memory working set of the most recent 10,000, and exposes it
//! through a live multi-predicate filter view plus single-item selection.
//! Filter preferences survive restarts; events are session-only.
//!
//! # Modules
//!
//! - `types`: Core data structures (Event, EventType, EventMeta)
//! - `store`: The bounded event store with filtering and selection
//! - `prefs`: Persisted filter preferences
//! - `generator`: Synthetic local event source and the sample dataset
//! - `api`: REST and WebSocket surface
//! - `utils`: Utility functions (atomic writes, timestamps)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use event_deck::{create_router, AppState, EventStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(EventStore::with_prefs_path("filter_prefs.json"));
//!     let state = Arc::new(AppState::new(store));
//!     let app = create_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod api;
pub mod generator;
pub mod prefs;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use generator::{sample_events, EventGenerator, GeneratorConfig};
pub use prefs::FilterPrefs;
pub use store::{EventStore, MAX_EVENTS};
pub use types::{DeckResult, Event, EventMeta, EventType, NEW_EVENT_WINDOW_MS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
