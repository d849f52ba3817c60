//! WebSocket endpoints for the live event feed
//!
//! `/ws` pushes each arrived event to connected dashboard clients;
//! `/ws/ingest` accepts events pushed by remote producers.

pub mod handler;
pub mod state;

pub use handler::{ingest_handler, ws_handler};
pub use state::AppState;
