//! Data types for the event dashboard backend
//!
//! This module contains the core data structures shared by the store, the
//! event sources, and the API surface.

mod event;

pub use event::{Event, EventMeta, EventType, NEW_EVENT_WINDOW_MS};

/// Result type for fallible operations outside the store core
pub type DeckResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
