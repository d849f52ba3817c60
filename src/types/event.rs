//! Event and per-event metadata types
//!
//! The wire representation is the flat JSON object
//! `{id, type, message, timestamp, source}` exchanged over both the bulk-fetch
//! and push-channel transports.

use serde::{Deserialize, Serialize};

/// How long (in milliseconds) an event counts as "new" after entering the store
pub const NEW_EVENT_WINDOW_MS: i64 = 5_000;

/// Severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Info,
    Warning,
    Error,
}

impl EventType {
    /// All known event types, in display order
    pub const ALL: [EventType; 3] = [EventType::Info, EventType::Warning, EventType::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Info => "info",
            EventType::Warning => "warning",
            EventType::Error => "error",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(EventType::Info),
            "warning" => Ok(EventType::Warning),
            "error" => Ok(EventType::Error),
            other => Err(format!("unknown event type: {}", other)),
        }
    }
}

/// An immutable record of something that happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique token; the uniqueness key (timestamps may collide)
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub message: String,
    /// Milliseconds since the Unix epoch, producer-assigned
    pub timestamp: i64,
    /// Free-text origin label
    pub source: String,
}

/// Store-assigned arrival metadata for one retained event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMeta {
    /// Wall-clock time (ms) the event entered the store, not the event's own timestamp
    pub added_at: i64,
}

impl EventMeta {
    pub fn new(added_at: i64) -> Self {
        Self { added_at }
    }

    /// Whether the event still counts as "new" at the given instant.
    ///
    /// Computed lazily at read time; the store never demotes an event, so the
    /// flag silently expires once the window elapses.
    pub fn is_new(&self, now_ms: i64) -> bool {
        now_ms - self.added_at < NEW_EVENT_WINDOW_MS
    }
}
