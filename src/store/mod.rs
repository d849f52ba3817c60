//! Event store - the canonical bounded event collection
//!
//! The store owns the ordered event sequence, per-event arrival metadata, the
//! cached source set, the filter fields, and the detail selection. Every
//! mutation runs inside one mutex critical section so readers never observe a
//! partially-updated aggregate (events changed but sources stale, metadata out
//! of sync, and so on).

mod mutate;
mod view;

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::prefs::FilterPrefs;
use crate::types::{Event, EventMeta, EventType};
use crate::utils::time::now_millis;

/// Maximum number of events retained in memory
pub const MAX_EVENTS: usize = 10_000;

/// The full mutable aggregate guarded by the store's lock
#[derive(Debug)]
pub(crate) struct StoreState {
    /// Retained events, descending by timestamp (newest at the front)
    pub(crate) events: VecDeque<Event>,
    /// Arrival metadata, keyed by event id; key set always equals the id set of `events`
    pub(crate) events_meta: HashMap<String, EventMeta>,
    /// Occurrence count per source label across retained events.
    /// A count map instead of a set so eviction keeps the distinct-source set exact.
    pub(crate) source_counts: HashMap<String, usize>,

    pub(crate) selected_types: HashSet<EventType>,
    pub(crate) selected_source: Option<String>,
    pub(crate) message_query: String,

    pub(crate) selected_event_id: Option<String>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
            events_meta: HashMap::new(),
            source_counts: HashMap::new(),
            selected_types: EventType::ALL.into_iter().collect(),
            selected_source: None,
            message_query: String::new(),
            selected_event_id: None,
        }
    }
}

/// Bounded in-memory event store with live filtering and detail selection.
///
/// Constructed explicitly and shared by `Arc`; the host application controls
/// its lifecycle. Filter preferences survive restarts when a prefs path is
/// configured; events, metadata, sources, and the selection are session-only.
pub struct EventStore {
    prefs_path: Option<PathBuf>,
    state: Mutex<StoreState>,
}

impl EventStore {
    /// Create an in-memory store with default filters and no persistence
    pub fn new() -> Self {
        Self {
            prefs_path: None,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Create a store that loads and persists filter preferences at `path`.
    ///
    /// A missing or unreadable prefs file yields the defaults; it is never an
    /// error.
    pub fn with_prefs_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs = crate::prefs::load(&path);

        let state = StoreState {
            selected_types: prefs.selected_types,
            selected_source: prefs.selected_source,
            message_query: prefs.message_query,
            ..StoreState::default()
        };

        Self {
            prefs_path: Some(path),
            state: Mutex::new(state),
        }
    }

    // ---- Mutations (the sole mutation surface; see mutate.rs) ----

    /// Insert one newly arrived event as logically the most recent
    pub fn add_event(&self, event: Event) {
        mutate::add_event(self, event);
    }

    /// Bulk replace: sort descending by timestamp, keep the newest 10,000
    pub fn set_events(&self, events: Vec<Event>) {
        mutate::set_events(self, events);
    }

    /// Empty events, metadata, and sources; clear the selection. Idempotent.
    pub fn clear_events(&self) {
        mutate::clear_events(self);
    }

    pub fn set_selected_types(&self, types: HashSet<EventType>) {
        mutate::set_selected_types(self, types);
    }

    /// Flip membership of one type in the selected set
    pub fn toggle_event_type(&self, kind: EventType) {
        mutate::toggle_event_type(self, kind);
    }

    pub fn set_selected_source(&self, source: Option<String>) {
        mutate::set_selected_source(self, source);
    }

    pub fn set_message_query(&self, query: String) {
        mutate::set_message_query(self, query);
    }

    /// Set or clear (with `None`) the detail-view selection
    pub fn select_event(&self, id: Option<String>) {
        mutate::select_event(self, id);
    }

    // ---- Reads ----

    /// Snapshot of all retained events, newest first
    pub fn events(&self) -> Vec<Event> {
        self.state.lock().events.iter().cloned().collect()
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.state.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().events.is_empty()
    }

    /// Distinct source labels across retained events, sorted
    pub fn sources(&self) -> Vec<String> {
        let state = self.state.lock();
        let mut sources: Vec<String> = state.source_counts.keys().cloned().collect();
        sources.sort();
        sources
    }

    /// Current filter fields as a preferences snapshot
    pub fn filters(&self) -> FilterPrefs {
        let state = self.state.lock();
        FilterPrefs {
            selected_types: state.selected_types.clone(),
            selected_source: state.selected_source.clone(),
            message_query: state.message_query.clone(),
        }
    }

    pub fn selected_event_id(&self) -> Option<String> {
        self.state.lock().selected_event_id.clone()
    }

    /// Arrival metadata for one event id
    pub fn meta(&self, id: &str) -> Option<EventMeta> {
        self.state.lock().events_meta.get(id).copied()
    }

    /// Snapshot of all arrival metadata, keyed by event id
    pub fn metas(&self) -> HashMap<String, EventMeta> {
        self.state.lock().events_meta.clone()
    }

    /// Whether the event entered the store within the last five seconds.
    ///
    /// Pure point-in-time classification; there is no timer demoting events.
    pub fn is_new(&self, id: &str) -> bool {
        let now = now_millis();
        self.state
            .lock()
            .events_meta
            .get(id)
            .map(|meta| meta.is_new(now))
            .unwrap_or(false)
    }

    /// Events matching all active filter predicates, newest first
    pub fn filtered_events(&self) -> Vec<Event> {
        view::filtered_events(&self.state.lock())
    }

    /// Look up one retained event by id; `None` once it has been evicted
    pub fn event_by_id(&self, id: &str) -> Option<Event> {
        view::event_by_id(&self.state.lock(), id)
    }

    /// The event currently open in the detail view, if it is still retained
    pub fn selected_event(&self) -> Option<Event> {
        let state = self.state.lock();
        state
            .selected_event_id
            .as_deref()
            .and_then(|id| view::event_by_id(&state, id))
    }

    /// Write the current filter fields through to the prefs file, if configured.
    ///
    /// Fire-and-forget: a failed write never fails the mutation that triggered
    /// it.
    fn persist_prefs(&self, prefs: FilterPrefs) {
        if let Some(path) = &self.prefs_path {
            if let Err(e) = crate::prefs::save(path, &prefs) {
                tracing::warn!(path = %path.display(), error = %e, "failed to persist filter prefs");
            }
        }
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}
