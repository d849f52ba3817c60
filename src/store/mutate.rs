//! Mutation operations for the event store
//!
//! Every function here holds the store lock for its entire read-modify-write
//! sequence, so the cross-field invariants (sort order, meta/event
//! correspondence, exact source set) hold before any reader can interleave.

use std::collections::{HashSet, VecDeque};

use crate::prefs::FilterPrefs;
use crate::types::{Event, EventMeta, EventType};
use crate::utils::time::now_millis;

use super::{EventStore, StoreState, MAX_EVENTS};

/// Insert one arrived event as logically the most recent.
///
/// Duplicate ids are not rejected: a repeated id produces a second entry in
/// the sequence and overwrites the shared metadata entry for that id. The
/// caller is responsible for id uniqueness upstream.
pub(super) fn add_event(store: &EventStore, event: Event) {
    let mut state = store.state.lock();
    let now = now_millis();

    state
        .events_meta
        .insert(event.id.clone(), EventMeta::new(now));
    *state.source_counts.entry(event.source.clone()).or_insert(0) += 1;
    insert_descending(&mut state.events, event);

    while state.events.len() > MAX_EVENTS {
        evict_oldest(&mut state);
    }
}

/// Bulk replace with a fresh snapshot.
///
/// Sorts descending by timestamp, keeps the newest 10,000, and rebuilds
/// metadata and sources from scratch. Arrival time resets for every retained
/// event: a full reload is treated as "all new".
pub(super) fn set_events(store: &EventStore, events: Vec<Event>) {
    let mut state = store.state.lock();
    let now = now_millis();

    let mut sorted = events;
    sorted.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
    sorted.truncate(MAX_EVENTS);

    state.events_meta.clear();
    state.source_counts.clear();
    for event in &sorted {
        state
            .events_meta
            .insert(event.id.clone(), EventMeta::new(now));
        *state.source_counts.entry(event.source.clone()).or_insert(0) += 1;
    }
    state.events = sorted.into();
}

pub(super) fn clear_events(store: &EventStore) {
    let mut state = store.state.lock();
    state.events.clear();
    state.events_meta.clear();
    state.source_counts.clear();
    state.selected_event_id = None;
}

pub(super) fn set_selected_types(store: &EventStore, types: HashSet<EventType>) {
    let prefs = {
        let mut state = store.state.lock();
        state.selected_types = types;
        snapshot_prefs(&state)
    };
    store.persist_prefs(prefs);
}

pub(super) fn toggle_event_type(store: &EventStore, kind: EventType) {
    let prefs = {
        let mut state = store.state.lock();
        if !state.selected_types.remove(&kind) {
            state.selected_types.insert(kind);
        }
        snapshot_prefs(&state)
    };
    store.persist_prefs(prefs);
}

pub(super) fn set_selected_source(store: &EventStore, source: Option<String>) {
    let prefs = {
        let mut state = store.state.lock();
        state.selected_source = source;
        snapshot_prefs(&state)
    };
    store.persist_prefs(prefs);
}

pub(super) fn set_message_query(store: &EventStore, query: String) {
    let prefs = {
        let mut state = store.state.lock();
        state.message_query = query;
        snapshot_prefs(&state)
    };
    store.persist_prefs(prefs);
}

pub(super) fn select_event(store: &EventStore, id: Option<String>) {
    store.state.lock().selected_event_id = id;
}

/// Place an event into the descending-by-timestamp sequence.
///
/// Streaming arrivals are normally the newest, so the front prepend is the
/// O(1) common case; out-of-order input falls back to a positional insert
/// rather than assuming the caller delivers in order.
fn insert_descending(events: &mut VecDeque<Event>, event: Event) {
    if events
        .front()
        .map_or(true, |head| event.timestamp >= head.timestamp)
    {
        events.push_front(event);
        return;
    }

    match events
        .iter()
        .position(|existing| existing.timestamp <= event.timestamp)
    {
        Some(idx) => events.insert(idx, event),
        None => events.push_back(event),
    }
}

/// Drop the tail entry (lowest timestamp) and reconcile metadata and sources
fn evict_oldest(state: &mut StoreState) {
    let Some(evicted) = state.events.pop_back() else {
        return;
    };

    if let Some(count) = state.source_counts.get_mut(&evicted.source) {
        *count -= 1;
        if *count == 0 {
            state.source_counts.remove(&evicted.source);
        }
    }

    // Duplicate ids share one metadata entry; drop it only with the last copy.
    if !state.events.iter().any(|event| event.id == evicted.id) {
        state.events_meta.remove(&evicted.id);
    }
}

fn snapshot_prefs(state: &StoreState) -> FilterPrefs {
    FilterPrefs {
        selected_types: state.selected_types.clone(),
        selected_source: state.selected_source.clone(),
        message_query: state.message_query.clone(),
    }
}
