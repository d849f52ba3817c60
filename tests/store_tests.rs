//! Integration tests for the event store

use std::collections::HashSet;

use event_deck::store::{EventStore, MAX_EVENTS};
use event_deck::types::{Event, EventType};

fn event(id: &str, kind: EventType, message: &str, timestamp: i64, source: &str) -> Event {
    Event {
        id: id.to_string(),
        kind,
        message: message.to_string(),
        timestamp,
        source: source.to_string(),
    }
}

fn numbered(n: usize, timestamp: i64) -> Event {
    event(
        &format!("event-{}", n),
        EventType::Info,
        "generated",
        timestamp,
        &format!("source-{}", n % 4),
    )
}

/// Meta keys must equal the id set of retained events, exactly
fn assert_meta_matches_events(store: &EventStore) {
    let event_ids: HashSet<String> = store.events().into_iter().map(|e| e.id).collect();
    let meta_ids: HashSet<String> = store.metas().into_keys().collect();
    assert_eq!(event_ids, meta_ids);
}

fn assert_sorted_descending(store: &EventStore) {
    let events = store.events();
    for pair in events.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

fn assert_sources_exact(store: &EventStore) {
    let expected: HashSet<String> = store.events().into_iter().map(|e| e.source).collect();
    let actual: HashSet<String> = store.sources().into_iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_add_event_tracks_sources_and_meta() {
    let store = EventStore::new();

    let incoming = event("event-1", EventType::Info, "hello", 10, "test-source");
    store.add_event(incoming.clone());

    let events = store.events();
    assert_eq!(events[0], incoming);
    assert!(store.sources().contains(&"test-source".to_string()));
    assert!(store.meta("event-1").is_some());
}

#[test]
fn test_set_events_sorts_descending() {
    let store = EventStore::new();

    store.set_events(vec![
        event("a", EventType::Info, "a", 1, "s1"),
        event("b", EventType::Warning, "b", 3, "s2"),
        event("c", EventType::Error, "c", 2, "s3"),
    ]);

    let ids: Vec<String> = store.events().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, ["b", "c", "a"]);
}

#[test]
fn test_filter_by_type_source_and_query() {
    let store = EventStore::new();

    store.set_events(vec![
        event("a", EventType::Info, "alpha", 1, "api"),
        event("b", EventType::Warning, "beta", 2, "db"),
        event("c", EventType::Error, "gamma", 3, "api"),
    ]);
    store.set_selected_source(Some("api".to_string()));
    store.set_message_query("alp".to_string());
    store.set_selected_types([EventType::Info, EventType::Error].into_iter().collect());

    let ids: Vec<String> = store.filtered_events().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, ["a"]);
}

#[test]
fn test_retention_cap_never_exceeded() {
    let store = EventStore::new();

    for n in 0..(MAX_EVENTS + 250) {
        store.add_event(numbered(n, n as i64));
        assert!(store.len() <= MAX_EVENTS);
    }

    assert_eq!(store.len(), MAX_EVENTS);
    assert_meta_matches_events(&store);
    assert_sorted_descending(&store);

    // The oldest 250 were the ones evicted.
    let events = store.events();
    assert_eq!(events.last().unwrap().timestamp, 250);
    assert!(store.meta("event-0").is_none());
    assert!(store.event_by_id("event-0").is_none());
}

#[test]
fn test_set_events_keeps_newest_beyond_cap() {
    let store = EventStore::new();

    let bulk: Vec<Event> = (0..(MAX_EVENTS + 100)).map(|n| numbered(n, n as i64)).collect();
    store.set_events(bulk);

    assert_eq!(store.len(), MAX_EVENTS);
    // Truncation keeps the newest 10,000, not an arbitrary prefix.
    assert_eq!(store.events().last().unwrap().timestamp, 100);
    assert_meta_matches_events(&store);
    assert_sources_exact(&store);
}

#[test]
fn test_out_of_order_add_keeps_sort_invariant() {
    let store = EventStore::new();

    store.add_event(event("new", EventType::Info, "m", 100, "s"));
    store.add_event(event("older", EventType::Info, "m", 40, "s"));
    store.add_event(event("middle", EventType::Info, "m", 70, "s"));
    store.add_event(event("oldest", EventType::Info, "m", 10, "s"));

    let ids: Vec<String> = store.events().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, ["new", "middle", "older", "oldest"]);
    assert_sorted_descending(&store);
}

#[test]
fn test_eviction_keeps_source_set_exact() {
    let store = EventStore::new();

    // Fill the store, then push the sole "rare" source out the back.
    store.add_event(event("rare", EventType::Info, "m", 0, "rare-source"));
    for n in 1..=MAX_EVENTS {
        store.add_event(numbered(n, n as i64));
    }

    assert_eq!(store.len(), MAX_EVENTS);
    assert!(store.event_by_id("rare").is_none());
    assert!(!store.sources().contains(&"rare-source".to_string()));
    assert_sources_exact(&store);
}

#[test]
fn test_duplicate_id_is_not_deduplicated() {
    let store = EventStore::new();

    store.add_event(event("dup", EventType::Info, "first", 1, "s1"));
    store.add_event(event("dup", EventType::Warning, "second", 2, "s2"));

    // Two entries in the sequence, one shared metadata entry.
    assert_eq!(store.len(), 2);
    assert_eq!(store.metas().len(), 1);
    assert_meta_matches_events(&store);

    // Lookup resolves to the newest copy (first in descending order).
    assert_eq!(store.event_by_id("dup").unwrap().message, "second");
}

#[test]
fn test_selection_round_trip() {
    let store = EventStore::new();
    store.set_events(vec![event("x", EventType::Info, "m", 1, "s")]);

    store.select_event(Some("x".to_string()));
    assert_eq!(store.selected_event_id().as_deref(), Some("x"));
    assert_eq!(store.selected_event().unwrap().id, "x");

    store.select_event(None);
    assert!(store.selected_event_id().is_none());

    // Selecting an unknown id is accepted; lookup just resolves to nothing.
    store.select_event(Some("ghost".to_string()));
    assert_eq!(store.selected_event_id().as_deref(), Some("ghost"));
    assert!(store.selected_event().is_none());
    assert!(store.event_by_id("ghost").is_none());
}

#[test]
fn test_selection_survives_eviction_of_target() {
    let store = EventStore::new();

    store.add_event(event("victim", EventType::Info, "m", 0, "s"));
    store.select_event(Some("victim".to_string()));

    for n in 1..=MAX_EVENTS {
        store.add_event(numbered(n, n as i64));
    }

    // The store does not police the selection; lookup fails gracefully.
    assert_eq!(store.selected_event_id().as_deref(), Some("victim"));
    assert!(store.selected_event().is_none());
}

#[test]
fn test_clear_is_idempotent() {
    let store = EventStore::new();
    store.set_events(vec![event("a", EventType::Info, "m", 1, "s")]);
    store.select_event(Some("a".to_string()));
    store.set_message_query("keep me".to_string());

    store.clear_events();
    store.clear_events();

    assert!(store.is_empty());
    assert!(store.metas().is_empty());
    assert!(store.sources().is_empty());
    assert!(store.selected_event_id().is_none());
    // Filters are not part of clearing.
    assert_eq!(store.filters().message_query, "keep me");
}

#[test]
fn test_toggle_event_type_flips_membership() {
    let store = EventStore::new();

    store.toggle_event_type(EventType::Warning);
    assert!(!store.filters().selected_types.contains(&EventType::Warning));

    store.toggle_event_type(EventType::Warning);
    assert!(store.filters().selected_types.contains(&EventType::Warning));
}

#[test]
fn test_add_event_marks_new_and_set_events_resets_recency() {
    let store = EventStore::new();

    store.add_event(event("a", EventType::Info, "m", 1, "s"));
    assert!(store.is_new("a"));
    assert!(!store.is_new("ghost"));

    // A bulk reload counts as "all new" regardless of event timestamps.
    store.set_events(vec![event("old", EventType::Info, "m", 1, "s")]);
    assert!(store.is_new("old"));
}

#[test]
fn test_prefs_survive_restart() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let prefs_path = temp_dir.path().join("filter_prefs.json");

    {
        let store = EventStore::with_prefs_path(&prefs_path);
        store.set_selected_types([EventType::Error].into_iter().collect());
        store.set_selected_source(Some("api".to_string()));
        store.set_message_query("q".to_string());
        store.add_event(event("a", EventType::Error, "m", 1, "api"));
    }

    let store = EventStore::with_prefs_path(&prefs_path);
    let filters = store.filters();
    assert_eq!(
        filters.selected_types,
        [EventType::Error].into_iter().collect()
    );
    assert_eq!(filters.selected_source.as_deref(), Some("api"));
    assert_eq!(filters.message_query, "q");

    // Events are session-only; only the filter slice persists.
    assert!(store.is_empty());
}
