//! Pure view derivations over the store state
//!
//! These functions never mutate the aggregate and are safe to re-run on every
//! read; the retention cap keeps a full scan comfortably sub-millisecond.

use rayon::prelude::*;

use crate::types::Event;

use super::StoreState;

/// Above this many retained events the filter scan runs in parallel
const PARALLEL_FILTER_THRESHOLD: usize = 1000;

/// Events matching all active predicates, in stored (descending) order.
///
/// An event is retained iff its type is in `selected_types`, the source filter
/// is unset or matches exactly (case-sensitive), and the trimmed, lower-cased
/// message query is empty or a substring of the lower-cased message.
pub(super) fn filtered_events(state: &StoreState) -> Vec<Event> {
    let query = state.message_query.trim().to_lowercase();

    let matches = |event: &Event| {
        state.selected_types.contains(&event.kind)
            && state
                .selected_source
                .as_deref()
                .map_or(true, |source| event.source == source)
            && (query.is_empty() || event.message.to_lowercase().contains(&query))
    };

    if state.events.len() > PARALLEL_FILTER_THRESHOLD {
        // Indexed parallel collect preserves the descending order.
        state
            .events
            .par_iter()
            .filter(|event| matches(event))
            .cloned()
            .collect()
    } else {
        state
            .events
            .iter()
            .filter(|event| matches(event))
            .cloned()
            .collect()
    }
}

/// Linear-scan lookup by id; `None` when the event is no longer retained
pub(super) fn event_by_id(state: &StoreState, id: &str) -> Option<Event> {
    state.events.iter().find(|event| event.id == id).cloned()
}
