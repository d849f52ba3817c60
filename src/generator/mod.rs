//! Synthetic local event source
//!
//! Emits randomized events to a listener callback with a random inter-arrival
//! delay, as a stand-in for the remote push channel. Also provides the fixed
//! sample dataset used as the bulk-load fallback.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::types::{Event, EventType};
use crate::utils::time::now_millis;

/// Message pool for generated events
pub const EVENT_MESSAGES: [&str; 8] = [
    "User login successful",
    "Payment processed",
    "File uploaded",
    "API request failed",
    "Database connection lost",
    "Cache invalidated",
    "New order created",
    "Email sent to customer",
];

/// Source pool for generated events
pub const EVENT_SOURCES: [&str; 6] = [
    "auth-service",
    "payments-service",
    "storage-service",
    "api-gateway",
    "database",
    "cache-layer",
];

const DEFAULT_MIN_DELAY_MS: u64 = 500;
const DEFAULT_MAX_DELAY_MS: u64 = 2000;

/// Inter-arrival delay bounds for the generator loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: DEFAULT_MIN_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

/// Randomized event producer running on a background tokio task.
///
/// `start` is a no-op while already running; `stop` aborts the task, after
/// which no further events reach the listener. Already-delivered events are
/// unaffected.
pub struct EventGenerator {
    config: GeneratorConfig,
    handle: Option<JoinHandle<()>>,
}

impl EventGenerator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    pub fn config(&self) -> GeneratorConfig {
        self.config
    }

    /// Replace the delay bounds; takes effect on the next `start`
    pub fn configure(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    /// Begin emitting events, one per randomized delay, to `listener`
    pub fn start<F>(&mut self, listener: F)
    where
        F: Fn(Event) + Send + Sync + 'static,
    {
        if self.is_running() {
            return;
        }

        let config = self.config;
        self.handle = Some(tokio::spawn(async move {
            let mut rng = XorShift64::from_clock();
            loop {
                let delay = rng.between(config.min_delay_ms, config.max_delay_ms);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                listener(random_event(&mut rng));
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventGenerator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn random_event(rng: &mut XorShift64) -> Event {
    Event {
        id: Uuid::new_v4().to_string(),
        kind: EventType::ALL[rng.below(EventType::ALL.len() as u64) as usize],
        message: EVENT_MESSAGES[rng.below(EVENT_MESSAGES.len() as u64) as usize].to_string(),
        timestamp: now_millis(),
        source: EVENT_SOURCES[rng.below(EVENT_SOURCES.len() as u64) as usize].to_string(),
    }
}

/// Fixed fallback dataset for when the bulk fetch is unavailable.
///
/// Timestamps are offsets from `now_ms` so the events read as recent history.
pub fn sample_events(now_ms: i64) -> Vec<Event> {
    let sample = |id: &str, kind: EventType, message: &str, offset_ms: i64, source: &str| Event {
        id: id.to_string(),
        kind,
        message: message.to_string(),
        timestamp: now_ms - offset_ms,
        source: source.to_string(),
    };

    vec![
        sample("event-1", EventType::Info, "info message example", 30_000, "test-source-0"),
        sample("event-2", EventType::Warning, "warning message example", 25_000, "test-source-1"),
        sample("event-3", EventType::Error, "error message example", 20_000, "test-source-2"),
        sample("event-4", EventType::Info, "info message example", 15_000, "test-source-0"),
        sample("event-5", EventType::Warning, "warning message example", 10_000, "test-source-3"),
        sample("event-6", EventType::Error, "error message example", 5_000, "test-source-1"),
    ]
}

/// Small xorshift PRNG; event traffic needs uniform-ish picks, not
/// cryptographic quality.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        // State must never be zero.
        Self { state: nanos | 1 }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }

    /// Uniform-ish pick in `[min, max]`, clamping an inverted range
    fn between(&mut self, min: u64, max: u64) -> u64 {
        let hi = max.max(min);
        min + self.below(hi - min + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_events_are_well_formed() {
        let events = sample_events(1_000_000);
        assert_eq!(events.len(), 6);

        let ids: std::collections::HashSet<&str> =
            events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
        assert!(events.iter().all(|e| e.timestamp < 1_000_000));
    }

    #[test]
    fn test_random_event_draws_from_pools() {
        let mut rng = XorShift64::from_clock();
        for _ in 0..50 {
            let event = random_event(&mut rng);
            assert!(EVENT_MESSAGES.contains(&event.message.as_str()));
            assert!(EVENT_SOURCES.contains(&event.source.as_str()));
            assert!(!event.id.is_empty());
        }
    }

    #[test]
    fn test_between_respects_bounds() {
        let mut rng = XorShift64::from_clock();
        for _ in 0..100 {
            let delay = rng.between(500, 2000);
            assert!((500..=2000).contains(&delay));
        }
        assert_eq!(rng.between(7, 7), 7);
        // Inverted range clamps to the lower bound.
        assert_eq!(rng.between(9, 3), 9);
    }

    #[tokio::test]
    async fn test_start_stop_round_trip() {
        let mut generator = EventGenerator::with_config(GeneratorConfig {
            min_delay_ms: 1,
            max_delay_ms: 2,
        });
        assert!(!generator.is_running());

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        generator.start(move |event| {
            let _ = tx.send(event);
        });
        assert!(generator.is_running());

        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("generator should emit within a second")
            .expect("channel open");
        assert!(EVENT_SOURCES.contains(&event.source.as_str()));

        generator.stop();
        assert!(!generator.is_running());
    }
}
