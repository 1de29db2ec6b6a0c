//! # Analytics Event Log
//!
//! Records named events with free-form payloads into a bounded ring
//! buffer, persists the buffer on every record, and forwards each event
//! to any registered external sinks.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record("add_to_cart", {product, price, ...})                           │
//! │       │                                                                 │
//! │       ├── append to ring buffer (oldest evicted past 100)               │
//! │       │                                                                 │
//! │       ├── persist whole buffer (overwrite; failure ⇒ warn, keep going)  │
//! │       │                                                                 │
//! │       ├── log at debug (the always-on diagnostic sink)                  │
//! │       │                                                                 │
//! │       └── forward to each registered AnalyticsSink                      │
//! │            (no sinks registered is not an error, just a skipped step)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The buffer is rehydrated from storage once at construction; after
//! that the in-memory copy is authoritative and storage is write-only.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, warn};

use sweethome_core::{AnalyticsEvent, MAX_EVENT_HISTORY};
use sweethome_storage::{Storage, StorageSlot};

// =============================================================================
// Analytics Sink
// =============================================================================

/// An optional external destination for events.
///
/// Models the page-tag / event-tag integrations of the original site:
/// forwarded the payload as-is when present, silently skipped when not.
/// Implementations must not block; a sink is fire-and-forget.
pub trait AnalyticsSink: Send + Sync {
    /// Sink label for diagnostics.
    fn name(&self) -> &'static str;

    /// Receives one event. Errors are the sink's own problem.
    fn forward(&self, event: &AnalyticsEvent);
}

// =============================================================================
// Event Log
// =============================================================================

/// The analytics event log.
pub struct EventLog {
    storage: Arc<Storage>,
    events: Mutex<VecDeque<AnalyticsEvent>>,
    sinks: Vec<Box<dyn AnalyticsSink>>,
}

impl EventLog {
    /// Creates the log, rehydrating prior history from storage.
    ///
    /// An absent or malformed history slot starts the buffer empty; an
    /// over-long one (written by a previous, buggier version) is
    /// truncated to the newest entries.
    pub fn new(storage: Arc<Storage>) -> Self {
        let mut events: VecDeque<AnalyticsEvent> = match storage
            .get_json::<Vec<AnalyticsEvent>>(StorageSlot::AnalyticsEvents)
        {
            Ok(Some(history)) => history.into(),
            Ok(None) => VecDeque::new(),
            Err(err) => {
                warn!(error = %err, "event history unreadable, starting empty");
                VecDeque::new()
            }
        };

        while events.len() > MAX_EVENT_HISTORY {
            events.pop_front();
        }

        EventLog {
            storage,
            events: Mutex::new(events),
            sinks: Vec::new(),
        }
    }

    /// Registers an external sink. Call before sharing the log.
    pub fn register_sink(&mut self, sink: impl AnalyticsSink + 'static) {
        self.register_boxed_sink(Box::new(sink));
    }

    /// Registers an already-boxed sink.
    pub fn register_boxed_sink(&mut self, sink: Box<dyn AnalyticsSink>) {
        self.sinks.push(sink);
    }

    /// Records an event.
    ///
    /// Appends to the ring buffer (FIFO eviction past capacity),
    /// persists the whole buffer, and forwards to every sink. A failed
    /// persist is logged; the in-memory buffer stays authoritative.
    pub fn record(&self, name: &str, payload: Value) -> AnalyticsEvent {
        let event = AnalyticsEvent::new(name, payload);
        debug!(event = name, payload = %event.payload, "analytics");

        let snapshot: Vec<AnalyticsEvent> = {
            let mut events = match self.events.lock() {
                Ok(events) => events,
                Err(poisoned) => poisoned.into_inner(),
            };
            events.push_back(event.clone());
            while events.len() > MAX_EVENT_HISTORY {
                events.pop_front();
            }
            events.iter().cloned().collect()
        };

        if let Err(err) = self
            .storage
            .put_json(StorageSlot::AnalyticsEvents, &snapshot)
        {
            warn!(error = %err, "failed to persist event history");
        }

        for sink in &self.sinks {
            sink.forward(&event);
        }

        event
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Checks if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the buffered events, oldest first.
    pub fn history(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("buffered", &self.len())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use sweethome_storage::{MemoryBackend, StorageBackend, StorageError, StorageResult};

    fn memory_log() -> (Arc<Storage>, EventLog) {
        let storage = Arc::new(Storage::new(MemoryBackend::new()));
        let log = EventLog::new(Arc::clone(&storage));
        (storage, log)
    }

    #[test]
    fn test_ring_buffer_caps_at_100_oldest_first() {
        let (_storage, log) = memory_log();

        for i in 0..105 {
            log.record("tick", json!({ "seq": i }));
        }

        let history = log.history();
        assert_eq!(history.len(), 100);
        // The five oldest were evicted; order of the rest is call order
        assert_eq!(history[0].payload["seq"], 5);
        assert_eq!(history[99].payload["seq"], 104);
    }

    #[test]
    fn test_history_persisted_and_rehydrated() {
        let (storage, log) = memory_log();
        log.record("chat_opened", json!({}));
        log.record("add_to_cart", json!({ "product": "Apple Pie" }));
        drop(log);

        // Fresh log over the same storage sees the prior history
        let log = EventLog::new(storage);
        assert_eq!(log.len(), 2);
        assert_eq!(log.history()[1].name, "add_to_cart");
    }

    #[test]
    fn test_overlong_persisted_history_truncated() {
        let storage = Arc::new(Storage::new(MemoryBackend::new()));
        let oversized: Vec<AnalyticsEvent> = (0..130)
            .map(|i| AnalyticsEvent::new("tick", json!({ "seq": i })))
            .collect();
        storage
            .put_json(StorageSlot::AnalyticsEvents, &oversized)
            .unwrap();

        let log = EventLog::new(storage);
        assert_eq!(log.len(), 100);
        assert_eq!(log.history()[0].payload["seq"], 30);
    }

    #[test]
    fn test_sink_forwarding() {
        struct CountingSink(Arc<AtomicUsize>);
        impl AnalyticsSink for CountingSink {
            fn name(&self) -> &'static str {
                "counting"
            }
            fn forward(&self, _event: &AnalyticsEvent) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let count = Arc::new(AtomicUsize::new(0));
        let storage = Arc::new(Storage::new(MemoryBackend::new()));
        let mut log = EventLog::new(storage);
        log.register_sink(CountingSink(Arc::clone(&count)));

        log.record("a", json!({}));
        log.record("b", json!({}));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_persist_keeps_memory_authoritative() {
        /// Backend that accepts nothing.
        struct ReadOnlyBackend;
        impl StorageBackend for ReadOnlyBackend {
            fn load(&self, _key: &str) -> StorageResult<Option<String>> {
                Ok(None)
            }
            fn save(&self, key: &str, _value: &str) -> StorageResult<()> {
                Err(StorageError::WriteFailed {
                    key: key.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded"),
                })
            }
            fn remove(&self, _key: &str) -> StorageResult<()> {
                Ok(())
            }
        }

        let log = EventLog::new(Arc::new(Storage::new(ReadOnlyBackend)));
        log.record("a", json!({}));
        log.record("b", json!({}));

        // Persistence failed both times; the buffer didn't notice
        assert_eq!(log.len(), 2);
    }
}
