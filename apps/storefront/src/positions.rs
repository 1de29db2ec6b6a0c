//! # Search Position Tracker (Simulation)
//!
//! A stand-in for a rank-tracking API: a set of tracked search queries
//! whose positions drift ±1 on a fixed interval. One owned periodic
//! task does the drifting; stopping or dropping the tracker aborts it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::debug;

/// Positions are clamped to [MIN_POSITION, MAX_POSITION].
const MIN_POSITION: u32 = 1;
const MAX_POSITION: u32 = 50;

/// One tracked search query and its current position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedQuery {
    pub query: String,
    pub position: u32,
}

/// The simulated rank tracker.
pub struct PositionTracker {
    queries: Arc<Mutex<Vec<TrackedQuery>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PositionTracker {
    /// Creates a tracker over the given queries with their starting
    /// positions.
    pub fn new(queries: Vec<TrackedQuery>) -> Self {
        PositionTracker {
            queries: Arc::new(Mutex::new(queries)),
            task: Mutex::new(None),
        }
    }

    /// Starts the periodic drift. A second call replaces (and aborts)
    /// the previous interval task.
    pub fn start(&self, interval: Duration) {
        let queries = Arc::clone(&self.queries);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a tokio interval fires immediately;
            // skip it so positions only move after a full period
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Ok(mut queries) = queries.lock() {
                    let mut rng = rand::rng();
                    for tracked in queries.iter_mut() {
                        let step: i64 = if rng.random::<bool>() { 1 } else { -1 };
                        let moved = (tracked.position as i64 + step)
                            .clamp(MIN_POSITION as i64, MAX_POSITION as i64);
                        tracked.position = moved as u32;
                    }
                    debug!(queries = queries.len(), "positions updated");
                }
            }
        });

        if let Ok(mut slot) = self.task.lock() {
            if let Some(previous) = slot.replace(task) {
                previous.abort();
            }
        }
    }

    /// Stops the drift.
    pub fn stop(&self) {
        if let Ok(mut slot) = self.task.lock() {
            if let Some(task) = slot.take() {
                task.abort();
            }
        }
    }

    /// Snapshot of the tracked queries.
    pub fn snapshot(&self) -> Vec<TrackedQuery> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

impl Drop for PositionTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PositionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionTracker")
            .field("queries", &self.snapshot().len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_queries() -> Vec<TrackedQuery> {
        vec![
            TrackedQuery {
                query: "cakes to order minsk".to_string(),
                position: 12,
            },
            TrackedQuery {
                query: "homemade pastry delivery".to_string(),
                position: 1,
            },
        ]
    }

    #[tokio::test]
    async fn test_positions_drift_within_range() {
        let tracker = PositionTracker::new(seed_queries());
        tracker.start(Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(120)).await;
        tracker.stop();

        for tracked in tracker.snapshot() {
            assert!(
                (MIN_POSITION..=MAX_POSITION).contains(&tracked.position),
                "{tracked:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_stop_freezes_positions() {
        let tracker = PositionTracker::new(seed_queries());
        tracker.start(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        tracker.stop();

        let frozen = tracker.snapshot();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(tracker.snapshot(), frozen);
    }

    #[tokio::test]
    async fn test_not_started_does_not_drift() {
        let tracker = PositionTracker::new(seed_queries());
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(tracker.snapshot(), seed_queries());
    }
}
