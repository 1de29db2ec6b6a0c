//! # A/B Test Assignment
//!
//! Assigns the visitor to one of two groups, once per storage lifetime.
//! The copy variants the groups see belong to the presentation layer;
//! this module only owns the coin flip, its persistence and its
//! analytics trail.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use sweethome_core::AbGroup;
use sweethome_storage::{Storage, StorageSlot};

use crate::analytics::EventLog;

/// The resolved A/B assignment for this visitor.
#[derive(Debug, Clone)]
pub struct AbTest {
    group: AbGroup,
    test_name: String,
    analytics: Arc<EventLog>,
}

impl AbTest {
    /// Loads the persisted group, or draws and persists a fresh one.
    ///
    /// ## Behavior
    /// - Stored tag present and valid: reused, no event
    /// - Absent (or unreadable/malformed, the usual recovery rule):
    ///   uniform draw, persisted, `ab_test_assignment` recorded
    pub fn assign(storage: &Storage, analytics: Arc<EventLog>, test_name: &str) -> Self {
        let stored = match storage.get_json::<String>(StorageSlot::AbGroup) {
            Ok(tag) => tag,
            Err(err) => {
                warn!(error = %err, "A/B slot unreadable, reassigning");
                None
            }
        };

        if let Some(group) = stored.as_deref().and_then(|tag| tag.parse::<AbGroup>().ok()) {
            debug!(group = %group, "A/B group loaded");
            return AbTest {
                group,
                test_name: test_name.to_string(),
                analytics,
            };
        }

        let group = if rand::random::<bool>() {
            AbGroup::A
        } else {
            AbGroup::B
        };

        if let Err(err) = storage.put_json(StorageSlot::AbGroup, &group.as_str()) {
            warn!(error = %err, "failed to persist A/B group");
        }

        analytics.record(
            "ab_test_assignment",
            json!({
                "group": group.as_str(),
                "test_name": test_name,
            }),
        );
        debug!(group = %group, "A/B group assigned");

        AbTest {
            group,
            test_name: test_name.to_string(),
            analytics,
        }
    }

    /// The group this visitor belongs to.
    pub fn group(&self) -> AbGroup {
        self.group
    }

    /// Records that the visitor explicitly picked a variant and returns
    /// the acknowledgment to show them.
    pub fn track_preference(&self, variant: &str) -> String {
        self.analytics.record(
            "ab_test_interaction",
            json!({
                "variant": variant,
                "current_group": self.group.as_str(),
                "interaction_type": "preference_selection",
            }),
        );

        format!("Thanks for your choice! Variant \"{variant}\" saved.")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sweethome_storage::{MemoryBackend, StorageBackend};

    fn test_env() -> (Arc<Storage>, Arc<EventLog>) {
        let storage = Arc::new(Storage::new(MemoryBackend::new()));
        let analytics = Arc::new(EventLog::new(Arc::clone(&storage)));
        (storage, analytics)
    }

    #[test]
    fn test_assignment_is_stable_across_reloads() {
        let (storage, analytics) = test_env();

        let first = AbTest::assign(&storage, Arc::clone(&analytics), "header_variation");
        // Simulated reload against the same storage
        let second = AbTest::assign(&storage, Arc::clone(&analytics), "header_variation");

        assert_eq!(first.group(), second.group());
        // Only the first assignment records an event
        let assignments = analytics
            .history()
            .iter()
            .filter(|e| e.name == "ab_test_assignment")
            .count();
        assert_eq!(assignments, 1);
    }

    #[test]
    fn test_stored_group_is_respected() {
        let backend = MemoryBackend::new();
        backend.save(StorageSlot::AbGroup.key(), "\"B\"").unwrap();
        let storage = Arc::new(Storage::new(backend));
        let analytics = Arc::new(EventLog::new(Arc::clone(&storage)));

        let test = AbTest::assign(&storage, analytics, "header_variation");
        assert_eq!(test.group(), AbGroup::B);
    }

    #[test]
    fn test_malformed_group_reassigned() {
        let backend = MemoryBackend::new();
        backend.save(StorageSlot::AbGroup.key(), "\"Z\"").unwrap();
        let storage = Arc::new(Storage::new(backend));
        let analytics = Arc::new(EventLog::new(Arc::clone(&storage)));

        let test = AbTest::assign(&storage, Arc::clone(&analytics), "header_variation");

        // A fresh, valid tag has been persisted over the junk
        let stored: Option<String> = storage.get_json(StorageSlot::AbGroup).unwrap();
        assert_eq!(stored.as_deref(), Some(test.group().as_str()));
    }

    #[test]
    fn test_track_preference_records_interaction() {
        let (storage, analytics) = test_env();
        let test = AbTest::assign(&storage, Arc::clone(&analytics), "header_variation");

        let ack = test.track_preference("B");
        assert!(ack.contains("\"B\""));

        let event = analytics.history().into_iter().last().unwrap();
        assert_eq!(event.name, "ab_test_interaction");
        assert_eq!(event.payload["variant"], "B");
        assert_eq!(event.payload["current_group"], test.group().as_str());
    }
}
