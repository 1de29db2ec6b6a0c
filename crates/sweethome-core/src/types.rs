//! # Domain Types
//!
//! Shared domain types that don't belong to a single component: the
//! analytics event record and the A/B test group tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Analytics Event
// =============================================================================

/// A named analytics event with a free-form payload.
///
/// The payload schema varies per event kind and is deliberately not
/// validated against a fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Event kind (free-form tag, e.g. `add_to_cart`).
    pub name: String,

    /// String keys to scalar/simple values.
    pub payload: Value,

    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Creates an event stamped with the current time.
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        AnalyticsEvent {
            name: name.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// A/B Group
// =============================================================================

/// The visitor's A/B test group, assigned once per storage lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbGroup {
    A,
    B,
}

impl AbGroup {
    /// The persisted tag for this group.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AbGroup::A => "A",
            AbGroup::B => "B",
        }
    }
}

impl fmt::Display for AbGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(AbGroup::A),
            "B" => Ok(AbGroup::B),
            _ => Err(()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_round_trip() {
        let event = AnalyticsEvent::new("add_to_cart", json!({"product": "Apple Pie"}));
        let text = serde_json::to_string(&event).unwrap();
        let back: AnalyticsEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_ab_group_tags() {
        assert_eq!(AbGroup::A.as_str(), "A");
        assert_eq!("B".parse::<AbGroup>().unwrap(), AbGroup::B);
        assert!("C".parse::<AbGroup>().is_err());
    }
}
