//! # Storage Slots
//!
//! The fixed set of named slots the storefront persists. Keys are part
//! of the on-disk contract and keep the names the site has always used;
//! renaming one orphans existing visitor state.

/// A named persistent storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageSlot {
    /// Serialized sequence of cart line items.
    CartItems,
    /// Serialized cart running total (kopecks).
    CartTotal,
    /// Serialized analytics event history, at most 100 entries.
    AnalyticsEvents,
    /// The visitor's A/B group tag, written once per storage lifetime.
    AbGroup,
}

impl StorageSlot {
    /// The persisted key for this slot.
    pub const fn key(&self) -> &'static str {
        match self {
            StorageSlot::CartItems => "sweethomebakery_cart",
            StorageSlot::CartTotal => "sweethomebakery_order_amount",
            StorageSlot::AnalyticsEvents => "analytics_events",
            StorageSlot::AbGroup => "ab_test_group",
        }
    }
}

/// Session-scoped flag names (see [`crate::SessionStore`]).
///
/// Session flags are per-process and intentionally not persisted.
pub mod session {
    /// Set once the chat has been opened this session; gates auto-open.
    pub const CHAT_OPENED: &str = "chat_opened";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_keys_are_stable() {
        // On-disk contract; a failing assert here means a breaking change
        assert_eq!(StorageSlot::CartItems.key(), "sweethomebakery_cart");
        assert_eq!(StorageSlot::CartTotal.key(), "sweethomebakery_order_amount");
        assert_eq!(StorageSlot::AnalyticsEvents.key(), "analytics_events");
        assert_eq!(StorageSlot::AbGroup.key(), "ab_test_group");
    }
}
