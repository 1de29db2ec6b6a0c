//! # Cart State
//!
//! The persistence-backed cart: the pure `Cart` from `sweethome-core`
//! behind a mutex, with every mutation written through to storage and
//! reported to analytics.
//!
//! ## Persistence Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Persistence                                     │
//! │                                                                         │
//! │  add_item(name, price)                                                  │
//! │       │                                                                 │
//! │       ├── validate + mutate in-memory cart  (the authoritative copy)    │
//! │       ├── persist items slot     ┐  two separate slots, both            │
//! │       ├── persist total slot     ┘  overwritten on every add            │
//! │       └── record add_to_cart event                                      │
//! │                                                                         │
//! │  load (at construction)                                                 │
//! │       ├── absent slots ──────────────► empty cart                       │
//! │       ├── malformed items ───────────► empty cart (recovered, warned)   │
//! │       ├── items ok, total malformed ─► total recomputed from items      │
//! │       └── both ok ───────────────────► identical round-trip             │
//! │                                                                         │
//! │  A failed write is logged and the session carries on from memory;      │
//! │  the visitor's cart must never break because the disk did.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use sweethome_core::{
    Cart, DeliveryStatus, LineItem, Money, FREE_DELIVERY_THRESHOLD,
};
use sweethome_storage::{Storage, StorageSlot};

use crate::analytics::EventLog;
use crate::error::SiteError;

// =============================================================================
// Cart Summary
// =============================================================================

/// Derived cart presentation state: counts, total and the
/// free-delivery messaging. Pure data, safe to hand to any renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: usize,
    pub total: Money,
    pub delivery: DeliveryStatus,
    pub delivery_message: String,
}

// =============================================================================
// Cart State
// =============================================================================

/// Thread-safe, persistence-backed cart state.
pub struct CartState {
    cart: Mutex<Cart>,
    storage: Arc<Storage>,
    analytics: Arc<EventLog>,
}

impl CartState {
    /// Rehydrates the cart from storage, or starts empty.
    pub fn load(storage: Arc<Storage>, analytics: Arc<EventLog>) -> Self {
        let items = match storage.get_json::<Vec<LineItem>>(StorageSlot::CartItems) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "cart slot unreadable, starting empty");
                Vec::new()
            }
        };

        // A malformed or missing total alongside healthy items gets
        // recomputed instead of trusted-or-zeroed; the persisted pair
        // must agree after every reload.
        let total = match storage.get_json::<i64>(StorageSlot::CartTotal) {
            Ok(Some(kopecks)) => Some(Money::from_kopecks(kopecks)),
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "cart total slot unreadable, recomputing");
                None
            }
        };

        let cart = Cart::from_parts(items, total);
        debug!(items = cart.item_count(), total = %cart.total(), "cart rehydrated");

        CartState {
            cart: Mutex::new(cart),
            storage,
            analytics,
        }
    }

    /// Adds a product to the cart and returns the created line item.
    ///
    /// Validation failures surface as errors; persistence failures do
    /// not — the in-memory cart stays authoritative for the session.
    pub fn add_item(&self, name: &str, price: Money) -> Result<LineItem, SiteError> {
        let (item, items_snapshot, total) = {
            let mut cart = self.lock();
            let item = cart.add_item(name, price)?;
            (item, cart.items().to_vec(), cart.total())
        };

        self.persist(&items_snapshot, total);

        self.analytics.record(
            "add_to_cart",
            json!({
                "product": item.name,
                "price": item.unit_price_kopecks,
                "cart_total": total.kopecks(),
                "free_delivery_left": FREE_DELIVERY_THRESHOLD.gap_to(total).kopecks(),
            }),
        );

        Ok(item)
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.lock().item_count()
    }

    /// Returns the running total.
    pub fn total(&self) -> Money {
        self.lock().total()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the line items in display order.
    pub fn items(&self) -> Vec<LineItem> {
        self.lock().items().to_vec()
    }

    /// Derived presentation state for the current cart.
    pub fn summary(&self) -> CartSummary {
        let cart = self.lock();
        let total = cart.total();
        let delivery = DeliveryStatus::for_total(total);

        CartSummary {
            item_count: cart.item_count(),
            total,
            delivery_message: delivery.message(),
            delivery,
        }
    }

    /// Writes both cart slots; failures are logged, not returned.
    fn persist(&self, items: &[LineItem], total: Money) {
        if let Err(err) = self.storage.put_json(StorageSlot::CartItems, &items) {
            warn!(error = %err, "failed to persist cart items");
        }
        if let Err(err) = self
            .storage
            .put_json(StorageSlot::CartTotal, &total.kopecks())
        {
            warn!(error = %err, "failed to persist cart total");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        match self.cart.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for CartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartState")
            .field("items", &self.item_count())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
