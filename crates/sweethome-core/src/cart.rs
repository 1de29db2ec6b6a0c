//! # Cart
//!
//! The in-memory shopping cart: an insertion-ordered list of line items
//! plus a running total.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart State Changes                                 │
//! │                                                                         │
//! │  Visitor Action          Operation              State Change            │
//! │  ──────────────          ─────────              ────────────            │
//! │                                                                         │
//! │  Click "Order" ────────► add_item() ──────────► items.push(item)        │
//! │                                                 total += price          │
//! │                                                                         │
//! │  Page load ────────────► from_parts() ────────► rehydrated snapshot     │
//! │                                                                         │
//! │  Badge / totals ───────► item_count(), total() (read only)              │
//! │                                                                         │
//! │  NOTE: the cart is never cleared by any operation here; it outlives     │
//! │        the session through persistence and is only reset when the       │
//! │        storage slot disappears or turns out to be malformed.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Line item ids are unique within a cart
//! - `items` keeps insertion order (insertion order = display order)
//! - Repeated adds of the same product name create distinct line items;
//!   there is no quantity merging
//! - The running total equals the sum of all added prices

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name};

// =============================================================================
// Line Item
// =============================================================================

/// One unit of a product added to the cart.
///
/// Each add produces its own line item with its own identity, even when
/// name and price repeat. The price is frozen at the moment of adding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Opaque unique id (UUID v4), generated at creation.
    pub id: String,

    /// Product label; doubles as the display key, there is no separate
    /// canonical product identifier.
    pub name: String,

    /// Unit price in kopecks at time of adding (frozen).
    pub unit_price_kopecks: i64,

    /// Always 1 in the current design; kept as a field so a future
    /// quantity-merge becomes a data-model no-op.
    pub quantity: i64,

    /// When this item was added to the cart.
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a new line item with a fresh id.
    pub fn new(name: &str, unit_price: Money) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            unit_price_kopecks: unit_price.kopecks(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_kopecks(self.unit_price_kopecks)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// The running total is maintained incrementally on every add rather
/// than recomputed from the items on each read. The two can only drift
/// through a corrupted persistence slot, which the rehydration path
/// repairs by recomputing (see `from_parts`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    running_total_kopecks: i64,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            running_total_kopecks: 0,
        }
    }

    /// Rebuilds a cart from persisted parts.
    ///
    /// ## Behavior
    /// - `total` present: trusted as-is (round-trip of a healthy cart)
    /// - `total` absent (missing or malformed slot): recomputed from the
    ///   items so the two persisted values cannot disagree after reload
    pub fn from_parts(items: Vec<LineItem>, total: Option<Money>) -> Self {
        let running_total_kopecks = match total {
            Some(t) => t.kopecks(),
            None => items
                .iter()
                .map(|i| i.unit_price_kopecks * i.quantity)
                .sum(),
        };

        Cart {
            items,
            running_total_kopecks,
        }
    }

    /// Adds a product to the cart and returns the created line item.
    ///
    /// ## Behavior
    /// - Validates the name (non-empty) and the price (non-negative)
    ///   before any mutation
    /// - Always appends a new line item; same-name adds do NOT merge
    /// - Adds the price to the running total
    pub fn add_item(&mut self, name: &str, price: Money) -> CoreResult<LineItem> {
        validate_product_name(name)?;
        validate_price(price)?;

        let item = LineItem::new(name, price);
        self.running_total_kopecks += price.kopecks();
        self.items.push(item.clone());
        Ok(item)
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the running total.
    pub fn total(&self) -> Money {
        Money::from_kopecks(self.running_total_kopecks)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the line items in insertion (display) order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
