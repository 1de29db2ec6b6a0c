//! # Delivery
//!
//! Two independent pieces of delivery logic:
//!
//! 1. The **delivery cost calculator** — stateless, quotes a cost for a
//!    user-entered order amount. Not tied to the stored cart.
//! 2. The **derived delivery status** — a pure function of the cart
//!    total that produces the free-delivery messaging shown next to the
//!    cart.
//!
//! ## Quote Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote(amount)                                                          │
//! │       │                                                                 │
//! │       ├── amount < 10 BYN ──► Err(BelowMinimumOrder), no cost computed  │
//! │       │                                                                 │
//! │       ├── amount > 1000 BYN ─► Err(AboveMaximumOrder)                   │
//! │       │                                                                 │
//! │       ├── amount ≥ 100 BYN ──► delivery cost 0                          │
//! │       │                                                                 │
//! │       └── otherwise ─────────► flat 5 BYN                               │
//! │                                                                         │
//! │  total = amount + delivery cost                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::{
    DELIVERY_WINDOW_END, DELIVERY_WINDOW_START, ESTIMATED_DELIVERY_HOURS,
    FREE_DELIVERY_THRESHOLD, MAX_ORDER_AMOUNT, MIN_ORDER_AMOUNT, STANDARD_DELIVERY_COST,
};

// =============================================================================
// Delivery Quote
// =============================================================================

/// A priced delivery quote for a user-entered order amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryQuote {
    /// The order amount the quote was computed for.
    pub order_amount: Money,

    /// Zero at/above the free-delivery threshold, flat rate below it.
    pub delivery_cost: Money,

    /// `order_amount + delivery_cost`.
    pub total: Money,

    /// Estimated time from order to doorstep, in hours.
    pub estimated_hours: u32,
}

impl DeliveryQuote {
    /// Checks whether delivery is free in this quote.
    #[inline]
    pub fn is_free_delivery(&self) -> bool {
        self.delivery_cost.is_zero()
    }
}

/// Computes a delivery quote for an order amount.
///
/// ## Errors
/// - [`CoreError::BelowMinimumOrder`] below the 10 BYN minimum
/// - [`CoreError::AboveMaximumOrder`] above the 1000 BYN ceiling
pub fn quote(amount: Money) -> CoreResult<DeliveryQuote> {
    if amount < MIN_ORDER_AMOUNT {
        return Err(CoreError::BelowMinimumOrder {
            minimum: MIN_ORDER_AMOUNT,
        });
    }

    if amount > MAX_ORDER_AMOUNT {
        return Err(CoreError::AboveMaximumOrder {
            maximum: MAX_ORDER_AMOUNT,
        });
    }

    let delivery_cost = if amount >= FREE_DELIVERY_THRESHOLD {
        Money::zero()
    } else {
        STANDARD_DELIVERY_COST
    };

    Ok(DeliveryQuote {
        order_amount: amount,
        delivery_cost,
        total: amount + delivery_cost,
        estimated_hours: ESTIMATED_DELIVERY_HOURS,
    })
}

/// Returns the daily delivery window as `(start, end)` wall-clock labels.
pub fn delivery_window() -> (&'static str, &'static str) {
    (DELIVERY_WINDOW_START, DELIVERY_WINDOW_END)
}

// =============================================================================
// Derived Delivery Status
// =============================================================================

/// Free-delivery messaging derived from a cart total.
///
/// Pure function of the total; carries no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum DeliveryStatus {
    /// Total is at or above the threshold.
    FreeDelivery,
    /// Total is below the threshold; `gap` is the amount still needed.
    Remaining { gap: Money },
}

impl DeliveryStatus {
    /// Derives the status for a cart total.
    pub fn for_total(total: Money) -> Self {
        if total >= FREE_DELIVERY_THRESHOLD {
            DeliveryStatus::FreeDelivery
        } else {
            DeliveryStatus::Remaining {
                gap: FREE_DELIVERY_THRESHOLD.gap_to(total),
            }
        }
    }

    /// Canonical message for this status.
    pub fn message(&self) -> String {
        match self {
            DeliveryStatus::FreeDelivery => {
                "Congratulations! Your delivery is free!".to_string()
            }
            DeliveryStatus::Remaining { gap } => {
                format!("Add {gap} more for free delivery")
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_below_threshold_charges_flat_rate() {
        // 50 BYN: above minimum, below threshold
        let q = quote(Money::from_rubles(50)).unwrap();
        assert_eq!(q.delivery_cost, Money::from_rubles(5));
        assert_eq!(q.total, Money::from_rubles(55));
        assert!(!q.is_free_delivery());
    }

    #[test]
    fn test_quote_at_threshold_is_free() {
        let q = quote(Money::from_rubles(150)).unwrap();
        assert_eq!(q.delivery_cost, Money::zero());
        assert_eq!(q.total, Money::from_rubles(150));
        assert!(q.is_free_delivery());

        // Exactly at the threshold counts as free
        let q = quote(Money::from_rubles(100)).unwrap();
        assert!(q.is_free_delivery());
    }

    #[test]
    fn test_quote_below_minimum_rejected() {
        let err = quote(Money::from_rubles(5));
        assert!(matches!(err, Err(CoreError::BelowMinimumOrder { .. })));
    }

    #[test]
    fn test_quote_above_maximum_rejected() {
        assert!(quote(Money::from_rubles(1000)).is_ok());

        let err = quote(Money::from_rubles(1001));
        assert!(matches!(err, Err(CoreError::AboveMaximumOrder { .. })));
    }

    #[test]
    fn test_quote_boundary_minimum() {
        // Exactly the minimum is accepted
        let q = quote(Money::from_rubles(10)).unwrap();
        assert_eq!(q.delivery_cost, Money::from_rubles(5));
        assert_eq!(q.total, Money::from_rubles(15));
    }

    #[test]
    fn test_status_below_threshold() {
        let status = DeliveryStatus::for_total(Money::from_rubles(45));
        assert_eq!(
            status,
            DeliveryStatus::Remaining {
                gap: Money::from_rubles(55)
            }
        );
        assert!(status.message().contains("55.00 BYN"));
    }

    #[test]
    fn test_status_at_and_above_threshold() {
        assert_eq!(
            DeliveryStatus::for_total(Money::from_rubles(100)),
            DeliveryStatus::FreeDelivery
        );
        assert_eq!(
            DeliveryStatus::for_total(Money::from_rubles(250)),
            DeliveryStatus::FreeDelivery
        );
    }

    #[test]
    fn test_delivery_window() {
        assert_eq!(delivery_window(), ("09:00", "21:00"));
    }
}
