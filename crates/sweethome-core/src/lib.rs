//! # sweethome-core: Pure Business Logic for the SweetHome Storefront
//!
//! This crate is the heart of the storefront. It contains all business
//! logic as pure functions and plain data with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   SweetHome Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (out of scope)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                apps/storefront (controller)                     │   │
//! │  │    cart state, analytics, chat, forms, notifications            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sweethome-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │ delivery  │  │ validation│  │   │
//! │  │   │   Money   │  │ LineItem  │  │   quote   │  │   rules   │  │   │
//! │  │   │   (BYN)   │  │   Cart    │  │  status   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO TIMERS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              sweethome-storage (persistence)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - BYN amounts with integer arithmetic (no floating point!)
//! - [`cart`] - Line items and the running-total cart
//! - [`compare`] - Bounded product comparison set
//! - [`delivery`] - Delivery quoting and free-delivery messaging
//! - [`validation`] - Field validation rules
//! - [`types`] - Analytics event record, A/B group tag
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod compare;
pub mod delivery;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, LineItem};
pub use compare::{CompareSet, CompareToggle};
pub use delivery::{DeliveryQuote, DeliveryStatus};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{AbGroup, AnalyticsEvent};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Cart totals at or above this amount ship for free.
pub const FREE_DELIVERY_THRESHOLD: Money = Money::from_rubles(100);

/// The bakery doesn't deliver orders below this amount.
pub const MIN_ORDER_AMOUNT: Money = Money::from_rubles(10);

/// Ceiling on a single delivered order.
pub const MAX_ORDER_AMOUNT: Money = Money::from_rubles(1000);

/// Flat delivery rate below the free-delivery threshold.
pub const STANDARD_DELIVERY_COST: Money = Money::from_rubles(5);

/// Estimated order-to-doorstep time.
pub const ESTIMATED_DELIVERY_HOURS: u32 = 2;

/// Daily delivery window.
pub const DELIVERY_WINDOW_START: &str = "09:00";
pub const DELIVERY_WINDOW_END: &str = "21:00";

/// Maximum products in the comparison set.
pub const MAX_COMPARE_ITEMS: usize = 4;

/// Ring-buffer capacity of the analytics event history.
pub const MAX_EVENT_HISTORY: usize = 100;
