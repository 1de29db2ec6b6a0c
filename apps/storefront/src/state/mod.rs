//! # State Module
//!
//! The storefront's state types. Instead of one monolithic `AppState`,
//! each concern gets its own focused type:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartState   │  │ CompareState │  │   SiteConfig     │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Mutex<Cart> │  │  Mutex<      │  │  identity +      │              │
//! │  │  + storage   │  │   CompareSet>│  │  timer knobs     │              │
//! │  │  + analytics │  │  + analytics │  │  (read-only)     │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState / CompareState: exclusive access via Mutex                │
//! │  • SiteConfig: immutable after resolve(), no lock needed               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod compare;
mod config;

pub use cart::{CartState, CartSummary};
pub use compare::{CompareRow, CompareState, CompareTable};
pub use config::SiteConfig;
