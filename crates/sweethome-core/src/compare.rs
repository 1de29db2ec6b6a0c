//! # Product Comparison
//!
//! A bounded, insertion-ordered set of product names the visitor has
//! marked for side-by-side comparison.
//!
//! ## Invariants
//! - At most [`MAX_COMPARE_ITEMS`](crate::MAX_COMPARE_ITEMS) members
//! - No duplicates (membership is checked before insert)
//! - Insertion order is preserved for display

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_product_name;
use crate::MAX_COMPARE_ITEMS;

/// What a toggle call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareToggle {
    /// The product was added to the set.
    Added,
    /// The product was already present and has been removed.
    Removed,
}

/// The comparison set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSet {
    products: Vec<String>,
}

impl CompareSet {
    /// Creates a new empty comparison set.
    pub fn new() -> Self {
        CompareSet {
            products: Vec::new(),
        }
    }

    /// Toggles a product in or out of the set.
    ///
    /// ## Behavior
    /// - Present: removed
    /// - Absent and below capacity: appended
    /// - Absent and at capacity: rejected; the existing members are
    ///   untouched
    pub fn toggle(&mut self, name: &str) -> CoreResult<CompareToggle> {
        validate_product_name(name)?;
        let name = name.trim();

        if let Some(pos) = self.products.iter().position(|p| p == name) {
            self.products.remove(pos);
            return Ok(CompareToggle::Removed);
        }

        if self.products.len() >= MAX_COMPARE_ITEMS {
            return Err(CoreError::CompareSetFull {
                max: MAX_COMPARE_ITEMS,
            });
        }

        self.products.push(name.to_string());
        Ok(CompareToggle::Added)
    }

    /// Checks membership.
    pub fn contains(&self, name: &str) -> bool {
        self.products.iter().any(|p| p == name.trim())
    }

    /// Returns the members in insertion order.
    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Removes all members.
    pub fn clear(&mut self) {
        self.products.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
