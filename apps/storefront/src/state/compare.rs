//! # Compare State
//!
//! The comparison set behind a mutex, plus the side-by-side table
//! builder. Deliberately not persisted: the compare list is a
//! within-visit scratchpad, matching the site's original behavior.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::json;

use sweethome_core::{CompareSet, CompareToggle};

use crate::analytics::EventLog;
use crate::catalog;
use crate::error::{ErrorCode, SiteError};

// =============================================================================
// Compare Table
// =============================================================================

/// One attribute row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRow {
    pub label: String,
    /// One value per compared product, in display order. Products
    /// missing from the catalog show an em dash.
    pub values: Vec<String>,
}

/// The side-by-side comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareTable {
    pub products: Vec<String>,
    pub rows: Vec<CompareRow>,
}

// =============================================================================
// Compare State
// =============================================================================

/// Thread-safe comparison state.
pub struct CompareState {
    set: Mutex<CompareSet>,
    analytics: Arc<EventLog>,
}

impl CompareState {
    /// Creates an empty compare state.
    pub fn new(analytics: Arc<EventLog>) -> Self {
        CompareState {
            set: Mutex::new(CompareSet::new()),
            analytics,
        }
    }

    /// Toggles a product in or out of the comparison.
    ///
    /// A rejected fifth add surfaces the capacity error and leaves the
    /// set untouched.
    pub fn toggle(&self, name: &str) -> Result<CompareToggle, SiteError> {
        let (action, count) = {
            let mut set = self.lock();
            let action = set.toggle(name)?;
            (action, set.len())
        };

        self.analytics.record(
            "product_comparison",
            json!({
                "action": match action {
                    CompareToggle::Added => "add",
                    CompareToggle::Removed => "remove",
                },
                "product": name.trim(),
                "compare_count": count,
            }),
        );

        Ok(action)
    }

    /// Builds the comparison table from the catalog.
    ///
    /// ## Errors
    /// An empty set is an error: there is nothing to lay side by side.
    pub fn table(&self) -> Result<CompareTable, SiteError> {
        let products = self.products();
        if products.is_empty() {
            return Err(SiteError::new(
                ErrorCode::CompareError,
                "Add products to compare first",
            ));
        }

        let cell = |name: &str, pick: fn(&catalog::ProductInfo) -> String| {
            catalog::find(name).map(pick).unwrap_or_else(|| "—".to_string())
        };

        let rows = vec![
            CompareRow {
                label: "Price".to_string(),
                values: products
                    .iter()
                    .map(|p| cell(p, |info| info.price.to_string()))
                    .collect(),
            },
            CompareRow {
                label: "Weight".to_string(),
                values: products
                    .iter()
                    .map(|p| cell(p, |info| info.weight.to_string()))
                    .collect(),
            },
            CompareRow {
                label: "Rating".to_string(),
                values: products
                    .iter()
                    .map(|p| cell(p, |info| info.rating.to_string()))
                    .collect(),
            },
        ];

        self.analytics.record(
            "compare_view",
            json!({
                "products": products,
                "count": products.len(),
            }),
        );

        Ok(CompareTable { products, rows })
    }

    /// Empties the comparison set.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Members in insertion order.
    pub fn products(&self) -> Vec<String> {
        self.lock().products().to_vec()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CompareSet> {
        match self.set.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for CompareState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompareState")
            .field("products", &self.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
