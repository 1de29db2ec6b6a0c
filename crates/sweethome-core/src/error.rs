//! # Error Types
//!
//! Domain-specific error types for sweethome-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sweethome-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  sweethome-storage errors (separate crate)                             │
//! │  └── StorageError     - Persistence failures                           │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── SiteError        - Unified code + message for callers             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SiteError → caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-facing messages by the controller layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order amount is below the minimum the bakery accepts.
    ///
    /// Raised by the delivery calculator; no cost is computed.
    #[error("Minimum order amount is {minimum}")]
    BelowMinimumOrder { minimum: Money },

    /// Order amount is above the configured ceiling.
    #[error("Maximum order amount is {maximum}")]
    AboveMaximumOrder { maximum: Money },

    /// Comparison set is at capacity; the add was rejected and the
    /// existing members are unchanged.
    #[error("Cannot compare more than {max} products")]
    CompareSetFull { max: usize },

    /// Product is not listed in the comparison set.
    #[error("Product not in comparison set: {0}")]
    NotInCompareSet(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed phone number or email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::BelowMinimumOrder {
            minimum: Money::from_kopecks(10_00),
        };
        assert_eq!(err.to_string(), "Minimum order amount is 10.00 BYN");

        let err = CoreError::CompareSetFull { max: 4 };
        assert_eq!(err.to_string(), "Cannot compare more than 4 products");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "name must be at least 2 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
