//! # Site Error Type
//!
//! Unified error type for controller operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Caller (presentation layer / demo binary)                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Controller method                                               │  │
//! │  │  Result<T, SiteError>                                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation failure? ── ValidationError ──┐                     │  │
//! │  │         │                                 │                      │  │
//! │  │         ▼                                 ▼                      │  │
//! │  │  Business rule? ──────── CoreError ───── SiteError ────────────►│  │
//! │  │                                                                  │  │
//! │  │  (StorageError never reaches here: persistence failures are     │  │
//! │  │   logged and the in-memory state stays authoritative)           │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sweethome_core::{CoreError, ValidationError};

/// Controller error: a machine-readable code plus a display message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for controller responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Comparison set operation failed
    CompareError,

    /// Order amount outside the accepted bounds
    OrderLimit,

    /// Unknown chat topic / malformed chat input
    ChatError,

    /// Internal error
    Internal,
}

impl SiteError {
    /// Creates a new site error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        SiteError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SiteError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a chat error.
    pub fn chat(message: impl Into<String>) -> Self {
        SiteError::new(ErrorCode::ChatError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        SiteError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to site errors.
impl From<CoreError> for SiteError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::BelowMinimumOrder { .. } | CoreError::AboveMaximumOrder { .. } => {
                SiteError::new(ErrorCode::OrderLimit, err.to_string())
            }
            CoreError::CompareSetFull { .. } | CoreError::NotInCompareSet(_) => {
                SiteError::new(ErrorCode::CompareError, err.to_string())
            }
            CoreError::Validation(e) => SiteError::validation(e.to_string()),
        }
    }
}

/// Converts bare validation errors to site errors.
impl From<ValidationError> for SiteError {
    fn from(err: ValidationError) -> Self {
        SiteError::validation(err.to_string())
    }
}

impl std::fmt::Display for SiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for SiteError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sweethome_core::Money;

    #[test]
    fn test_order_limit_mapping() {
        let err: SiteError = CoreError::BelowMinimumOrder {
            minimum: Money::from_rubles(10),
        }
        .into();
        assert_eq!(err.code, ErrorCode::OrderLimit);
        assert!(err.message.contains("10.00 BYN"));
    }

    #[test]
    fn test_compare_mapping() {
        let err: SiteError = CoreError::CompareSetFull { max: 4 }.into();
        assert_eq!(err.code, ErrorCode::CompareError);
    }

    #[test]
    fn test_validation_mapping() {
        let err: SiteError = ValidationError::Required {
            field: "phone".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "phone is required");
    }
}
