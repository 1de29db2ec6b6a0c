//! # Validation Module
//!
//! Input validation for everything a visitor can type into the site's
//! forms: names, Belarusian phone numbers, email addresses, order
//! amounts, review ratings and free-text fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field validators (this module)                               │
//! │  ├── One function per field kind                                       │
//! │  └── Typed ValidationError per failure                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Form validation (storefront::forms)                          │
//! │  ├── Runs every field validator, collects ALL failures                 │
//! │  └── Any failure blocks the submission                                 │
//! │                                                                         │
//! │  There is no backend layer: submissions are stubs by design.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sweethome_core::validation::{validate_phone, validate_customer_name};
//!
//! validate_customer_name("Alena").unwrap();
//! validate_phone("+375 33 875 10 74").unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ORDER_AMOUNT, MIN_ORDER_AMOUNT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 2 and 100 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() < 2 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a product name (as passed to the cart and compare set).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "product".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a Belarusian phone number.
///
/// ## Rules
/// - Must start with the `+375` country prefix
/// - Followed by 9 digits: operator code (2) + subscriber number (7)
/// - Spaces between groups are allowed and ignored
///
/// ## Example
/// ```rust
/// use sweethome_core::validation::validate_phone;
///
/// assert!(validate_phone("+375 33 875 10 74").is_ok());
/// assert!(validate_phone("+375338751074").is_ok());
/// assert!(validate_phone("8 033 875 10 74").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    let digits = compact.strip_prefix("+375").ok_or_else(|| ValidationError::InvalidFormat {
        field: "phone".to_string(),
        reason: "expected format: +375 XX XXX XX XX".to_string(),
    })?;

    if digits.len() != 9 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "expected format: +375 XX XXX XX XX".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// Structural check only: one `@`, non-empty local part, a dot somewhere
/// in the domain, no whitespace. Deliverability is not our problem.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    // The dot must split the domain into two non-empty halves
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a free-text field (feedback, review body, error description).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 2000 characters
pub fn validate_text(field: &str, text: &str) -> ValidationResult<()> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if text.chars().count() > 2000 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 2000,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price before it enters the cart.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (promotional items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a user-entered order amount against the configured bounds.
///
/// Used by form-level checks; the delivery calculator applies the same
/// bounds itself and reports them as `CoreError`s.
pub fn validate_order_amount(amount: Money) -> ValidationResult<()> {
    if amount < MIN_ORDER_AMOUNT || amount > MAX_ORDER_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: "order amount".to_string(),
            min: MIN_ORDER_AMOUNT.rubles(),
            max: MAX_ORDER_AMOUNT.rubles(),
        });
    }

    Ok(())
}

/// Validates a review rating.
///
/// ## Rules
/// - Must be between 1 and 5 stars
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
