//! # Forms
//!
//! Typed form structs with field-level validation and stubbed
//! submissions.
//!
//! ## Validation Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form Submission Flow                                 │
//! │                                                                         │
//! │  submit_*(form)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate() ── runs EVERY field validator, collecting all failures      │
//! │       │        (one bad field never hides another)                      │
//! │       │                                                                 │
//! │       ├── any failure ──► Err(SubmissionRejected { errors })            │
//! │       │                   one FieldError per offending input,           │
//! │       │                   for inline display next to it                 │
//! │       │                                                                 │
//! │       └── all clear ────► log the payload (THE backend stub),           │
//! │                           record the analytics event,                   │
//! │                           return the acknowledgment message             │
//! │                                                                         │
//! │  No network I/O happens anywhere below this module.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::info;

use sweethome_core::validation::{
    validate_customer_name, validate_email, validate_phone, validate_rating, validate_text,
    ValidationResult,
};

use crate::analytics::EventLog;
use crate::catalog;

// =============================================================================
// Field Errors
// =============================================================================

/// A validation failure attached to one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A submission blocked by validation.
#[derive(Debug, Error)]
#[error("{0} field(s) failed validation", .errors.len())]
pub struct SubmissionRejected {
    pub errors: Vec<FieldError>,
}

/// Runs one validator, folding a failure into the error list.
fn check(errors: &mut Vec<FieldError>, field: &str, result: ValidationResult<()>) {
    if let Err(err) = result {
        errors.push(FieldError {
            field: field.to_string(),
            message: err.to_string(),
        });
    }
}

// =============================================================================
// Order Form
// =============================================================================

/// The order request form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    /// Optional; validated only when provided.
    pub email: Option<String>,
    /// The catalog product being ordered, if picked from a card.
    pub product: Option<String>,
    pub comment: Option<String>,
}

impl OrderForm {
    /// Validates every field, returning all failures.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check(&mut errors, "name", validate_customer_name(&self.name));
        check(&mut errors, "phone", validate_phone(&self.phone));
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            check(&mut errors, "email", validate_email(email));
        }
        errors
    }
}

/// Submits an order (backend stub).
pub fn submit_order(form: &OrderForm, analytics: &EventLog) -> Result<String, SubmissionRejected> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(SubmissionRejected { errors });
    }

    let conversion_value = catalog::order_value(form.product.as_deref());

    // Future backend integration lands here; today the log line is the wire
    info!(
        name = %form.name,
        phone = %form.phone,
        product = form.product.as_deref().unwrap_or("-"),
        %conversion_value,
        "order form submitted"
    );

    analytics.record(
        "form_submission",
        json!({
            "form_type": "order",
            "product": form.product,
            "conversion_value": conversion_value.kopecks(),
        }),
    );

    Ok("Thanks for your order! We will contact you shortly.".to_string())
}

// =============================================================================
// Review Form
// =============================================================================

/// The product review form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    pub name: String,
    /// 1-5 stars.
    pub rating: u8,
    pub text: String,
}

impl ReviewForm {
    /// Validates every field, returning all failures.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check(&mut errors, "name", validate_customer_name(&self.name));
        check(&mut errors, "rating", validate_rating(self.rating));
        check(&mut errors, "text", validate_text("text", &self.text));
        errors
    }
}

/// Submits a review (backend stub).
pub fn submit_review(form: &ReviewForm, analytics: &EventLog) -> Result<String, SubmissionRejected> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(SubmissionRejected { errors });
    }

    info!(name = %form.name, rating = form.rating, "review submitted");

    analytics.record(
        "review_submitted",
        json!({
            "rating": form.rating,
            "has_text": !form.text.trim().is_empty(),
        }),
    );

    Ok("Thanks for your review! It will appear on the site after moderation.".to_string())
}

// =============================================================================
// Feedback Form
// =============================================================================

/// The free-form suggestion box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackForm {
    pub text: String,
}

impl FeedbackForm {
    /// Validates every field, returning all failures.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check(&mut errors, "text", validate_text("feedback", &self.text));
        errors
    }
}

/// Submits feedback (backend stub).
pub fn submit_feedback(
    form: &FeedbackForm,
    analytics: &EventLog,
) -> Result<String, SubmissionRejected> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(SubmissionRejected { errors });
    }

    info!(length = form.text.trim().len(), "feedback submitted");

    analytics.record(
        "feedback_submitted",
        json!({
            "has_text": true,
            "text_length": form.text.trim().len(),
        }),
    );

    Ok("Thanks for your suggestion! We will definitely consider it.".to_string())
}

// =============================================================================
// Error Report Form
// =============================================================================

/// What kind of site defect is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReportKind {
    Typo,
    BrokenLink,
    Display,
    Other,
}

impl ErrorReportKind {
    /// Tag used in analytics payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorReportKind::Typo => "typo",
            ErrorReportKind::BrokenLink => "broken_link",
            ErrorReportKind::Display => "display",
            ErrorReportKind::Other => "other",
        }
    }
}

/// The "report a problem" form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReportForm {
    pub kind: ErrorReportKind,
    pub description: String,
    /// Page the problem was seen on, when the reporter provides it.
    pub page_url: Option<String>,
}

impl ErrorReportForm {
    /// Validates every field, returning all failures.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check(
            &mut errors,
            "description",
            validate_text("description", &self.description),
        );
        errors
    }
}

/// Submits an error report (backend stub).
pub fn submit_error_report(
    form: &ErrorReportForm,
    analytics: &EventLog,
) -> Result<String, SubmissionRejected> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(SubmissionRejected { errors });
    }

    info!(
        kind = form.kind.as_str(),
        page = form.page_url.as_deref().unwrap_or("-"),
        "site error reported"
    );

    analytics.record(
        "error_reported",
        json!({
            "error_type": form.kind.as_str(),
            "page_url": form.page_url,
            "has_description": !form.description.trim().is_empty(),
        }),
    );

    Ok("Thanks for your help! We will fix the issue shortly.".to_string())
}

// =============================================================================
// Newsletter Signup
// =============================================================================

/// Subscribes an email to the newsletter (backend stub).
pub fn subscribe_newsletter(email: &str, analytics: &EventLog) -> Result<String, SubmissionRejected> {
    let mut errors = Vec::new();
    check(&mut errors, "email", validate_email(email));
    if !errors.is_empty() {
        return Err(SubmissionRejected { errors });
    }

    let email = email.trim();
    info!(%email, "newsletter subscription");

    analytics.record(
        "newsletter_subscription",
        json!({
            "email": email,
            "source": "footer",
        }),
    );

    Ok("Thanks for subscribing! Check your inbox to confirm.".to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sweethome_storage::{MemoryBackend, Storage};

    fn analytics() -> EventLog {
        EventLog::new(Arc::new(Storage::new(MemoryBackend::new())))
    }

    #[test]
    fn test_order_form_reports_every_failing_field() {
        let form = OrderForm {
            name: "A".to_string(),                        // too short
            phone: "12345".to_string(),                   // wrong format
            email: Some("not-an-email".to_string()),      // malformed
            product: None,
            comment: None,
        };

        let errors = form.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "phone", "email"]);
    }

    #[test]
    fn test_order_form_optional_email_skipped_when_empty() {
        let form = OrderForm {
            name: "Alena".to_string(),
            phone: "+375 33 875 10 74".to_string(),
            email: Some("   ".to_string()),
            product: None,
            comment: None,
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_submit_order_records_conversion_value() {
        let analytics = analytics();
        let form = OrderForm {
            name: "Alena".to_string(),
            phone: "+375 33 875 10 74".to_string(),
            email: None,
            product: Some("Honey Paradise Cake".to_string()),
            comment: None,
        };

        let ack = submit_order(&form, &analytics).unwrap();
        assert!(ack.contains("Thanks for your order"));

        let event = analytics.history().into_iter().last().unwrap();
        assert_eq!(event.name, "form_submission");
        assert_eq!(event.payload["form_type"], "order");
        assert_eq!(event.payload["conversion_value"], 60_00);
    }

    #[test]
    fn test_submit_order_unknown_product_worth_zero() {
        let analytics = analytics();
        let form = OrderForm {
            name: "Alena".to_string(),
            phone: "+375 33 875 10 74".to_string(),
            email: None,
            product: Some("Moon Cheese".to_string()),
            comment: None,
        };

        submit_order(&form, &analytics).unwrap();
        let event = analytics.history().into_iter().last().unwrap();
        assert_eq!(event.payload["conversion_value"], 0);
    }

    #[test]
    fn test_rejected_submission_records_nothing() {
        let analytics = analytics();
        let form = OrderForm::default();

        assert!(submit_order(&form, &analytics).is_err());
        assert!(analytics.is_empty());
    }

    #[test]
    fn test_review_validation() {
        let form = ReviewForm {
            name: "Alena".to_string(),
            rating: 6,
            text: "".to_string(),
        };
        let fields: Vec<String> = form.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["rating", "text"]);

        let form = ReviewForm {
            name: "Alena".to_string(),
            rating: 5,
            text: "The honey cake was perfect.".to_string(),
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_submit_review_event() {
        let analytics = analytics();
        let form = ReviewForm {
            name: "Alena".to_string(),
            rating: 4,
            text: "Lovely".to_string(),
        };

        submit_review(&form, &analytics).unwrap();
        let event = analytics.history().into_iter().last().unwrap();
        assert_eq!(event.name, "review_submitted");
        assert_eq!(event.payload["rating"], 4);
        assert_eq!(event.payload["has_text"], true);
    }

    #[test]
    fn test_feedback_requires_text() {
        let analytics = analytics();
        let rejected =
            submit_feedback(&FeedbackForm { text: "  ".to_string() }, &analytics).unwrap_err();
        assert_eq!(rejected.errors[0].field, "text");

        let ack = submit_feedback(
            &FeedbackForm {
                text: "More cinnamon rolls please".to_string(),
            },
            &analytics,
        )
        .unwrap();
        assert!(ack.contains("suggestion"));
    }

    #[test]
    fn test_error_report() {
        let analytics = analytics();
        let form = ErrorReportForm {
            kind: ErrorReportKind::BrokenLink,
            description: "The catalog link on the landing page 404s".to_string(),
            page_url: Some("https://sweethomebakery.example/catalog".to_string()),
        };

        submit_error_report(&form, &analytics).unwrap();
        let event = analytics.history().into_iter().last().unwrap();
        assert_eq!(event.name, "error_reported");
        assert_eq!(event.payload["error_type"], "broken_link");
    }

    #[test]
    fn test_newsletter_signup() {
        let analytics = analytics();

        assert!(subscribe_newsletter("not-an-email", &analytics).is_err());

        let ack = subscribe_newsletter("reader@example.com", &analytics).unwrap();
        assert!(ack.contains("subscribing"));

        let event = analytics.history().into_iter().last().unwrap();
        assert_eq!(event.name, "newsletter_subscription");
        assert_eq!(event.payload["source"], "footer");
    }
}
