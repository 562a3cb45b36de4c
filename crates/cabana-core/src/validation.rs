//! # Validation Module
//!
//! Input validation for cart payloads and storefront settings.
//!
//! ## Errors vs. Clamps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Gets Rejected                                 │
//! │                                                                         │
//! │  REJECTED (ValidationError)         CLAMPED (normal result)             │
//! │  ───────────────────────────        ─────────────────────────           │
//! │  • lineItems not an array           • discount > subtotal → 0           │
//! │  • price is NaN / infinite          • no shipping override → default    │
//! │  • price < 0                        • negative discount → 0             │
//! │  • quantity < 1                     • huge quantity → saturates         │
//! │                                                                         │
//! │  Shape problems are errors. Business edge cases are normalized so the  │
//! │  cart can recalculate on every keystroke without failing.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::LineItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least 1
///
/// There is no upper bound here; the checkout boundary applies its own cap.
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog price in major units.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is allowed for free gifts)
///
/// ## Example
/// ```rust
/// use cabana_core::validation::validate_price;
///
/// assert!(validate_price("price", 10.99).is_ok());
/// assert!(validate_price("price", 0.0).is_ok());
/// assert!(validate_price("price", -1.0).is_err());
/// assert!(validate_price("price", f64::INFINITY).is_err());
/// ```
pub fn validate_price(field: &str, price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates every line item, reporting the first bad row.
///
/// Field names are indexed (`lineItems[3].price`) so the error points at the
/// offending cart row.
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    for (index, item) in items.iter().enumerate() {
        validate_price(&format!("lineItems[{index}].price"), item.price)?;
        validate_quantity(&format!("lineItems[{index}].quantity"), item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Settings Validators
// =============================================================================

/// Validates an amount of cents that must not be negative.
pub fn validate_non_negative_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an ISO 4217 currency code (three ASCII letters).
///
/// ## Example
/// ```rust
/// use cabana_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("AUD").is_ok());
/// assert!(validate_currency_code("AU").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a three-letter ISO 4217 code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
