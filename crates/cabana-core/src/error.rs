//! # Error Types
//!
//! Domain-specific error types for cabana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cabana-core errors (this file)                                        │
//! │  ├── CoreError        - Checkout and configuration failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cabana CLI errors (apps/cli)                                          │
//! │  └── CliError         - File, parse and core failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT An Error
//! Business edge cases are clamped by the pricing engine instead of raised:
//! a discount larger than the subtotal, a missing shipping override, or a
//! negative discount all produce a normal result.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout is switched off by the server-side flag.
    #[error("Checkout is currently disabled")]
    CheckoutDisabled,

    /// No payment provider key is available.
    #[error("Payment provider is not configured")]
    ProviderNotConfigured,

    /// Sanitization left nothing to charge for.
    ///
    /// ## When This Occurs
    /// - Every requested SKU is unknown to the catalog
    /// - Every catalog price falls outside the provider's accepted range
    /// - The request contained no items at all
    #[error("No valid line items provided")]
    NoValidLineItems,

    /// A URL could not be parsed or joined.
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl { field: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Field names carry the position of the offending value, for example
/// `lineItems[2].quantity`, so the cart UI can point at the right row.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Amount must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (malformed JSON shape, unparsable setting, etc.).
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
