//! # cabana-core: Pure Business Logic for the CABANA Storefront
//!
//! This crate is the **heart** of the storefront's server-side code. It
//! contains the cart pricing engine and everything around it as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CABANA Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Static Site (HTML + scripts)                   │   │
//! │  │    Cart page ──► progress bar ──► "Spend $X more" banner        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (camelCase)                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cabana-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │ pricing  │ │  flags   │ │    checkout      │  │   │
//! │  │   │  Money   │ │ compute_ │ │ Layered  │ │ catalog prices,  │  │   │
//! │  │   │  cents   │ │ totals   │ │ Config   │ │ session request  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           apps/cli (`cabana` binary, env + file layers)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Line items, pricing input/result, donation rate
//! - [`config`] - Pricing constants and their layered resolution
//! - [`pricing`] - The cart pricing engine
//! - [`flags`] - Layered settings resolver and feature flags
//! - [`display`] - Currency formatting and the free-shipping banner
//! - [`checkout`] - Catalog-priced checkout session requests
//! - [`validation`] / [`error`] - Input rules and error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cabana_core::{compute_totals, LineItem, PricingConfig, PricingInput};
//!
//! let config = PricingConfig::default();
//! let input = PricingInput::new(vec![LineItem::new(45.00, 2), LineItem::new(30.00, 1)])
//!     .with_discounts_cents(1000);
//!
//! let totals = compute_totals(&input, &config).unwrap();
//! assert_eq!(totals.subtotal_cents, 12000);
//! assert_eq!(totals.donation_cents, 1100);
//! assert_eq!(totals.remaining_for_free_ship_cents, 9000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod display;
pub mod error;
pub mod flags;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::PricingConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use flags::{FeatureFlags, LayeredConfig, MapSource, ValueSource};
pub use money::Money;
pub use pricing::compute_totals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storefront name, sent as checkout session metadata.
pub const SITE_NAME: &str = "CABANA Collections";

/// Region reported in checkout metadata when none is configured.
pub const DEFAULT_REGION: &str = "AU";

/// Fallback product name when the catalog entry has none.
pub const DEFAULT_PRODUCT_NAME: &str = "CABANA Item";

/// Countries the checkout collects shipping addresses for.
pub const ALLOWED_SHIPPING_COUNTRIES: [&str; 5] = ["AU", "NZ", "US", "GB", "CA"];

/// Maximum line items forwarded to the payment provider.
///
/// ## Business Reason
/// The provider rejects larger sessions outright.
pub const MAX_CHECKOUT_ITEMS: usize = 50;

/// Maximum quantity of a single checkout line.
pub const MAX_CHECKOUT_QUANTITY: i64 = 99;

/// Smallest unit amount the provider will charge (50 cents).
pub const MIN_UNIT_AMOUNT_CENTS: i64 = 50;

/// Largest unit amount the provider will charge.
pub const MAX_UNIT_AMOUNT_CENTS: i64 = 99_999_999;

/// Product names are cut to this many characters.
pub const MAX_PRODUCT_NAME_CHARS: usize = 120;
