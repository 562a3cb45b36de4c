//! # Domain Types
//!
//! Value objects exchanged with the storefront's cart scripts.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │    LineItem     │   │  PricingInput   │   │   PricingResult      │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  price (AUD $)  │──►│  lineItems      │──►│  subtotalCents       │  │
//! │  │  quantity       │   │  discountsCents │   │  totalCents          │  │
//! │  └─────────────────┘   │  shippingCents? │   │  donationCents       │  │
//! │                        └─────────────────┘   │  freeShipProgress..  │  │
//! │  ┌─────────────────┐                          └──────────────────────┘  │
//! │  │  DonationRate   │                                                    │
//! │  │  bps (u32)      │  1000 = 10%                                        │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON field names are camelCase to match what the browser already sends.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;

// =============================================================================
// Donation Rate
// =============================================================================

/// Share of merchandise value pledged to charity, in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%. Keeping the rate as an integer lets the donation
/// be computed with integer division, which truncates exactly. A float rate
/// of `0.1` is really `0.1000000000000000055...`.
///
/// Every constructor, deserialization included, keeps the rate within
/// `0..=MAX_BPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "u32")]
pub struct DonationRate(u32);

impl DonationRate {
    /// 100% in basis points.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a donation rate from basis points, at most [`Self::MAX_BPS`].
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::types::DonationRate;
    ///
    /// assert_eq!(DonationRate::from_bps(825).unwrap().bps(), 825);
    /// assert!(DonationRate::from_bps(20_000).is_err());
    /// ```
    pub fn from_bps(bps: u32) -> ValidationResult<Self> {
        if bps > Self::MAX_BPS {
            return Err(ValidationError::OutOfRange {
                field: "donationRate".to_string(),
                min: 0,
                max: i64::from(Self::MAX_BPS),
            });
        }
        Ok(DonationRate(bps))
    }

    /// Creates a donation rate from a fraction in `[0, 1]`.
    ///
    /// Fractions finer than a basis point are rounded down, so the pledge
    /// never exceeds `floor(amount * fraction)`. Float noise within a
    /// millionth of a basis point snaps to the nearest one first (`0.0029`
    /// is `28.999...` bps as an `f64` and still means 29).
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::types::DonationRate;
    ///
    /// let rate = DonationRate::from_fraction(0.10).unwrap();
    /// assert_eq!(rate.bps(), 1000);
    /// assert_eq!(DonationRate::from_fraction(0.12345).unwrap().bps(), 1234);
    /// assert!(DonationRate::from_fraction(1.5).is_err());
    /// ```
    pub fn from_fraction(fraction: f64) -> ValidationResult<Self> {
        if !fraction.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "donationRate".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ValidationError::OutOfRange {
                field: "donationRate".to_string(),
                min: 0,
                max: 1,
            });
        }

        let scaled = fraction * f64::from(Self::MAX_BPS);
        let nearest = scaled.round();
        let bps = if (scaled - nearest).abs() < 1e-6 {
            nearest
        } else {
            scaled.floor()
        };
        Self::from_bps(bps as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX_BPS)
    }

    /// Computes the donation on a non-negative amount, truncating.
    ///
    /// Truncation means the storefront never pledges more than it collects.
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::money::Money;
    /// use cabana_core::types::DonationRate;
    ///
    /// let rate = DonationRate::from_bps(1000).unwrap();
    /// // 10% of $100.99 = $10.099 → $10.09
    /// assert_eq!(rate.share_of(Money::from_cents(10099)).cents(), 1009);
    /// ```
    pub fn share_of(&self, amount: Money) -> Money {
        let share = i128::from(amount.cents()) * i128::from(self.0) / i128::from(Self::MAX_BPS);
        let cents = i64::try_from(share).unwrap_or(if share < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(cents)
    }
}

impl TryFrom<u32> for DonationRate {
    type Error = ValidationError;

    fn try_from(bps: u32) -> ValidationResult<Self> {
        DonationRate::from_bps(bps)
    }
}

impl Default for DonationRate {
    /// 10%
    fn default() -> Self {
        DonationRate(1000)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One cart entry as the cart UI supplies it.
///
/// `price` is in major units (dollars) straight from the catalog. It is only
/// turned into cents inside the pricing engine, after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Unit price in dollars.
    pub price: f64,

    /// Number of units, at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(price: f64, quantity: i64) -> Self {
        LineItem { price, quantity }
    }

    /// Unit price converted to cents.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_major_units(self.price)
    }

    /// Unit price × quantity, in cents.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().saturating_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Pricing Input
// =============================================================================

/// The request handed to [`crate::pricing::compute_totals`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    /// Cart rows. Order does not affect the result; duplicates count twice.
    pub line_items: Vec<LineItem>,

    /// Total discount in cents. Negative values are treated as zero.
    #[serde(default)]
    pub discounts_cents: i64,

    /// Shipping override in cents. `None` means use the configured default.
    #[serde(default)]
    pub shipping_cents: Option<i64>,
}

impl PricingInput {
    /// Creates an input with no discount and default shipping.
    pub fn new(line_items: Vec<LineItem>) -> Self {
        PricingInput {
            line_items,
            ..Default::default()
        }
    }

    /// Sets the discount in cents.
    pub fn with_discounts_cents(mut self, cents: i64) -> Self {
        self.discounts_cents = cents;
        self
    }

    /// Sets the shipping override in cents.
    pub fn with_shipping_cents(mut self, cents: i64) -> Self {
        self.shipping_cents = Some(cents);
        self
    }

    /// Parses a cart payload as sent by the browser.
    ///
    /// A payload whose `lineItems` is not an array, or whose prices and
    /// quantities are not numbers, is rejected as a validation error.
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::types::PricingInput;
    ///
    /// let input = PricingInput::from_json(
    ///     r#"{"lineItems":[{"price":45.0,"quantity":2}],"discountsCents":1000}"#,
    /// ).unwrap();
    /// assert_eq!(input.line_items.len(), 1);
    /// assert_eq!(input.shipping_cents, None);
    ///
    /// assert!(PricingInput::from_json(r#"{"lineItems":{"price":1}}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
            field: "cart".to_string(),
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// Fully derived pricing breakdown. All amounts are cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub subtotal_cents: i64,
    pub discounts_cents: i64,
    pub discounted_subtotal_cents: i64,
    pub qualifies_free_ship: bool,
    pub shipping_applied_cents: i64,
    pub total_cents: i64,
    /// Charity pledge on merchandise after discounts, excluding shipping.
    pub donation_cents: i64,
    pub remaining_for_free_ship_cents: i64,
    /// 0..=100, for the progress bar width.
    pub free_ship_progress_percent: u8,
}

impl PricingResult {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the amount still needed for free shipping as Money.
    #[inline]
    pub fn remaining_for_free_ship(&self) -> Money {
        Money::from_cents(self.remaining_for_free_ship_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
