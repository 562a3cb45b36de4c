//! # Cart Pricing Engine
//!
//! Turns cart rows plus discount/shipping inputs into a full pricing
//! breakdown. Pure: no I/O, no shared state, same input → same output.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. unit cents   = round(price × 100)          per line item           │
//! │  2. subtotal     = Σ unit cents × quantity                              │
//! │  3. discounted   = max(0, subtotal − discounts)                         │
//! │  4. free ship?   = discounted >= threshold                              │
//! │  5. shipping     = free ? 0 : override or default fee                   │
//! │  6. total        = discounted + shipping                                │
//! │  7. donation     = floor(discounted × rate)    merchandise only        │
//! │  8. remaining    = max(0, threshold − discounted)                       │
//! │  9. progress %   = min(100, round(discounted ÷ threshold × 100))        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cabana_core::config::PricingConfig;
//! use cabana_core::pricing::compute_totals;
//! use cabana_core::types::{LineItem, PricingInput};
//!
//! let input = PricingInput::new(vec![LineItem::new(45.0, 2), LineItem::new(30.0, 1)])
//!     .with_discounts_cents(1000);
//! let totals = compute_totals(&input, &PricingConfig::default()).unwrap();
//!
//! assert_eq!(totals.total_cents, 12000);
//! assert_eq!(totals.free_ship_progress_percent, 55);
//! ```

use crate::config::PricingConfig;
use crate::money::Money;
use crate::types::{LineItem, PricingInput, PricingResult};
use crate::validation::{validate_line_items, ValidationResult};

/// Computes the pricing breakdown for a cart.
///
/// ## Errors
/// Returns a [`crate::ValidationError`] when a price is negative or not
/// finite, a quantity is below 1, or `config` fails
/// [`PricingConfig::validate`]. Nothing else fails:
/// - a discount larger than the subtotal floors the subtotal at zero
/// - a negative discount or shipping override is treated as zero
/// - a missing shipping override uses `config.default_shipping_cents`
///
/// ## Free Shipping
/// Eligibility is tested on the subtotal *after* discounts, and the
/// threshold is inclusive: exactly reaching it qualifies.
pub fn compute_totals(input: &PricingInput, config: &PricingConfig) -> ValidationResult<PricingResult> {
    config.validate()?;
    validate_line_items(&input.line_items)?;

    let subtotal = subtotal(&input.line_items);
    let discounts = Money::from_cents(input.discounts_cents).non_negative();
    let discounted = (subtotal - discounts).non_negative();

    let threshold = config.free_ship_threshold();
    let qualifies_free_ship = discounted >= threshold;

    let shipping = if qualifies_free_ship {
        Money::zero()
    } else {
        input
            .shipping_cents
            .map(Money::from_cents)
            .unwrap_or_else(|| config.default_shipping())
            .non_negative()
    };

    let total = discounted + shipping;
    let donation = config.donation_rate.share_of(discounted);
    let remaining = (threshold - discounted).non_negative();

    Ok(PricingResult {
        subtotal_cents: subtotal.cents(),
        discounts_cents: discounts.cents(),
        discounted_subtotal_cents: discounted.cents(),
        qualifies_free_ship,
        shipping_applied_cents: shipping.cents(),
        total_cents: total.cents(),
        donation_cents: donation.cents(),
        remaining_for_free_ship_cents: remaining.cents(),
        free_ship_progress_percent: progress_percent(discounted, threshold),
    })
}

/// Sum of unit price × quantity over all rows, saturating.
fn subtotal(items: &[LineItem]) -> Money {
    items
        .iter()
        .fold(Money::zero(), |sum, item| sum + item.line_total())
}

/// `min(100, round(amount / threshold * 100))`, halves rounding up.
///
/// Computed in integers: `round(a * 100 / t) = floor((200a + t) / 2t)`.
/// A zero threshold means every cart already qualifies, so the bar is full.
fn progress_percent(amount: Money, threshold: Money) -> u8 {
    let threshold = i128::from(threshold.cents());
    if threshold <= 0 {
        return 100;
    }

    let amount = i128::from(amount.cents());
    let percent = (amount * 200 + threshold) / (threshold * 2);
    percent.clamp(0, 100) as u8
}

// =============================================================================
// Unit Tests
// =============================================================================
