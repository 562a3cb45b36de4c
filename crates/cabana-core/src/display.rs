//! # Display Helpers
//!
//! Text the cart UI shows next to the pricing numbers. Strings only; the
//! storefront scripts decide where they go on the page.

use serde::Serialize;
use ts_rs::TS;

use crate::config::PricingConfig;
use crate::money::Money;
use crate::types::PricingResult;

/// Shown once the discounted subtotal reaches the free-shipping threshold.
pub const FREE_SHIPPING_UNLOCKED: &str = "You've unlocked free shipping (Australia-wide)!";

/// Symbol used for a currency on the Australian storefront.
///
/// AUD is the home currency and gets a bare `$`; other dollars are prefixed
/// so they cannot be mistaken for it.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "AUD" => Some("$"),
        "USD" => Some("US$"),
        "NZD" => Some("NZ$"),
        "CAD" => Some("CA$"),
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        _ => None,
    }
}

/// Formats cents as a currency string with thousands separators.
///
/// ## Example
/// ```rust
/// use cabana_core::display::format_currency;
/// use cabana_core::money::Money;
///
/// assert_eq!(format_currency(Money::from_cents(9000), "AUD"), "$90.00");
/// assert_eq!(format_currency(Money::from_cents(123456789), "NZD"), "NZ$1,234,567.89");
/// assert_eq!(format_currency(Money::from_cents(-550), "JPY"), "-JPY 5.50");
/// ```
pub fn format_currency(amount: Money, code: &str) -> String {
    let sign = if amount.cents() < 0 { "-" } else { "" };
    let whole = group_thousands(amount.dollars().unsigned_abs());
    let cents = amount.cents_part();

    match currency_symbol(code) {
        Some(symbol) => format!("{sign}{symbol}{whole}.{cents:02}"),
        None => format!("{sign}{} {whole}.{cents:02}", code.to_ascii_uppercase()),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Free-shipping banner content derived from a pricing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FreeShippingBanner {
    pub message: String,
    /// Width of the progress bar, 0..=100.
    pub progress_percent: u8,
    pub unlocked: bool,
}

impl FreeShippingBanner {
    /// Builds the banner for a cart.
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::config::PricingConfig;
    /// use cabana_core::display::FreeShippingBanner;
    /// use cabana_core::pricing::compute_totals;
    /// use cabana_core::types::{LineItem, PricingInput};
    ///
    /// let config = PricingConfig::default();
    /// let totals = compute_totals(&PricingInput::new(vec![LineItem::new(110.0, 1)]), &config).unwrap();
    /// let banner = FreeShippingBanner::from_result(&totals, &config);
    /// assert_eq!(banner.message, "Spend $90.00 more to unlock free shipping");
    /// assert_eq!(banner.progress_percent, 55);
    /// ```
    pub fn from_result(result: &PricingResult, config: &PricingConfig) -> Self {
        let remaining = result.remaining_for_free_ship();
        let unlocked = remaining.is_zero();

        let message = if unlocked {
            FREE_SHIPPING_UNLOCKED.to_string()
        } else {
            format!(
                "Spend {} more to unlock free shipping",
                format_currency(remaining, &config.currency)
            )
        };

        FreeShippingBanner {
            message,
            progress_percent: result.free_ship_progress_percent,
            unlocked,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
