//! # Pricing Configuration
//!
//! The storefront-wide constants the pricing engine reads: currency,
//! donation rate, free-shipping threshold and default shipping fee.
//!
//! A `PricingConfig` is built once at startup (defaults, or resolved from a
//! [`LayeredConfig`]) and then only ever borrowed. Tests pass their own
//! instance per call instead of mutating anything global.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::flags::LayeredConfig;
use crate::money::Money;
use crate::types::DonationRate;
use crate::validation::{validate_currency_code, validate_non_negative_cents, ValidationResult};

/// Pricing constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// ISO 4217 code, uppercase.
    pub currency: String,

    /// Share of discounted merchandise value pledged to charity.
    pub donation_rate: DonationRate,

    /// Discounted subtotal at or above which shipping is free.
    pub free_ship_threshold_cents: i64,

    /// Shipping fee when the cart supplies no override.
    pub default_shipping_cents: i64,
}

impl Default for PricingConfig {
    /// AUD, 10% donation, free shipping from $200, $10 flat shipping.
    fn default() -> Self {
        PricingConfig {
            currency: "AUD".to_string(),
            donation_rate: DonationRate::default(),
            free_ship_threshold_cents: 20_000,
            default_shipping_cents: 1_000,
        }
    }
}

impl PricingConfig {
    pub const CURRENCY_KEY: &'static str = "currency";
    pub const DONATION_RATE_KEY: &'static str = "donationRate";
    pub const FREE_SHIP_THRESHOLD_KEY: &'static str = "freeShipThresholdCents";
    pub const DEFAULT_SHIPPING_KEY: &'static str = "defaultShippingCents";

    /// Every key [`PricingConfig::resolve`] reads.
    pub const KEYS: [&'static str; 4] = [
        Self::CURRENCY_KEY,
        Self::DONATION_RATE_KEY,
        Self::FREE_SHIP_THRESHOLD_KEY,
        Self::DEFAULT_SHIPPING_KEY,
    ];

    /// Free-shipping threshold as Money.
    #[inline]
    pub fn free_ship_threshold(&self) -> Money {
        Money::from_cents(self.free_ship_threshold_cents)
    }

    /// Default shipping fee as Money.
    #[inline]
    pub fn default_shipping(&self) -> Money {
        Money::from_cents(self.default_shipping_cents)
    }

    /// Checks every field.
    ///
    /// The donation rate needs no check here: [`DonationRate`] cannot hold
    /// more than 100%.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_currency_code(&self.currency)?;
        validate_non_negative_cents(Self::FREE_SHIP_THRESHOLD_KEY, self.free_ship_threshold_cents)?;
        validate_non_negative_cents(Self::DEFAULT_SHIPPING_KEY, self.default_shipping_cents)?;
        Ok(())
    }

    /// Builds a config from layered settings, falling back to defaults per key.
    ///
    /// A value that is present but unparsable is an error naming the key;
    /// it never silently falls through to a lower layer.
    ///
    /// ## Example
    /// ```rust
    /// use cabana_core::config::PricingConfig;
    /// use cabana_core::flags::{LayeredConfig, MapSource};
    ///
    /// let layers = LayeredConfig::new().with_layer(
    ///     MapSource::new("explicit")
    ///         .with("donationRate", "0.05")
    ///         .with("currency", "nzd"),
    /// );
    /// let config = PricingConfig::resolve(&layers).unwrap();
    /// assert_eq!(config.currency, "NZD");
    /// assert_eq!(config.donation_rate.bps(), 500);
    /// assert_eq!(config.free_ship_threshold_cents, 20_000);
    /// ```
    pub fn resolve(layers: &LayeredConfig) -> ValidationResult<Self> {
        let mut config = PricingConfig::default();

        if let Some(currency) = layers.get(Self::CURRENCY_KEY) {
            config.currency = currency.trim().to_ascii_uppercase();
        }

        if let Some(raw) = layers.get(Self::DONATION_RATE_KEY) {
            let fraction = raw
                .trim()
                .parse::<f64>()
                .map_err(|e| invalid(Self::DONATION_RATE_KEY, &raw, &e))?;
            config.donation_rate = DonationRate::from_fraction(fraction)?;
        }

        if let Some(raw) = layers.get(Self::FREE_SHIP_THRESHOLD_KEY) {
            config.free_ship_threshold_cents = parse_cents(Self::FREE_SHIP_THRESHOLD_KEY, &raw)?;
        }

        if let Some(raw) = layers.get(Self::DEFAULT_SHIPPING_KEY) {
            config.default_shipping_cents = parse_cents(Self::DEFAULT_SHIPPING_KEY, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_cents(key: &str, raw: &str) -> ValidationResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| invalid(key, raw, &e))
}

fn invalid(key: &str, raw: &str, err: &dyn std::fmt::Display) -> ValidationError {
    ValidationError::InvalidFormat {
        field: key.to_string(),
        reason: format!("{raw:?}: {err}"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::MapSource;

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.currency, "AUD");
        assert_eq!(config.donation_rate.bps(), 1000);
        assert_eq!(config.free_ship_threshold().cents(), 20_000);
        assert_eq!(config.default_shipping().cents(), 1_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_with_no_layers_is_default() {
        let config = PricingConfig::resolve(&LayeredConfig::new()).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_resolve_mixes_layers_per_key() {
        let layers = LayeredConfig::new()
            .with_layer(MapSource::new("explicit").with("freeShipThresholdCents", "15000"))
            .with_layer(
                MapSource::new("file")
                    .with("freeShipThresholdCents", "99999")
                    .with("defaultShippingCents", " 1500 "),
            );

        let config = PricingConfig::resolve(&layers).unwrap();
        assert_eq!(config.free_ship_threshold_cents, 15_000);
        assert_eq!(config.default_shipping_cents, 1_500);
        assert_eq!(config.currency, "AUD");
    }

    #[test]
    fn test_resolve_rejects_bad_values() {
        let bad = |key: &str, value: &str| {
            let layers =
                LayeredConfig::new().with_layer(MapSource::new("explicit").with(key, value));
            PricingConfig::resolve(&layers)
        };

        let err = bad("donationRate", "ten percent").unwrap_err();
        assert!(err.to_string().starts_with("donationRate has invalid format"));

        assert!(bad("donationRate", "1.5").is_err());
        assert!(bad("freeShipThresholdCents", "200.00").is_err());
        assert!(bad("defaultShippingCents", "-100").is_err());
        assert!(bad("currency", "dollars").is_err());
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let json = serde_json::to_value(PricingConfig::default()).unwrap();
        assert_eq!(json["currency"], "AUD");
        assert_eq!(json["donationRate"], 1000);
        assert_eq!(json["freeShipThresholdCents"], 20000);
    }

    #[test]
    fn test_deserialize_rejects_rate_above_100_percent() {
        let json = r#"{"currency":"AUD","donationRate":20000,"freeShipThresholdCents":20000,"defaultShippingCents":1000}"#;
        assert!(serde_json::from_str::<PricingConfig>(json).is_err());
    }
}
