use std::path::Path;

use cabana_core::display::{format_currency, FreeShippingBanner};
use cabana_core::{compute_totals, LayeredConfig, Money, PricingConfig, PricingInput, PricingResult};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{read_file, CliResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteOutput<'a> {
    currency: &'a str,
    totals: &'a PricingResult,
    banner: &'a FreeShippingBanner,
}

/// Prices the cart at `cart_path`.
///
/// `--discounts-cents` and `--shipping-cents` replace whatever the cart file
/// carries.
pub fn handle(
    layers: &LayeredConfig,
    cart_path: &Path,
    discounts_cents: Option<i64>,
    shipping_cents: Option<i64>,
    json: bool,
) -> CliResult<String> {
    let config = PricingConfig::resolve(layers)?;
    let mut input = PricingInput::from_json(&read_file(cart_path)?)?;

    if let Some(cents) = discounts_cents {
        input = input.with_discounts_cents(cents);
    }
    if let Some(cents) = shipping_cents {
        input = input.with_shipping_cents(cents);
    }
    debug!(items = input.line_items.len(), "Pricing cart");

    let totals = compute_totals(&input, &config)?;
    let banner = FreeShippingBanner::from_result(&totals, &config);
    info!(
        total_cents = totals.total_cents,
        free_ship = totals.qualifies_free_ship,
        "Cart priced"
    );

    if json {
        let output = QuoteOutput {
            currency: &config.currency,
            totals: &totals,
            banner: &banner,
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    Ok(render_summary(&totals, &banner, &config.currency))
}

fn render_summary(totals: &PricingResult, banner: &FreeShippingBanner, currency: &str) -> String {
    let fmt = |cents: i64| format_currency(Money::from_cents(cents), currency);
    let shipping = if totals.qualifies_free_ship {
        "FREE".to_string()
    } else {
        fmt(totals.shipping_applied_cents)
    };

    let mut lines = vec![format!("Subtotal:  {:>14}", fmt(totals.subtotal_cents))];
    if totals.discounts_cents > 0 {
        lines.push(format!("Discounts: {:>14}", format!("-{}", fmt(totals.discounts_cents))));
    }
    lines.push(format!("Shipping:  {:>14}", shipping));
    lines.push(format!("Total:     {:>14}", fmt(totals.total_cents)));
    lines.push(format!("Donation:  {:>14}", fmt(totals.donation_cents)));
    lines.push(String::new());
    lines.push(format!("{} [{}%]", banner.message, banner.progress_percent));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabana_core::MapSource;
    use std::io::Write;

    fn cart_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_quote_summary() {
        let cart = cart_file(r#"{"lineItems":[{"price":45.0,"quantity":2},{"price":30.0,"quantity":1}]}"#);
        let out = handle(&LayeredConfig::new(), cart.path(), Some(1000), None, false).unwrap();

        assert!(out.contains("Subtotal:"));
        assert!(out.contains("$120.00"));
        assert!(out.contains("-$10.00"));
        assert!(out.contains("$110.00"));
        assert!(out.contains("$11.00"));
        assert!(out.ends_with("Spend $90.00 more to unlock free shipping [55%]"));
    }

    #[test]
    fn test_summary_layout() {
        let cart = cart_file(r#"{"lineItems":[{"price":250.0,"quantity":1}]}"#);
        let out = handle(&LayeredConfig::new(), cart.path(), None, None, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Subtotal:         $250.00",
                "Shipping:            FREE",
                "Total:            $250.00",
                "Donation:          $25.00",
                "",
                "You've unlocked free shipping (Australia-wide)! [100%]",
            ]
        );
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_quote_json_uses_configured_currency() {
        let cart = cart_file(r#"{"lineItems":[{"price":250.0,"quantity":1}],"shippingCents":1500}"#);
        let layers = LayeredConfig::new().with_layer(MapSource::new("explicit").with("currency", "nzd"));

        let out = handle(&layers, cart.path(), None, None, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["currency"], "NZD");
        assert_eq!(value["totals"]["subtotalCents"], 25000);
        assert_eq!(value["totals"]["shippingAppliedCents"], 0);
        assert_eq!(value["totals"]["totalCents"], 25000);
        assert_eq!(value["banner"]["unlocked"], true);
        assert_eq!(value["banner"]["progressPercent"], 100);
    }

    #[test]
    fn test_shipping_flag_overrides_cart() {
        let cart = cart_file(r#"{"lineItems":[{"price":10.0,"quantity":1}],"shippingCents":1500}"#);
        let out = handle(&LayeredConfig::new(), cart.path(), None, Some(0), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["totals"]["shippingAppliedCents"], 0);
        assert_eq!(value["totals"]["totalCents"], 1000);
    }

    #[test]
    fn test_invalid_line_item_is_an_error() {
        let cart = cart_file(r#"{"lineItems":[{"price":10.0,"quantity":0}]}"#);
        let err = handle(&LayeredConfig::new(), cart.path(), None, None, false).unwrap_err();
        assert!(err.to_string().contains("lineItems[0].quantity"));
    }
}
