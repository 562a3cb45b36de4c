use cabana_core::{FeatureFlags, LayeredConfig, PricingConfig};

use crate::error::CliResult;

const DEFAULT_LAYER: &str = "default";

/// Lists feature flags and pricing settings with the layer that supplied each.
///
/// Pricing settings are resolved first so an invalid value fails the command
/// instead of being shown.
pub fn handle(layers: &LayeredConfig) -> CliResult<String> {
    let pricing = PricingConfig::resolve(layers)?;
    let flags = FeatureFlags::resolve(layers);

    let mut lines = vec!["Feature flags".to_string()];
    for (key, value) in [
        (FeatureFlags::CHECKOUT_KEY, flags.checkout_enabled),
        (FeatureFlags::AUTH_KEY, flags.auth_enabled),
    ] {
        lines.push(format!("  {key:<24} {:<8} ({})", value, source_of(layers, key)));
    }

    lines.push(String::new());
    lines.push("Pricing".to_string());
    let values = [
        pricing.currency.clone(),
        format!("{:.2}%", pricing.donation_rate.fraction() * 100.0),
        pricing.free_ship_threshold_cents.to_string(),
        pricing.default_shipping_cents.to_string(),
    ];
    for (key, value) in PricingConfig::KEYS.iter().zip(values) {
        lines.push(format!("  {key:<24} {value:<8} ({})", source_of(layers, key)));
    }

    Ok(lines.join("\n"))
}

fn source_of(layers: &LayeredConfig, key: &str) -> String {
    layers
        .resolve(key)
        .map(|resolved| resolved.layer)
        .unwrap_or_else(|| DEFAULT_LAYER.to_string())
}
