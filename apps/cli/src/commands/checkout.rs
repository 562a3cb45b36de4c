use std::path::Path;

use cabana_core::checkout::{
    parse_base_url, sanitize_line_items, CheckoutRequest, CheckoutSessionRequest,
    CheckoutSettings, StaticCatalog,
};
use cabana_core::{LayeredConfig, PricingConfig};
use tracing::{info, warn};

use crate::error::{read_file, CliResult};

/// Builds the provider session request for a checkout payload.
///
/// Nothing is sent; the request is returned as pretty JSON. Checkout must be
/// enabled and a provider key configured in the layers.
pub fn handle(
    layers: &LayeredConfig,
    request_path: &Path,
    catalog_path: &Path,
    base_url: &str,
) -> CliResult<String> {
    let settings = CheckoutSettings::resolve(layers)?;
    let pricing = PricingConfig::resolve(layers)?;
    let base_url = parse_base_url(base_url)?;

    let catalog = StaticCatalog::from_json(&read_file(catalog_path)?)?;
    let request = CheckoutRequest::from_json(&read_file(request_path)?)?;
    info!(
        requested = request.line_items.len(),
        catalog_size = catalog.len(),
        "Building checkout session"
    );

    let sanitized = sanitize_line_items(&request.line_items, &catalog, &base_url, &pricing.currency);
    for rejected in &sanitized.rejected {
        warn!(sku = %rejected.sku, reason = ?rejected.reason, "Dropped checkout line item");
    }

    let session = CheckoutSessionRequest::build(sanitized.accepted, &settings, &base_url)?;
    info!(
        line_items = session.line_items.len(),
        region = %session.metadata.region,
        "Checkout session ready"
    );

    Ok(serde_json::to_string_pretty(&session)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use cabana_core::{CoreError, MapSource};
    use std::io::Write;

    const CATALOG: &str = r#"[
        {"sku": "TOWEL-SAND", "name": "Sand Beach Towel", "price": 45.0, "image": "/images/towel-sand.webp"},
        {"sku": "HAT", "name": "Straw Hat", "price": 0.2}
    ]"#;

    fn temp_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn enabled_layers() -> LayeredConfig {
        LayeredConfig::new().with_layer(
            MapSource::new("explicit")
                .with("checkoutEnabled", "true")
                .with("providerSecretKey", "sk_test_123"),
        )
    }

    #[test]
    fn test_builds_session_from_catalog_prices() {
        let catalog = temp_json(CATALOG);
        let request = temp_json(
            r#"{"lineItems":[
                {"sku":"TOWEL-SAND","quantity":3,"price":0.01},
                {"sku":"HAT"},
                {"sku":"MISSING"}
            ]}"#,
        );

        let out = handle(
            &enabled_layers(),
            request.path(),
            catalog.path(),
            "https://cabana.example",
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let items = value["line_items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["quantity"], 3);
        assert_eq!(items[0]["price_data"]["unit_amount"], 4500);
        assert_eq!(items[0]["price_data"]["currency"], "aud");
        assert_eq!(
            items[0]["price_data"]["product_data"]["images"][0],
            "https://cabana.example/images/towel-sand.webp"
        );
        assert_eq!(value["mode"], "payment");
        assert_eq!(value["success_url"], "https://cabana.example/cart.html?success=true");
        assert_eq!(value["metadata"]["site"], "CABANA Collections");
        assert!(!out.contains("sk_test_123"));
    }

    #[test]
    fn test_disabled_checkout_is_refused() {
        let catalog = temp_json(CATALOG);
        let request = temp_json(r#"{"lineItems":[{"sku":"TOWEL-SAND"}]}"#);

        let err = handle(
            &LayeredConfig::new(),
            request.path(),
            catalog.path(),
            "https://cabana.example",
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::CheckoutDisabled)));
    }

    #[test]
    fn test_no_valid_items_is_an_error() {
        let catalog = temp_json(CATALOG);
        let request = temp_json(r#"{"lineItems":[{"sku":"MISSING"}]}"#);

        let err = handle(
            &enabled_layers(),
            request.path(),
            catalog.path(),
            "https://cabana.example",
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::NoValidLineItems)));
    }

    #[test]
    fn test_bad_base_url_is_an_error() {
        let catalog = temp_json(CATALOG);
        let request = temp_json(r#"{"lineItems":[{"sku":"TOWEL-SAND"}]}"#);

        let err = handle(&enabled_layers(), request.path(), catalog.path(), "not a url").unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::InvalidUrl { .. })));
    }
}
