//! # Checkout Request Builder
//!
//! Builds the line items and session parameters handed to the payment
//! provider. Nothing here talks to the network; the HTTP handler that sends
//! the request lives outside this crate.
//!
//! ## Trust Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Sanitization                              │
//! │                                                                         │
//! │  Browser sends:   [{ sku: "TOWEL-SAND", quantity: 3 }, ...]             │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  1. keep the first 50 items             (provider limit)               │
//! │  2. clamp quantity to 1..=99            (missing → 1)                  │
//! │  3. look up price + name in the CATALOG (client prices never read)     │
//! │  4. reject unknown SKUs and prices outside 50..=99,999,999 cents       │
//! │  5. truncate names to 120 chars, absolutize image paths                │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  CheckoutSessionRequest { mode: payment, line_items, urls, metadata }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected items are reported back alongside the accepted ones so the
//! caller can log them; an empty accepted list is an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::flags::{FeatureFlags, LayeredConfig};
use crate::money::Money;
use crate::validation::{validate_price, ValidationResult};
use crate::{
    ALLOWED_SHIPPING_COUNTRIES, DEFAULT_PRODUCT_NAME, DEFAULT_REGION, MAX_CHECKOUT_ITEMS,
    MAX_CHECKOUT_QUANTITY, MAX_PRODUCT_NAME_CHARS, MAX_UNIT_AMOUNT_CENTS, MIN_UNIT_AMOUNT_CENTS,
    SITE_NAME,
};

// =============================================================================
// Catalog
// =============================================================================

/// A product as the storefront catalog lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub sku: String,
    pub name: String,
    /// Unit price in dollars, same as cart line items.
    pub price: f64,
    /// Site-relative (`/images/x.webp`) or absolute image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Source of authoritative prices.
pub trait PriceCatalog {
    fn lookup(&self, sku: &str) -> Option<CatalogEntry>;
}

/// In-memory catalog keyed by SKU.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl StaticCatalog {
    /// Parses a JSON array of catalog entries. Later duplicates win.
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
                field: "catalog".to_string(),
                reason: e.to_string(),
            })?;
        Ok(entries.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        StaticCatalog {
            entries: iter
                .into_iter()
                .map(|entry| (entry.sku.clone(), entry))
                .collect(),
        }
    }
}

impl PriceCatalog for StaticCatalog {
    fn lookup(&self, sku: &str) -> Option<CatalogEntry> {
        self.entries.get(sku).cloned()
    }
}

// =============================================================================
// Request / Provider Line Items
// =============================================================================

/// One item in the browser's checkout request.
///
/// Has no price field. Any client-side amount in the payload is ignored and
/// the catalog price is charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequestItem {
    pub sku: String,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Browser checkout payload: `{ "lineItems": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub line_items: Vec<CheckoutRequestItem>,
}

impl CheckoutRequest {
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
            field: "checkout request".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Provider-shaped line item (`price_data` + `quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLineItem {
    pub price_data: PriceData,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceData {
    /// Lowercase ISO code, e.g. `aud`.
    pub currency: String,
    pub unit_amount: i64,
    pub product_data: ProductData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductData {
    pub name: String,
    pub images: Vec<String>,
}

/// Why a requested item did not make it into the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum RejectReason {
    /// Beyond the first [`MAX_CHECKOUT_ITEMS`] entries.
    OverItemLimit,
    UnknownSku,
    /// Catalog price is negative or not a number.
    InvalidCatalogPrice,
    /// Catalog price is outside what the provider accepts.
    AmountOutOfRange { unit_amount: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedItem {
    pub sku: String,
    #[serde(flatten)]
    pub reason: RejectReason,
}

/// Result of [`sanitize_line_items`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizedItems {
    pub accepted: Vec<CheckoutLineItem>,
    pub rejected: Vec<RejectedItem>,
}

// =============================================================================
// Sanitization
// =============================================================================

/// Re-derives every line item from the catalog.
///
/// ## Example
/// ```rust
/// use cabana_core::checkout::{sanitize_line_items, CatalogEntry, CheckoutRequestItem, StaticCatalog};
/// use url::Url;
///
/// let catalog: StaticCatalog = vec![CatalogEntry {
///     sku: "TOWEL".into(),
///     name: "Beach Towel".into(),
///     price: 45.0,
///     image: Some("/images/towel.webp".into()),
/// }]
/// .into_iter()
/// .collect();
///
/// let base = Url::parse("https://cabana.example").unwrap();
/// let items = vec![CheckoutRequestItem { sku: "TOWEL".into(), quantity: Some(500) }];
/// let out = sanitize_line_items(&items, &catalog, &base, "AUD");
///
/// let item = &out.accepted[0];
/// assert_eq!(item.quantity, 99);
/// assert_eq!(item.price_data.unit_amount, 4500);
/// assert_eq!(item.price_data.product_data.images, vec!["https://cabana.example/images/towel.webp"]);
/// ```
pub fn sanitize_line_items<C>(
    items: &[CheckoutRequestItem],
    catalog: &C,
    base_url: &Url,
    currency: &str,
) -> SanitizedItems
where
    C: PriceCatalog + ?Sized,
{
    let mut out = SanitizedItems::default();
    let currency = currency.to_ascii_lowercase();

    for (index, item) in items.iter().enumerate() {
        if index >= MAX_CHECKOUT_ITEMS {
            out.rejected.push(RejectedItem {
                sku: item.sku.clone(),
                reason: RejectReason::OverItemLimit,
            });
            continue;
        }

        match sanitize_item(item, catalog, base_url, &currency) {
            Ok(line) => out.accepted.push(line),
            Err(reason) => out.rejected.push(RejectedItem {
                sku: item.sku.clone(),
                reason,
            }),
        }
    }

    out
}

fn sanitize_item<C>(
    item: &CheckoutRequestItem,
    catalog: &C,
    base_url: &Url,
    currency: &str,
) -> Result<CheckoutLineItem, RejectReason>
where
    C: PriceCatalog + ?Sized,
{
    let entry = catalog
        .lookup(item.sku.trim())
        .ok_or(RejectReason::UnknownSku)?;

    validate_price("price", entry.price).map_err(|_| RejectReason::InvalidCatalogPrice)?;
    let unit_amount = Money::from_major_units(entry.price).cents();
    if !(MIN_UNIT_AMOUNT_CENTS..=MAX_UNIT_AMOUNT_CENTS).contains(&unit_amount) {
        return Err(RejectReason::AmountOutOfRange { unit_amount });
    }

    Ok(CheckoutLineItem {
        price_data: PriceData {
            currency: currency.to_string(),
            unit_amount,
            product_data: ProductData {
                name: product_name(&entry.name),
                images: entry
                    .image
                    .as_deref()
                    .and_then(|image| absolute_image_url(image, base_url))
                    .into_iter()
                    .collect(),
            },
        },
        quantity: clamp_quantity(item.quantity),
    })
}

/// Missing → 1, otherwise clamped into `1..=99`.
fn clamp_quantity(quantity: Option<i64>) -> i64 {
    quantity.unwrap_or(1).clamp(1, MAX_CHECKOUT_QUANTITY)
}

/// Trims and truncates to [`MAX_PRODUCT_NAME_CHARS`] characters.
fn product_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_PRODUCT_NAME.to_string();
    }
    name.chars().take(MAX_PRODUCT_NAME_CHARS).collect()
}

/// Keeps absolute http(s) URLs, resolves anything else against the site.
fn absolute_image_url(image: &str, base_url: &Url) -> Option<String> {
    let image = image.trim();
    if image.is_empty() {
        return None;
    }
    if image.starts_with("http://") || image.starts_with("https://") {
        return Url::parse(image).ok().map(String::from);
    }
    base_url.join(image).ok().map(String::from)
}

// =============================================================================
// Settings & Session Request
// =============================================================================

/// Server-side checkout settings.
///
/// Independent of the browser's own `checkoutEnabled` flag: the server
/// refuses to build sessions unless its layers enable checkout and supply a
/// provider key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    pub region: String,
}

impl CheckoutSettings {
    pub const PROVIDER_KEY: &'static str = "providerSecretKey";
    pub const SUCCESS_URL_KEY: &'static str = "checkoutSuccessUrl";
    pub const CANCEL_URL_KEY: &'static str = "checkoutCancelUrl";
    pub const REGION_KEY: &'static str = "region";

    /// Resolves settings, failing when checkout is off or unconfigured.
    ///
    /// Only the exact value `true` enables server checkout. The lenient
    /// spellings [`crate::flags::parse_flag`] accepts for the browser flag
    /// (`yes`, `on`, `1`) leave it disabled.
    ///
    /// The provider key is only checked for presence; it is never copied
    /// into the settings.
    pub fn resolve(layers: &LayeredConfig) -> CoreResult<Self> {
        let enabled = layers
            .get(FeatureFlags::CHECKOUT_KEY)
            .is_some_and(|value| value == "true");
        if !enabled {
            return Err(CoreError::CheckoutDisabled);
        }

        let has_key = layers
            .get(Self::PROVIDER_KEY)
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return Err(CoreError::ProviderNotConfigured);
        }

        Ok(CheckoutSettings {
            success_url: non_empty(layers.get(Self::SUCCESS_URL_KEY)),
            cancel_url: non_empty(layers.get(Self::CANCEL_URL_KEY)),
            region: non_empty(layers.get(Self::REGION_KEY))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses the site origin used for redirects and image URLs.
pub fn parse_base_url(raw: &str) -> CoreResult<Url> {
    Url::parse(raw.trim()).map_err(|e| CoreError::InvalidUrl {
        field: "baseUrl".to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingAddressCollection {
    pub allowed_countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMetadata {
    pub site: String,
    pub region: String,
}

/// Parameters for creating a provider checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSessionRequest {
    pub mode: String,
    pub line_items: Vec<CheckoutLineItem>,
    pub allow_promotion_codes: bool,
    pub billing_address_collection: String,
    pub shipping_address_collection: ShippingAddressCollection,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: SessionMetadata,
}

impl CheckoutSessionRequest {
    /// Assembles the session request from sanitized items.
    ///
    /// ## Errors
    /// - [`CoreError::NoValidLineItems`] when `line_items` is empty
    /// - [`CoreError::InvalidUrl`] when a configured redirect URL is malformed
    pub fn build(
        line_items: Vec<CheckoutLineItem>,
        settings: &CheckoutSettings,
        base_url: &Url,
    ) -> CoreResult<Self> {
        if line_items.is_empty() {
            return Err(CoreError::NoValidLineItems);
        }

        Ok(CheckoutSessionRequest {
            mode: "payment".to_string(),
            line_items,
            allow_promotion_codes: true,
            billing_address_collection: "auto".to_string(),
            shipping_address_collection: ShippingAddressCollection {
                allowed_countries: ALLOWED_SHIPPING_COUNTRIES
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            },
            success_url: redirect_url(
                CheckoutSettings::SUCCESS_URL_KEY,
                settings.success_url.as_deref(),
                base_url,
                "/cart.html?success=true",
            )?,
            cancel_url: redirect_url(
                CheckoutSettings::CANCEL_URL_KEY,
                settings.cancel_url.as_deref(),
                base_url,
                "/cart.html?cancel=true",
            )?,
            metadata: SessionMetadata {
                site: SITE_NAME.to_string(),
                region: settings.region.clone(),
            },
        })
    }
}

fn redirect_url(
    field: &str,
    configured: Option<&str>,
    base_url: &Url,
    default_path: &str,
) -> CoreResult<String> {
    let url = match configured {
        Some(raw) => Url::parse(raw),
        None => base_url.join(default_path),
    };

    url.map(String::from).map_err(|e| CoreError::InvalidUrl {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
