//! # Layered Settings & Feature Flags
//!
//! Resolves a setting by asking an ordered list of sources and taking the
//! first one that has a value.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Layer Priority (first hit wins)                      │
//! │                                                                         │
//! │  1. Explicit override     --set checkoutEnabled=1                      │
//! │  2. Persisted override    storefront.toml                              │
//! │  3. Ambient default       CABANA_CHECKOUT_ENABLED=true                 │
//! │  4. Built-in default      false / PricingConfig::default()             │
//! │                                                                         │
//! │  resolve("checkoutEnabled")                                             │
//! │      layer 1: None ──► layer 2: Some("yes") ──► stop, "yes" from file  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core only knows the [`ValueSource`] trait and an in-memory
//! [`MapSource`]. Sources that touch the environment or the file system
//! live in the CLI crate.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Sources
// =============================================================================

/// Anything that can answer "what is the value of this key?".
pub trait ValueSource: Send + Sync {
    /// Layer name, reported alongside resolved values.
    fn name(&self) -> &str;

    /// Raw string value for `key`, or `None` if this layer has no opinion.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory source backed by a sorted map.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    name: String,
    values: BTreeMap<String, String>,
}

impl MapSource {
    /// Creates an empty source with the given layer name.
    pub fn new(name: impl Into<String>) -> Self {
        MapSource {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns true if the source holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValueSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Returns the first `Some` in priority order.
///
/// The iterator is consumed lazily, so lower-priority layers are never
/// queried once a value is found.
///
/// ## Example
/// ```rust
/// use cabana_core::flags::resolve_first;
///
/// assert_eq!(resolve_first([None, Some(2), Some(3)]), Some(2));
/// assert_eq!(resolve_first::<i32>([None, None]), None);
/// ```
pub fn resolve_first<T>(layers: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    layers.into_iter().flatten().next()
}

/// A value together with the layer that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub layer: String,
}

/// Ordered stack of value sources, highest priority first.
#[derive(Default)]
pub struct LayeredConfig {
    layers: Vec<Box<dyn ValueSource>>,
}

impl LayeredConfig {
    /// Creates an empty stack. Every key resolves to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source below all existing ones.
    pub fn with_layer(mut self, source: impl ValueSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    /// Names of the layers in priority order.
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Looks up `key` and reports which layer answered.
    pub fn resolve(&self, key: &str) -> Option<Resolved> {
        resolve_first(self.layers.iter().map(|layer| {
            layer.get(key).map(|value| Resolved {
                value,
                layer: layer.name().to_string(),
            })
        }))
    }

    /// Looks up `key`, discarding the layer name.
    pub fn get(&self, key: &str) -> Option<String> {
        self.resolve(key).map(|resolved| resolved.value)
    }
}

impl fmt::Debug for LayeredConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredConfig")
            .field("layers", &self.layer_names())
            .finish()
    }
}

// =============================================================================
// Feature Flags
// =============================================================================

/// Interprets a raw setting as a boolean.
///
/// `true`, `1`, `yes` and `on` (any case, surrounding whitespace ignored)
/// are true. Everything else, including typos, is false so that a
/// misconfigured flag leaves the feature off.
///
/// ## Example
/// ```rust
/// use cabana_core::flags::parse_flag;
///
/// assert!(parse_flag(" YES "));
/// assert!(!parse_flag("enabled"));
/// ```
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Launch switches for storefront features.
///
/// Both default to off until a layer turns them on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub checkout_enabled: bool,
    pub auth_enabled: bool,
}

impl FeatureFlags {
    pub const CHECKOUT_KEY: &'static str = "checkoutEnabled";
    pub const AUTH_KEY: &'static str = "authEnabled";

    /// Resolves both flags from the layered config.
    pub fn resolve(config: &LayeredConfig) -> Self {
        let flag = |key: &str| config.get(key).is_some_and(|value| parse_flag(&value));

        FeatureFlags {
            checkout_enabled: flag(Self::CHECKOUT_KEY),
            auth_enabled: flag(Self::AUTH_KEY),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts lookups so tests can prove lower layers are skipped.
    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl ValueSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn get(&self, _key: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some("from-counting".to_string())
        }
    }

    #[test]
    fn test_first_layer_with_value_wins() {
        let config = LayeredConfig::new()
            .with_layer(MapSource::new("explicit"))
            .with_layer(MapSource::new("file").with("checkoutEnabled", "yes"))
            .with_layer(MapSource::new("env").with("checkoutEnabled", "false"));

        let resolved = config.resolve("checkoutEnabled").unwrap();
        assert_eq!(resolved.value, "yes");
        assert_eq!(resolved.layer, "file");
        assert_eq!(config.layer_names(), vec!["explicit", "file", "env"]);
    }

    #[test]
    fn test_missing_everywhere_is_none() {
        let config = LayeredConfig::new().with_layer(MapSource::new("explicit"));
        assert_eq!(config.resolve("authEnabled"), None);
        assert_eq!(LayeredConfig::new().get("authEnabled"), None);
    }

    #[test]
    fn test_lower_layers_not_queried_after_hit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = LayeredConfig::new()
            .with_layer(MapSource::new("explicit").with("region", "NZ"))
            .with_layer(CountingSource {
                calls: Arc::clone(&calls),
            });

        assert_eq!(config.get("region").as_deref(), Some("NZ"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(config.get("other").as_deref(), Some("from-counting"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parse_flag() {
        for truthy in ["true", "TRUE", "1", "yes", "On", "  true\n"] {
            assert!(parse_flag(truthy), "{truthy:?} should be true");
        }
        for falsy in ["false", "0", "no", "off", "", "enabled", "truthy"] {
            assert!(!parse_flag(falsy), "{falsy:?} should be false");
        }
    }

    #[test]
    fn test_feature_flags_default_off() {
        let flags = FeatureFlags::resolve(&LayeredConfig::new());
        assert_eq!(flags, FeatureFlags::default());
        assert!(!flags.checkout_enabled);
        assert!(!flags.auth_enabled);
    }

    #[test]
    fn test_feature_flags_explicit_false_beats_lower_true() {
        let config = LayeredConfig::new()
            .with_layer(MapSource::new("explicit").with("checkoutEnabled", "0"))
            .with_layer(
                MapSource::new("env")
                    .with("checkoutEnabled", "1")
                    .with("authEnabled", "on"),
            );

        let flags = FeatureFlags::resolve(&config);
        assert!(!flags.checkout_enabled);
        assert!(flags.auth_enabled);
    }
}
