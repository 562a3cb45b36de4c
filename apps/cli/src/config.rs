//! # Configuration Layers
//!
//! Builds the [`LayeredConfig`] every command reads from.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --set checkoutEnabled=true --set donationRate=0.05                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config path, or ./storefront.toml when present                   │
//! │                                                                         │
//! │  3. Environment Variables                                              │
//! │     CABANA_CHECKOUT_ENABLED=true                                       │
//! │     CABANA_FREE_SHIP_THRESHOLD_CENTS=15000                             │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     PricingConfig::default(), every flag off                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! currency = "AUD"
//! donationRate = 0.10
//! freeShipThresholdCents = 20000
//! defaultShippingCents = 1000
//! checkoutEnabled = false
//! authEnabled = false
//! region = "AU"
//! ```

use std::path::{Path, PathBuf};

use cabana_core::{LayeredConfig, MapSource, ValueSource};
use tracing::{debug, info};

use crate::error::{read_file, CliError, CliResult};

/// Prefix for environment variable names.
pub const ENV_PREFIX: &str = "CABANA";

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

// =============================================================================
// Environment Source
// =============================================================================

/// Reads `PREFIX_SCREAMING_SNAKE_KEY` environment variables.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        EnvSource {
            prefix: prefix.into(),
        }
    }

    /// `checkoutEnabled` → `CABANA_CHECKOUT_ENABLED`.
    pub fn var_name(&self, key: &str) -> String {
        let mut name = String::with_capacity(self.prefix.len() + key.len() + 4);
        name.push_str(&self.prefix);
        name.push('_');
        for (i, ch) in key.chars().enumerate() {
            if ch.is_ascii_uppercase() && i > 0 {
                name.push('_');
            }
            name.push(ch.to_ascii_uppercase());
        }
        name
    }
}

impl ValueSource for EnvSource {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }
}

// =============================================================================
// File Source
// =============================================================================

/// Top-level keys of a TOML file.
#[derive(Debug, Clone)]
pub struct FileSource {
    label: String,
    table: toml::Table,
}

impl FileSource {
    /// Loads and parses a TOML file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let contents = read_file(path)?;
        let table = toml::from_str::<toml::Table>(&contents).map_err(|source| {
            CliError::ConfigFile {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(FileSource {
            label: format!("file:{}", path.display()),
            table,
        })
    }
}

impl ValueSource for FileSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn get(&self, key: &str) -> Option<String> {
        self.table.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

// =============================================================================
// Layer Assembly
// =============================================================================

/// Parses a `--set key=value` argument.
pub fn parse_override(raw: &str) -> CliResult<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(CliError::InvalidOverride(raw.to_string())),
    }
}

/// Stacks the command-line, file and environment layers.
///
/// An explicit `--config` path must exist. Without one, `./storefront.toml`
/// is used only if it is there.
pub fn build_layers(
    overrides: &[(String, String)],
    config_path: Option<&Path>,
    env_prefix: &str,
) -> CliResult<LayeredConfig> {
    let mut layers = LayeredConfig::new();

    let mut explicit = MapSource::new("explicit");
    for (key, value) in overrides {
        explicit.insert(key.clone(), value.clone());
    }
    if explicit.is_empty() {
        debug!("No command line overrides");
    } else {
        layers = layers.with_layer(explicit);
    }

    let file_path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists()),
    };
    match file_path {
        Some(path) => {
            info!(path = %path.display(), "Loading storefront config file");
            layers = layers.with_layer(FileSource::load(&path)?);
        }
        None => debug!("No config file, using environment and defaults"),
    }

    layers = layers.with_layer(EnvSource::new(env_prefix));
    debug!(layers = ?layers.layer_names(), "Configuration layers ready");

    Ok(layers)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_env_var_names() {
        let env = EnvSource::new("CABANA");
        assert_eq!(env.var_name("checkoutEnabled"), "CABANA_CHECKOUT_ENABLED");
        assert_eq!(
            env.var_name("freeShipThresholdCents"),
            "CABANA_FREE_SHIP_THRESHOLD_CENTS"
        );
        assert_eq!(env.var_name("region"), "CABANA_REGION");
    }

    #[test]
    fn test_env_source_reads_variables() {
        std::env::set_var("CABANA_TEST_ENV_SOURCE_AUTH_ENABLED", "yes");
        let env = EnvSource::new("CABANA_TEST_ENV_SOURCE");
        assert_eq!(env.get("authEnabled").as_deref(), Some("yes"));
        assert_eq!(env.get("checkoutEnabled"), None);
    }

    #[test]
    fn test_file_source_stringifies_values() {
        let file = write_config(
            "currency = \"NZD\"\ndonationRate = 0.05\nfreeShipThresholdCents = 15000\ncheckoutEnabled = true\n",
        );
        let source = FileSource::load(file.path()).unwrap();

        assert_eq!(source.get("currency").as_deref(), Some("NZD"));
        assert_eq!(source.get("donationRate").as_deref(), Some("0.05"));
        assert_eq!(source.get("freeShipThresholdCents").as_deref(), Some("15000"));
        assert_eq!(source.get("checkoutEnabled").as_deref(), Some("true"));
        assert_eq!(source.get("authEnabled"), None);
        assert!(source.name().starts_with("file:"));
    }

    #[test]
    fn test_file_source_rejects_bad_toml() {
        let file = write_config("currency = \n");
        let err = FileSource::load(file.path()).unwrap_err();
        assert!(matches!(err, CliError::ConfigFile { .. }));
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("checkoutEnabled=true").unwrap(),
            ("checkoutEnabled".to_string(), "true".to_string())
        );
        assert_eq!(
            parse_override("region = NZ").unwrap(),
            ("region".to_string(), "NZ".to_string())
        );
        assert!(parse_override("checkoutEnabled").is_err());
        assert!(parse_override("=true").is_err());
    }

    #[test]
    fn test_build_layers_priority() {
        let file = write_config("donationRate = 0.05\nregion = \"NZ\"\n");
        let overrides = vec![("region".to_string(), "GB".to_string())];

        let layers =
            build_layers(&overrides, Some(file.path()), "CABANA_TEST_BUILD_LAYERS").unwrap();

        assert_eq!(layers.layer_names().len(), 3);
        assert_eq!(layers.get("region").as_deref(), Some("GB"));
        let donation = layers.resolve("donationRate").unwrap();
        assert_eq!(donation.value, "0.05");
        assert!(donation.layer.starts_with("file:"));
    }

    #[test]
    fn test_build_layers_missing_explicit_file_fails() {
        let missing = Path::new("/definitely/not/storefront.toml");
        let err = build_layers(&[], Some(missing), "CABANA_TEST_MISSING").unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }
}
