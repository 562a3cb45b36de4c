use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::parse_override;

#[derive(Debug, Parser)]
#[command(name = "cabana")]
#[command(about = "Cart pricing and checkout tools for the CABANA storefront", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file (default: ./storefront.toml when present)
    #[arg(long, global = true, env = "CABANA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override a setting, e.g. --set checkoutEnabled=true
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_set)]
    pub overrides: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price a cart file
    Quote {
        /// Cart JSON: {"lineItems": [{"price": 45.0, "quantity": 2}], ...}
        cart: PathBuf,

        /// Discount in cents (overrides the cart file)
        #[arg(long)]
        discounts_cents: Option<i64>,

        /// Shipping in cents (overrides the cart file)
        #[arg(long)]
        shipping_cents: Option<i64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved feature flags and where each came from
    Flags,

    /// Build a checkout session request without sending it
    Checkout {
        /// Request JSON: {"lineItems": [{"sku": "TOWEL", "quantity": 2}]}
        request: PathBuf,

        /// Catalog JSON: [{"sku": ..., "name": ..., "price": ..., "image": ...}]
        #[arg(long)]
        catalog: PathBuf,

        /// Site origin used for redirects and image URLs
        #[arg(long, env = "CABANA_BASE_URL")]
        base_url: String,
    },
}

fn parse_set(raw: &str) -> Result<(String, String), String> {
    parse_override(raw).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_with_overrides() {
        let cli = Cli::try_parse_from([
            "cabana",
            "--set",
            "donationRate=0.05",
            "quote",
            "cart.json",
            "--discounts-cents",
            "500",
            "--json",
        ])
        .unwrap();

        assert_eq!(
            cli.overrides,
            vec![("donationRate".to_string(), "0.05".to_string())]
        );
        match cli.command {
            Commands::Quote {
                cart,
                discounts_cents,
                shipping_cents,
                json,
            } => {
                assert_eq!(cart, PathBuf::from("cart.json"));
                assert_eq!(discounts_cents, Some(500));
                assert_eq!(shipping_cents, None);
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_set_after_subcommand() {
        let cli = Cli::try_parse_from(["cabana", "flags", "--set", "authEnabled=on"]).unwrap();
        assert_eq!(cli.overrides.len(), 1);
        assert!(matches!(cli.command, Commands::Flags));
    }

    #[test]
    fn test_bad_set_is_rejected() {
        assert!(Cli::try_parse_from(["cabana", "--set", "authEnabled", "flags"]).is_err());
    }

    #[test]
    fn test_checkout_requires_catalog() {
        assert!(Cli::try_parse_from([
            "cabana",
            "checkout",
            "request.json",
            "--base-url",
            "https://cabana.example"
        ])
        .is_err());
    }
}
