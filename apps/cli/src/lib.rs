//! # cabana-cli
//!
//! Command line front end for `cabana-core`: prices cart files, shows the
//! resolved feature flags, and dry-runs checkout session requests.
//!
//! ## Module Organization
//! ```text
//! cabana_cli/
//! ├── lib.rs          ◄─── You are here (tracing setup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── --set / storefront.toml / CABANA_* layers
//! ├── commands/
//! │   ├── quote.rs    ◄─── `cabana quote`
//! │   ├── flags.rs    ◄─── `cabana flags`
//! │   └── checkout.rs ◄─── `cabana checkout`
//! └── error.rs        ◄─── CliError
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::CliResult;

/// Runs one parsed invocation and returns what should go to stdout.
pub fn run(cli: Cli) -> CliResult<String> {
    let layers = config::build_layers(&cli.overrides, cli.config.as_deref(), config::ENV_PREFIX)?;
    debug!(command = ?cli.command, "Dispatching");

    match cli.command {
        Commands::Quote {
            cart,
            discounts_cents,
            shipping_cents,
            json,
        } => commands::quote::handle(&layers, &cart, discounts_cents, shipping_cents, json),
        Commands::Flags => commands::flags::handle(&layers),
        Commands::Checkout {
            request,
            catalog,
            base_url,
        } => commands::checkout::handle(&layers, &request, &catalog, &base_url),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays pipeable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cabana=trace` - Show trace for cabana crates only
/// - Default: INFO, DEBUG for cabana crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,cabana=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
