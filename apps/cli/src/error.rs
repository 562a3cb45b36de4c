//! # CLI Error Type
//!
//! Everything a command can fail with. `main` reports these through
//! `anyhow`, so the message is what the operator sees.

use std::path::PathBuf;

use cabana_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// A cart, catalog or config file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("Invalid config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `--set` argument without an `=`.
    #[error("Invalid override {0:?}: expected key=value")]
    InvalidOverride(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Output could not be encoded as JSON.
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

/// Reads a whole file, attaching the path to any error.
pub fn read_file(path: &std::path::Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file_names_path() {
        let err = read_file(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read /definitely/not/here.json"));
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: CliError = CoreError::CheckoutDisabled.into();
        assert_eq!(err.to_string(), "Checkout is currently disabled");
    }
}
