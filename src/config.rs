//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Seed for the account number generator; numbers are random when unset
    pub seed: Option<u64>,

    /// Statement export target; export is skipped when unset
    pub export_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let seed = match env::var("BANK_LEDGER_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue("BANK_LEDGER_SEED"))?,
            ),
            Err(_) => None,
        };

        let export_path = env::var("BANK_LEDGER_EXPORT").ok().map(PathBuf::from);

        Ok(Self { seed, export_path })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
