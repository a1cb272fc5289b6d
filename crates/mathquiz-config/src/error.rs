//! Configuration error types.

use thiserror::Error;

/// Errors raised while interpreting configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file extension does not name a supported format.
    #[error("unsupported config format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    /// A boolean setting was spelled in an unknown way.
    #[error("key [{0}] not exists")]
    InvalidBool(String),

    /// The named config file was found nowhere.
    #[error("config file not found: {0}")]
    NotFound(String),
}
