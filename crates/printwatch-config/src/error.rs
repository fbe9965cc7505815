//! Error types for the config crate.

use thiserror::Error;

/// Errors that can occur while constructing a card configuration.
///
/// Construction is the only fatal boundary: a card must not render
/// partially from an invalid configuration. Everything downstream of a
/// validated config degrades to defaults instead of erroring.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `title` is required; the card refuses to render without it.
    #[error("Please define title in the card configuration")]
    MissingTitle,

    /// The raw configuration value could not be decoded.
    #[error("Invalid card configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
