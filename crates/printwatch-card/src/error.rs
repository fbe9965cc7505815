//! Error types for the card crate.

use printwatch_config::ConfigError;
use thiserror::Error;

/// Errors that can occur during card operation.
///
/// The only fatal path is configuration: missing or malformed entity
/// data never errors and degrades to view-model defaults instead.
#[derive(Error, Debug)]
pub enum CardError {
    /// The supplied card configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for card operations.
pub type CardResult<T> = Result<T, CardError>;
