//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core entity model.
///
/// Missing or malformed entity *data* is never an error at this layer;
/// absent entities degrade to defaults downstream. Only structurally
/// invalid identifiers are rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An entity id was empty (or whitespace only).
    #[error("Entity id must not be empty")]
    EmptyEntityId,
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
