//! Error types for Shipyard core.

use std::{error::Error, fmt};

/// Error type for Shipyard core operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ShipyardError {
    /// A field failed its domain constraint.
    Validation(String),
    /// No ship exists with the requested identifier.
    NotFound(i64),
    /// The identifier is not a positive integer.
    MalformedIdentifier(String),
    /// The requested sort key is not one of the supported orders.
    InvalidOrder(String),
    /// The rating could not be derived from the ship's fields.
    Rating(String),
    /// The storage collaborator failed.
    Storage(String),
}

impl ShipyardError {
    /// Build a validation error for the named field.
    pub fn invalid_field(field: &str) -> Self {
        Self::Validation(format!("invalid {field}"))
    }

    /// Whether the error stems from caller input rather than the system.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::NotFound(_) | Self::Storage(_))
    }
}

impl fmt::Display for ShipyardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "validation failed: {message}"),
            Self::NotFound(id) => write!(f, "ship {id} not found"),
            Self::MalformedIdentifier(raw) => write!(f, "malformed ship id: {raw:?}"),
            Self::InvalidOrder(raw) => write!(f, "unknown ship order: {raw:?}"),
            Self::Rating(message) => write!(f, "rating error: {message}"),
            Self::Storage(message) => write!(f, "storage error: {message}"),
        }
    }
}

impl Error for ShipyardError {}

/// Convenience result type for Shipyard core.
pub type Result<T> = std::result::Result<T, ShipyardError>;
