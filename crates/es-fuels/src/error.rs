//! Fuel lookup errors.

use thiserror::Error;

/// Result type for fuel operations.
pub type FuelResult<T> = Result<T, FuelError>;

/// Errors that can occur while resolving fuel properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuelError {
    /// No catalog entry matches the requested name.
    #[error("Unknown fuel: {name}")]
    UnknownFuel { name: String },
}
