//! Map loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for map operations.
pub type MapResult<T> = Result<T, MapError>;

/// Reasons a map file cannot be used.
///
/// These never reach callers of [`crate::MapDataSource::load`]; they are logged
/// and converted into a fallback to the analytical curves.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Failed to read map file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Missing required column: {column}")]
    MissingColumn { column: &'static str },

    #[error("Unparsable value {value:?} in column {column} on line {line}")]
    Parse {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("Map needs at least {min} rows, found {found}")]
    TooFewRows { min: usize, found: usize },

    #[error("Duplicate RPM sample: {rpm}")]
    DuplicateRpm { rpm: f64 },

    #[error("Non-physical value in column {column}: {value}")]
    NonPhysical { column: &'static str, value: f64 },

    #[error("Spline system is singular")]
    Singular,
}
