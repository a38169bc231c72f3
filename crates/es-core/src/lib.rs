//! es-core: shared foundation for enginesim.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float and angle helpers)
//! - geometry (engine geometry and bank layout, validated once and shared)
//! - atmosphere (ISA air density and boost pressure ratio)
//! - error (shared error types)

pub mod atmosphere;
pub mod error;
pub mod geometry;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{EsError, EsResult};
pub use geometry::{EngineGeometry, Layout};
pub use numeric::*;
pub use units::*;
