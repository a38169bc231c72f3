//! es-fuels: fuel property table for enginesim.
//!
//! Provides:
//! - `FuelSpec`: lower heating value, liquid density and stoichiometric AFR
//! - A static catalog of the supported fuels with aliases
//! - Case-insensitive lookup by name or alias
//!
//! # Example
//!
//! ```
//! use es_fuels::lookup_fuel;
//!
//! let gasoline = lookup_fuel("gasoline").unwrap();
//! assert_eq!(gasoline.spec.stoich_afr, 14.7);
//! ```

pub mod catalog;
pub mod error;

// Re-exports for ergonomics
pub use catalog::{FuelCatalogEntry, FuelSpec, filter_fuel_catalog, fuel_catalog, lookup_fuel};
pub use error::{FuelError, FuelResult};
