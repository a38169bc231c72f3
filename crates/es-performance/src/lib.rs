//! es-performance: steady-state engine performance model.
//!
//! Closed-form cycle model: displacement, breathing and fuel-consumption
//! curves, Watson–Heywood friction, brake/indicated power, torque, mean
//! effective pressures and efficiencies. There is no iteration; every output
//! is a direct function of geometry, operating point and fuel.
//!
//! VE and BSFC come from an [`EfficiencyCurves`] strategy: analytical
//! Gaussian-shaped curves by default, or the interpolants of a loaded
//! [`es_maps::MapDataSource`].
//!
//! # Example
//!
//! ```
//! use es_core::{EngineGeometry, Layout, units::mm};
//! use es_performance::{OperatingConditions, compute};
//!
//! let geometry = EngineGeometry::new(4, mm(82.5), mm(92.8), mm(140.0), 11.0, Layout::Inline).unwrap();
//! let conditions = OperatingConditions::sea_level(2500.0, 8500.0).unwrap();
//! let result = compute(&geometry, &conditions, "Gasoline", 14.7, 250.0, None).unwrap();
//! assert!(result.bhp() > 0.0);
//! ```

pub mod conditions;
pub mod curves;
pub mod error;
pub mod friction;
pub mod model;
pub mod result;
pub mod sweep;

// Re-exports
pub use conditions::OperatingConditions;
pub use curves::{AnalyticalCurves, EfficiencyCurves, gauss};
pub use error::{PerfError, PerfResult};
pub use friction::WatsonHeywood;
pub use model::{GAMMA_AIR, PerformanceModel, compute, compute_with_curves, ideal_otto_efficiency};
pub use result::{Efficiency, PerformanceReport, PerformanceResult};
pub use sweep::{MAX_SWEEP_POINTS, PerformanceCurve, RpmSweep};
