//! es-maps: tabulated volumetric-efficiency and BSFC maps.
//!
//! A map file supplies measured `VE` (percent) and `BSFC_g_kWh` samples against
//! `RPM`. Loading is fail-soft: [`MapDataSource::load`] returns `None` for a
//! missing, empty or malformed file so callers can fall back to analytical
//! curves without handling an error.
//!
//! # Example
//!
//! ```no_run
//! use es_maps::MapDataSource;
//!
//! if let Some(map) = MapDataSource::load("maps/ve_bsfc.csv") {
//!     println!("VE at 3000 rpm: {:.3}", map.volumetric_efficiency(3000.0));
//! }
//! ```

pub mod error;
pub mod source;
pub mod spline;
pub mod table;

pub use error::{MapError, MapResult};
pub use source::MapDataSource;
pub use spline::CubicSpline;
pub use table::{MapRow, parse_map_table};
