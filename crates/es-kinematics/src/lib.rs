//! es-kinematics: crank-train positions for every cylinder of an engine.
//!
//! Given an [`EngineGeometry`](es_core::EngineGeometry) and a crank angle,
//! [`pose`] returns one [`CrankPose`] per cylinder: crank pin, piston and
//! connecting-rod endpoints in 3-D, plus the bank rotation and current stroke.
//!
//! Frame: the crankshaft runs along +Y, an unrotated cylinder points along +Z
//! and +X is lateral. Positions are in metres, angles in degrees.
//!
//! The engine holds no angle state. Animations thread the angle themselves
//! with [`advance_crank_angle`].
//!
//! ```
//! use es_core::{EngineGeometry, Layout, units::mm};
//! use es_kinematics::pose;
//!
//! let g = EngineGeometry::new(4, mm(86.0), mm(86.0), mm(143.0), 10.5, Layout::Inline).unwrap();
//! let poses = pose(&g, 90.0).unwrap();
//! assert_eq!(poses.len(), 4);
//! ```

pub mod error;
pub mod phasing;
pub mod pose;
pub mod slider_crank;
pub mod stroke;

pub use error::{KinematicsError, KinematicsResult};
pub use phasing::{Bank, CYLINDER_SPACING_BORES, CylinderSlot, cylinder_plan};
pub use pose::{CrankPose, KinematicGeometryEngine, Position, advance_crank_angle, pose};
pub use slider_crank::SliderCrank;
pub use stroke::StrokePhase;
