//! Per-cylinder crank-train poses.

use crate::error::{KinematicsError, KinematicsResult};
use crate::phasing::{Bank, CylinderSlot, cylinder_plan};
use crate::slider_crank::SliderCrank;
use crate::stroke::StrokePhase;
use es_core::EngineGeometry;
use es_core::numeric::{DEG_PER_REV, wrap_cycle_deg};
use nalgebra::{Point3, Rotation3, Vector3};
use tracing::trace;

/// A point in the engine frame (m).
pub type Position = Point3<f64>;

/// Position of one cylinder's moving parts at a given crank angle.
///
/// Coordinates are metres in the engine frame (crankshaft +Y, unrotated
/// cylinder axis +Z).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrankPose {
    pub cylinder: usize,
    pub bank: Bank,
    /// This cylinder's own crank angle, base angle plus phase offset, in `[0, 720)`
    pub crank_angle_deg: f64,
    /// Crank pin centre. Not affected by the bank rotation.
    pub crank_pin: Position,
    /// Wrist pin centre after bank rotation; also the rod small end
    pub piston: Position,
    /// Piston distance from the crank centre along its own cylinder axis
    pub piston_axial: f64,
    /// Rod big end: the crank pin expressed in the rotated bank frame
    pub rod_big_end: Position,
    /// Rotation of the cylinder axis about +Y (degrees)
    pub bank_rotation_deg: f64,
    pub stroke: StrokePhase,
}

impl CrankPose {
    pub fn rod_small_end(&self) -> Position {
        self.piston
    }
}

/// Computes [`CrankPose`]s for a fixed geometry.
///
/// Construction validates the geometry and lays out the cylinders once; each
/// [`pose`](Self::pose) call is then a pure function of the crank angle.
#[derive(Clone, Debug)]
pub struct KinematicGeometryEngine {
    crank: SliderCrank,
    slots: Vec<CylinderSlot>,
}

impl KinematicGeometryEngine {
    pub fn new(geometry: &EngineGeometry) -> KinematicsResult<Self> {
        let slots = cylinder_plan(geometry)?;
        let crank = SliderCrank::from_geometry(geometry)?;
        Ok(Self { crank, slots })
    }

    pub fn slider_crank(&self) -> &SliderCrank {
        &self.crank
    }

    pub fn slots(&self) -> &[CylinderSlot] {
        &self.slots
    }

    /// Poses of every cylinder, in cylinder order, at base crank angle
    /// `crank_angle_deg`. Any finite angle is accepted.
    pub fn pose(&self, crank_angle_deg: f64) -> KinematicsResult<Vec<CrankPose>> {
        if !crank_angle_deg.is_finite() {
            return Err(KinematicsError::InvalidParameter {
                what: format!("crank angle must be finite, got {crank_angle_deg}"),
            });
        }
        let base = wrap_cycle_deg(crank_angle_deg);
        trace!(
            crank_angle_deg = base,
            cylinders = self.slots.len(),
            "computing crank poses"
        );
        Ok(self
            .slots
            .iter()
            .map(|slot| self.pose_slot(slot, base))
            .collect())
    }

    fn pose_slot(&self, slot: &CylinderSlot, base_deg: f64) -> CrankPose {
        let angle = wrap_cycle_deg(base_deg + slot.phase_offset_deg);
        let along_crank = Vector3::new(0.0, slot.axial_offset, 0.0);
        let bank =
            Rotation3::from_axis_angle(&Vector3::y_axis(), slot.bank_rotation_deg.to_radians());

        let pin = self.crank.crank_pin(angle);
        let pin_local = Point3::new(pin.x, 0.0, pin.y);
        let piston_axial = self.crank.piston_position(angle);

        CrankPose {
            cylinder: slot.index,
            bank: slot.bank,
            crank_angle_deg: angle,
            crank_pin: pin_local + along_crank,
            piston: bank * Point3::new(0.0, 0.0, piston_axial) + along_crank,
            piston_axial,
            rod_big_end: bank * pin_local + along_crank,
            bank_rotation_deg: slot.bank_rotation_deg,
            stroke: StrokePhase::from_cycle_angle(angle),
        }
    }
}

/// Poses of every cylinder of `geometry` at `crank_angle_deg`.
///
/// # Errors
/// Returns [`KinematicsError::InvalidParameter`] for invalid geometry (including
/// odd cylinder counts on two-bank layouts) or a non-finite angle.
pub fn pose(geometry: &EngineGeometry, crank_angle_deg: f64) -> KinematicsResult<Vec<CrankPose>> {
    KinematicGeometryEngine::new(geometry)?.pose(crank_angle_deg)
}

/// Crank angle after running at `rpm` for `dt_s` seconds, wrapped to
/// `[0, 720)`.
pub fn advance_crank_angle(angle_deg: f64, rpm: f64, dt_s: f64) -> f64 {
    // rev/min to deg/s
    let deg_per_s = rpm * DEG_PER_REV / 60.0;
    wrap_cycle_deg(angle_deg + deg_per_s * dt_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use es_core::Layout;
    use es_core::numeric::{Tolerances, nearly_equal};
    use es_core::units::mm;

    fn inline_four() -> EngineGeometry {
        EngineGeometry::new(4, mm(82.5), mm(92.8), mm(140.0), 11.0, Layout::Inline).unwrap()
    }

    #[test]
    fn inline_four_matches_slider_crank_at_each_offset() {
        let engine = KinematicGeometryEngine::new(&inline_four()).unwrap();
        let poses = engine.pose(0.0).unwrap();
        assert_eq!(poses.len(), 4);
        for (pose, offset) in poses.iter().zip([0.0, 180.0, 360.0, 540.0]) {
            let expected = engine.slider_crank().piston_position(offset);
            assert!((pose.piston_axial - expected).abs() < 1e-15);
            assert!((pose.piston.z - expected).abs() < 1e-15);
            assert_eq!(pose.crank_angle_deg, offset);
        }
        // Offsets 180° apart alternate between TDC and BDC
        assert!(poses[0].piston_axial > poses[1].piston_axial);
        assert!((poses[0].piston_axial - poses[2].piston_axial).abs() < 1e-12);
        assert_eq!(poses[0].stroke, StrokePhase::Intake);
        assert_eq!(poses[2].stroke, StrokePhase::Power);
    }

    #[test]
    fn crank_pin_ignores_bank_rotation() {
        let g = EngineGeometry {
            cylinders: 2,
            layout: Layout::V { bank_angle_deg: 60.0 },
            ..inline_four()
        };
        let poses = pose(&g, 37.0).unwrap();
        assert_eq!(poses[0].crank_pin, poses[1].crank_pin);
        assert_ne!(poses[0].piston, poses[1].piston);
        assert_eq!(poses[0].piston_axial, poses[1].piston_axial);
    }

    #[test]
    fn right_bank_leans_to_positive_x() {
        let g = EngineGeometry {
            cylinders: 2,
            layout: Layout::V { bank_angle_deg: 90.0 },
            ..inline_four()
        };
        let poses = pose(&g, 0.0).unwrap();
        let s = poses[0].piston_axial;
        let h = s * std::f64::consts::FRAC_1_SQRT_2;
        assert!((poses[0].piston.x + h).abs() < 1e-12);
        assert!((poses[1].piston.x - h).abs() < 1e-12);
        assert!((poses[1].piston.z - h).abs() < 1e-12);
    }

    #[test]
    fn rod_big_end_sits_on_crank_circle() {
        let engine = KinematicGeometryEngine::new(&inline_four()).unwrap();
        let r = engine.slider_crank().crank_radius;
        for pose in engine.pose(123.0).unwrap() {
            let big_end = pose.rod_big_end;
            assert!(nearly_equal(big_end.x.hypot(big_end.z), r, Tolerances::default()));
            assert_eq!(pose.rod_small_end(), pose.piston);
        }
    }

    #[test]
    fn rejects_non_finite_angle() {
        assert!(pose(&inline_four(), f64::NAN).is_err());
        assert!(pose(&inline_four(), f64::INFINITY).is_err());
    }

    #[test]
    fn advance_wraps_over_the_cycle() {
        // 6000 rpm = 36 000 °/s
        assert!((advance_crank_angle(0.0, 6000.0, 0.01) - 360.0).abs() < 1e-9);
        assert!((advance_crank_angle(700.0, 6000.0, 0.001) - 16.0).abs() < 1e-9);
        assert_eq!(advance_crank_angle(90.0, 0.0, 1.0), 90.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use es_core::Layout;
    use es_core::units::mm;
    use proptest::prelude::*;

    fn layout_strategy() -> impl Strategy<Value = (u32, Layout)> {
        prop_oneof![
            (1_u32..=12).prop_map(|n| (n, Layout::Inline)),
            (1_u32..=6, 15.0_f64..=180.0)
                .prop_map(|(n, a)| (2 * n, Layout::V { bank_angle_deg: a })),
            (1_u32..=4).prop_map(|n| (2 * n, Layout::Boxer)),
        ]
    }

    proptest! {
        #[test]
        fn pose_is_periodic_over_720(
            (cylinders, layout) in layout_strategy(),
            angle in -2000.0_f64..2000.0,
        ) {
            let g = EngineGeometry::new(cylinders, mm(86.0), mm(86.0), mm(143.0), 10.0, layout).unwrap();
            let engine = KinematicGeometryEngine::new(&g).unwrap();
            let a = engine.pose(angle).unwrap();
            let b = engine.pose(angle + 720.0).unwrap();
            prop_assert_eq!(a.len(), cylinders as usize);
            for (pa, pb) in a.iter().zip(&b) {
                prop_assert!((pa.piston - pb.piston).norm() < 1e-9);
                prop_assert!((pa.crank_pin - pb.crank_pin).norm() < 1e-9);
                prop_assert!((pa.piston_axial - pb.piston_axial).abs() < 1e-9);
            }
        }
    }
}
