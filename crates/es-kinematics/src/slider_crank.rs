//! Single-cylinder slider-crank mechanism.

use crate::error::{KinematicsError, KinematicsResult};
use es_core::EngineGeometry;
use es_core::numeric::{ensure_positive, wrap_rev_deg};
use es_core::units::{Volume, m3};
use nalgebra::Point2;
use uom::si::length::meter;

/// Crank throw and connecting rod of one cylinder.
///
/// Piston position is measured along the cylinder axis from the crank centre:
///
/// ```text
/// s(θ) = r·cos θ + sqrt(l² − (r·sin θ)²)
/// ```
///
/// so `s = l + r` at top dead centre (θ = 0) and `s = l − r` at bottom dead
/// centre (θ = 180°).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderCrank {
    /// Crank radius, half the stroke (m)
    pub crank_radius: f64,
    /// Connecting rod length (m)
    pub rod_length: f64,
}

impl SliderCrank {
    /// # Errors
    /// Rejects non-positive lengths and rods that cannot reach past the crank
    /// (`rod_length <= crank_radius`).
    pub fn new(crank_radius: f64, rod_length: f64) -> KinematicsResult<Self> {
        ensure_positive(crank_radius, "crank radius must be positive")?;
        ensure_positive(rod_length, "connecting rod length must be positive")?;
        if rod_length <= crank_radius {
            return Err(KinematicsError::InvalidParameter {
                what: format!(
                    "connecting rod ({rod_length} m) must be longer than the crank radius ({crank_radius} m)"
                ),
            });
        }
        Ok(Self {
            crank_radius,
            rod_length,
        })
    }

    pub fn from_geometry(geometry: &EngineGeometry) -> KinematicsResult<Self> {
        Self::new(
            geometry.crank_radius().get::<meter>(),
            geometry.rod_length.get::<meter>(),
        )
    }

    /// Piston (wrist pin) distance from the crank centre along the cylinder
    /// axis (m).
    pub fn piston_position(&self, crank_deg: f64) -> f64 {
        let theta = wrap_rev_deg(crank_deg).to_radians();
        let r = self.crank_radius;
        let l = self.rod_length;
        let lateral = r * theta.sin();
        // Clamp absorbs rounding when r·sin θ grazes l
        let radicand = (l * l - lateral * lateral).max(0.0);
        r * theta.cos() + radicand.sqrt()
    }

    /// Crank pin in the plane normal to the crankshaft, as (lateral, axial):
    /// `(r·sin θ, −r·cos θ)`.
    pub fn crank_pin(&self, crank_deg: f64) -> Point2<f64> {
        let theta = wrap_rev_deg(crank_deg).to_radians();
        Point2::new(
            self.crank_radius * theta.sin(),
            -self.crank_radius * theta.cos(),
        )
    }

    /// Distance the piston has travelled down from top dead centre (m).
    pub fn piston_travel(&self, crank_deg: f64) -> f64 {
        self.rod_length + self.crank_radius - self.piston_position(crank_deg)
    }

    /// Instantaneous gas volume above the piston.
    ///
    /// Clearance volume plus the bore area times the travel from top dead
    /// centre, so it equals the clearance volume at TDC and the full cylinder
    /// volume at BDC.
    pub fn cylinder_volume(
        &self,
        crank_deg: f64,
        bore_m: f64,
        compression_ratio: f64,
    ) -> KinematicsResult<Volume> {
        ensure_positive(bore_m, "bore must be positive")?;
        if !compression_ratio.is_finite() || compression_ratio <= 1.0 {
            return Err(KinematicsError::InvalidParameter {
                what: "compression ratio must be greater than 1".into(),
            });
        }
        let area = std::f64::consts::PI / 4.0 * bore_m * bore_m;
        let swept = area * 2.0 * self.crank_radius;
        let clearance = swept / (compression_ratio - 1.0);
        Ok(m3(clearance + area * self.piston_travel(crank_deg)))
    }
}
