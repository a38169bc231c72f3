//! Operating point of the engine.

use crate::error::{PerfError, PerfResult};
use es_core::atmosphere::{isa_density, pressure_ratio_from_boost};
use es_core::units::{Density, constants::RHO_AIR_SL, kgpm3};
use uom::si::mass_density::kilogram_per_cubic_meter;

/// Steady operating conditions for one evaluation of the model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperatingConditions {
    /// Crankshaft speed (rev/min), >= 0
    pub rpm: f64,
    /// Redline (rev/min); only shapes the analytical curves
    pub redline_rpm: f64,
    /// Ambient air density
    pub air_density: Density,
    /// Manifold-to-ambient pressure ratio, >= 1 (1 for naturally aspirated)
    pub pressure_ratio: f64,
    /// Throttle fraction in [0, 1]
    pub throttle: f64,
}

impl OperatingConditions {
    /// Create validated operating conditions.
    ///
    /// # Errors
    /// Returns [`PerfError::InvalidParameter`] for a negative speed, a
    /// non-positive redline or density, a pressure ratio below 1, or a
    /// throttle outside `[0, 1]`.
    pub fn new(
        rpm: f64,
        redline_rpm: f64,
        air_density: Density,
        pressure_ratio: f64,
        throttle: f64,
    ) -> PerfResult<Self> {
        let conditions = Self {
            rpm,
            redline_rpm,
            air_density,
            pressure_ratio,
            throttle,
        };
        conditions.validate()?;
        Ok(conditions)
    }

    /// Wide-open throttle, naturally aspirated, standard sea-level air.
    pub fn sea_level(rpm: f64, redline_rpm: f64) -> PerfResult<Self> {
        Self::new(rpm, redline_rpm, kgpm3(RHO_AIR_SL), 1.0, 1.0)
    }

    /// Conditions with air density from the ISA model and boost given as
    /// gauge pressure in kPa.
    pub fn from_ambient(
        rpm: f64,
        redline_rpm: f64,
        altitude_m: f64,
        temperature_c: f64,
        boost_kpa: f64,
        throttle: f64,
    ) -> PerfResult<Self> {
        if !boost_kpa.is_finite() || boost_kpa < 0.0 {
            return Err(PerfError::invalid("boost pressure cannot be negative"));
        }
        let air_density = isa_density(altitude_m, temperature_c)?;
        Self::new(
            rpm,
            redline_rpm,
            air_density,
            pressure_ratio_from_boost(boost_kpa),
            throttle,
        )
    }

    /// Same conditions at a different engine speed.
    pub fn with_rpm(&self, rpm: f64) -> Self {
        Self { rpm, ..*self }
    }

    pub fn validate(&self) -> PerfResult<()> {
        if !self.rpm.is_finite() || self.rpm < 0.0 {
            return Err(PerfError::invalid("engine speed must be >= 0 rpm"));
        }
        if !self.redline_rpm.is_finite() || self.redline_rpm <= 0.0 {
            return Err(PerfError::invalid("redline must be positive"));
        }
        let rho = self.air_density.get::<kilogram_per_cubic_meter>();
        if !rho.is_finite() || rho <= 0.0 {
            return Err(PerfError::invalid("air density must be positive"));
        }
        if !self.pressure_ratio.is_finite() || self.pressure_ratio < 1.0 {
            return Err(PerfError::invalid("manifold pressure ratio must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.throttle) {
            return Err(PerfError::invalid("throttle must be within [0, 1]"));
        }
        Ok(())
    }
}
