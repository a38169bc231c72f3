//! Volumetric efficiency and BSFC curves over engine speed.

use es_maps::MapDataSource;

/// Strategy supplying the speed-dependent efficiency curves.
///
/// Implemented analytically by [`AnalyticalCurves`] and by tabulated maps
/// ([`MapDataSource`]); the performance calculation only sees this trait.
pub trait EfficiencyCurves: Send + Sync {
    /// Volumetric efficiency as a fraction at `rpm`.
    fn volumetric_efficiency(&self, rpm: f64) -> f64;

    /// Brake specific fuel consumption (g/kWh) at `rpm`.
    fn bsfc_g_per_kwh(&self, rpm: f64) -> f64;
}

impl EfficiencyCurves for MapDataSource {
    fn volumetric_efficiency(&self, rpm: f64) -> f64 {
        MapDataSource::volumetric_efficiency(self, rpm)
    }

    fn bsfc_g_per_kwh(&self, rpm: f64) -> f64 {
        MapDataSource::bsfc_g_per_kwh(self, rpm)
    }
}

/// Unnormalised Gaussian bump, 1 at `mu`.
pub fn gauss(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp()
}

/// VE peak location as a fraction of redline.
const PEAK_FRACTION_OF_REDLINE: f64 = 0.6;
const VE_BASE: f64 = 0.75;
const VE_PEAK_GAIN: f64 = 0.25;
/// Sigma below / above the VE peak, as fractions of the peak rpm.
const VE_SIGMA_BELOW: f64 = 0.4;
const VE_SIGMA_ABOVE: f64 = 0.6;
const BSFC_SIGMA: f64 = 0.5;
const BSFC_MULT_MAX: f64 = 1.4;
const BSFC_MULT_DIP: f64 = 0.5;
const BSFC_MULT_MIN: f64 = 0.9;

/// Empirically shaped curves used when no map is available.
///
/// VE is an asymmetric Gaussian around 60 % of redline (narrow below the
/// peak, wide above), rising from 75 % to 100 %. BSFC is the base value scaled
/// by `1.4 - 0.5·gauss`, so it is best where the engine breathes best and
/// stays within `[0.9, 1.4]` of base.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyticalCurves {
    pub redline_rpm: f64,
    pub bsfc_base_g_per_kwh: f64,
}

impl AnalyticalCurves {
    pub fn new(redline_rpm: f64, bsfc_base_g_per_kwh: f64) -> Self {
        Self {
            redline_rpm,
            bsfc_base_g_per_kwh,
        }
    }

    /// Speed of peak volumetric efficiency.
    pub fn peak_rpm(&self) -> f64 {
        self.redline_rpm * PEAK_FRACTION_OF_REDLINE
    }

    /// Factor applied to the base BSFC at `rpm`.
    pub fn bsfc_multiplier(&self, rpm: f64) -> f64 {
        let peak = self.peak_rpm();
        let raw = BSFC_MULT_MAX - BSFC_MULT_DIP * gauss(rpm, peak, peak * BSFC_SIGMA);
        raw.clamp(BSFC_MULT_MIN, BSFC_MULT_MAX)
    }
}

impl EfficiencyCurves for AnalyticalCurves {
    fn volumetric_efficiency(&self, rpm: f64) -> f64 {
        let peak = self.peak_rpm();
        let sigma = if rpm < peak {
            peak * VE_SIGMA_BELOW
        } else {
            peak * VE_SIGMA_ABOVE
        };
        VE_BASE + VE_PEAK_GAIN * gauss(rpm, peak, sigma)
    }

    fn bsfc_g_per_kwh(&self, rpm: f64) -> f64 {
        self.bsfc_base_g_per_kwh * self.bsfc_multiplier(rpm)
    }
}
