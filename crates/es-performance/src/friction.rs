//! Watson–Heywood friction correlation.

/// Friction mean effective pressure as a quadratic in mean piston speed:
///
/// ```text
/// FMEP = c0 + c1·Sp + c2·Sp²      [Pa, with Sp in m/s]
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatsonHeywood {
    /// Constant term (Pa)
    pub c0: f64,
    /// Linear term (Pa·s/m)
    pub c1: f64,
    /// Quadratic term (Pa·s²/m²)
    pub c2: f64,
}

impl Default for WatsonHeywood {
    fn default() -> Self {
        Self {
            c0: 1.0e5,
            c1: 600.0,
            c2: 20.0,
        }
    }
}

impl WatsonHeywood {
    /// Mean piston speed (m/s): two strokes per revolution.
    pub fn mean_piston_speed(stroke_m: f64, rpm: f64) -> f64 {
        2.0 * stroke_m * rpm / 60.0
    }

    /// FMEP (Pa) at mean piston speed `sp` (m/s).
    pub fn fmep_pa(&self, sp: f64) -> f64 {
        self.c0 + self.c1 * sp + self.c2 * sp * sp
    }

    /// Friction power (W) of a four-stroke engine of displacement `vd_m3`.
    pub fn friction_power_w(fmep_pa: f64, vd_m3: f64, rpm: f64) -> f64 {
        fmep_pa * vd_m3 * rpm / 120.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piston_speed() {
        // 90 mm stroke at 6000 rpm -> 18 m/s
        assert!((WatsonHeywood::mean_piston_speed(0.09, 6000.0) - 18.0).abs() < 1e-12);
        assert_eq!(WatsonHeywood::mean_piston_speed(0.09, 0.0), 0.0);
    }

    #[test]
    fn fmep_polynomial() {
        let wh = WatsonHeywood::default();
        assert_eq!(wh.fmep_pa(0.0), 1.0e5);
        assert!((wh.fmep_pa(10.0) - (1.0e5 + 6000.0 + 2000.0)).abs() < 1e-9);
    }

    #[test]
    fn friction_power_is_zero_at_standstill() {
        assert_eq!(WatsonHeywood::friction_power_w(1.0e5, 0.002, 0.0), 0.0);
        // 100 kPa over 2 L at 6000 rpm -> 10 kW
        assert!((WatsonHeywood::friction_power_w(1.0e5, 0.002, 6000.0) - 10_000.0).abs() < 1e-6);
    }
}
