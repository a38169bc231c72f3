//! International Standard Atmosphere helpers for intake air conditions.

use crate::error::EsResult;
use crate::numeric::{ensure_finite, ensure_positive};
use crate::units::{Density, constants::P0_PA, kgpm3};

/// Sea-level standard temperature (K)
const T0_K: f64 = 288.15;
/// Temperature lapse rate (K/m)
const LAPSE_K_PER_M: f64 = 0.0065;
/// Standard gravity (m/s²)
const G0_MPS2: f64 = 9.806_65;
/// Specific gas constant of dry air (J/(kg·K))
const R_AIR: f64 = 287.058;
/// Molar mass of dry air (kg/mol)
const M_AIR: f64 = 0.028_964_4;

/// Static pressure at `altitude_m` from the ISA barometric formula (Pa).
pub fn isa_pressure_pa(altitude_m: f64) -> f64 {
    let base = 1.0 - LAPSE_K_PER_M * altitude_m / T0_K;
    P0_PA * base.powf(G0_MPS2 * M_AIR / (R_AIR * LAPSE_K_PER_M))
}

/// Air density at `altitude_m` using ISA pressure and the actual ambient
/// temperature rather than the ISA temperature.
pub fn isa_density(altitude_m: f64, temperature_c: f64) -> EsResult<Density> {
    ensure_finite(altitude_m, "altitude")?;
    let temp_k = ensure_positive(temperature_c + 273.15, "absolute temperature must be positive")?;
    let pressure = ensure_positive(isa_pressure_pa(altitude_m), "altitude above ISA model range")?;
    Ok(kgpm3(pressure / (R_AIR * temp_k)))
}

/// Manifold-to-ambient pressure ratio for a gauge boost pressure in kPa.
pub fn pressure_ratio_from_boost(boost_kpa: f64) -> f64 {
    1.0 + boost_kpa / (P0_PA / 1000.0)
}
