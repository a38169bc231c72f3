use crate::EsError;

/// Floating point type used throughout system
pub type Real = f64;

/// Crank degrees in one revolution.
pub const DEG_PER_REV: Real = 360.0;

/// Crank degrees in one four-stroke cycle (two revolutions).
pub const DEG_PER_CYCLE: Real = 720.0;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, EsError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EsError::NonFinite { what, value: v })
    }
}

/// Value must be finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, EsError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(EsError::InvalidParameter { what })
    }
}

/// Reduce a crank angle into `[0, 720)`, the phase within one four-stroke cycle.
pub fn wrap_cycle_deg(angle_deg: Real) -> Real {
    wrap_into(angle_deg, DEG_PER_CYCLE)
}

/// Reduce a crank angle into `[0, 360)`, the position within one revolution.
pub fn wrap_rev_deg(angle_deg: Real) -> Real {
    wrap_into(angle_deg, DEG_PER_REV)
}

fn wrap_into(angle: Real, period: Real) -> Real {
    let wrapped = angle.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period { 0.0 } else { wrapped }
}
