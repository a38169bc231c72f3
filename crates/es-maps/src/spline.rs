//! Natural cubic spline through tabulated samples.
//!
//! Second derivatives at the knots come from the tridiagonal continuity system
//!
//! ```text
//! h[i-1]·M[i-1] + 2·(h[i-1] + h[i])·M[i] + h[i]·M[i+1]
//!     = 6·((y[i+1] - y[i]) / h[i] - (y[i] - y[i-1]) / h[i-1])
//! ```
//!
//! with `M[0] = M[n-1] = 0`. Outside the sampled range the end segment's cubic
//! is continued, so the interpolant extrapolates instead of clamping.
//!
//! Natural end conditions force zero curvature at the first and last knot.
//! A not-a-knot fit through the same samples agrees closely inside the
//! sampled range but extrapolates differently past either end.

use crate::error::{MapError, MapResult};
use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot
    second: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural spline through `(xs[i], ys[i])`.
    ///
    /// # Errors
    /// Needs at least two knots with strictly increasing `xs`.
    pub fn natural(xs: Vec<f64>, ys: Vec<f64>) -> MapResult<Self> {
        let n = xs.len();
        if n < 2 || ys.len() != n {
            return Err(MapError::TooFewRows {
                min: 2,
                found: n.min(ys.len()),
            });
        }
        for pair in xs.windows(2) {
            if pair[1] <= pair[0] {
                return Err(MapError::DuplicateRpm { rpm: pair[1] });
            }
        }

        let mut a = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);
        a[(0, 0)] = 1.0;
        a[(n - 1, n - 1)] = 1.0;
        for i in 1..n - 1 {
            let h0 = xs[i] - xs[i - 1];
            let h1 = xs[i + 1] - xs[i];
            a[(i, i - 1)] = h0;
            a[(i, i)] = 2.0 * (h0 + h1);
            a[(i, i + 1)] = h1;
            rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
        }

        let second = a.lu().solve(&rhs).ok_or(MapError::Singular)?;

        Ok(Self {
            xs,
            ys,
            second: second.iter().copied().collect(),
        })
    }

    /// Evaluate the spline at `x`, extrapolating past either end.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let i = self
            .xs
            .partition_point(|&xi| xi <= x)
            .saturating_sub(1)
            .min(n - 2);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.second[i], self.second[i + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;

        m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// First and last knot.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
