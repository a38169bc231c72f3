//! Engine speed sweeps.
//!
//! A sweep steps from a start speed to an end speed in fixed increments and
//! collects one [`PerformanceResult`] per point, the data behind torque and
//! power curves.

use crate::error::{PerfError, PerfResult};
use crate::result::PerformanceResult;

/// Default first point of a redline sweep (rev/min).
pub const DEFAULT_START_RPM: f64 = 1000.0;

/// Default spacing of a redline sweep (rev/min).
pub const DEFAULT_STEP_RPM: f64 = 250.0;

/// Largest number of points a single sweep may hold.
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// Definition of a speed sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RpmSweep {
    pub start_rpm: f64,
    pub end_rpm: f64,
    pub step_rpm: f64,
}

impl RpmSweep {
    /// Create a sweep from `start_rpm` up to and including `end_rpm`.
    ///
    /// # Errors
    /// Rejects non-finite bounds, a negative start, an end below the start,
    /// a non-positive step, and a step so fine the sweep would exceed
    /// [`MAX_SWEEP_POINTS`].
    pub fn new(start_rpm: f64, end_rpm: f64, step_rpm: f64) -> PerfResult<Self> {
        if !start_rpm.is_finite() || start_rpm < 0.0 {
            return Err(PerfError::invalid("sweep start must be finite and >= 0"));
        }
        if !end_rpm.is_finite() || end_rpm < start_rpm {
            return Err(PerfError::invalid("sweep end must be finite and >= start"));
        }
        if !step_rpm.is_finite() || step_rpm <= 0.0 {
            return Err(PerfError::invalid("sweep step must be positive"));
        }
        if (end_rpm - start_rpm) / step_rpm >= MAX_SWEEP_POINTS as f64 {
            return Err(PerfError::InvalidParameter {
                what: format!(
                    "sweep from {start_rpm} to {end_rpm} rpm in steps of {step_rpm} \
                     exceeds {MAX_SWEEP_POINTS} points"
                ),
            });
        }
        Ok(Self {
            start_rpm,
            end_rpm,
            step_rpm,
        })
    }

    /// 1000 rev/min to redline in 250 rev/min steps.
    pub fn up_to_redline(redline_rpm: f64) -> PerfResult<Self> {
        Self::new(
            DEFAULT_START_RPM.min(redline_rpm),
            redline_rpm,
            DEFAULT_STEP_RPM,
        )
    }

    /// Number of points in the sweep.
    pub fn point_count(&self) -> usize {
        ((self.end_rpm - self.start_rpm) / self.step_rpm + 1e-9).floor() as usize + 1
    }

    /// Generate all speeds. The end speed is included only when it falls on
    /// a step.
    pub fn points(&self) -> Vec<f64> {
        (0..self.point_count())
            .map(|i| self.start_rpm + i as f64 * self.step_rpm)
            .collect()
    }
}

/// Results of a sweep, in ascending speed order.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceCurve {
    points: Vec<PerformanceResult>,
}

impl PerformanceCurve {
    pub fn new(points: Vec<PerformanceResult>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PerformanceResult] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point with the highest brake torque.
    pub fn peak_torque(&self) -> Option<&PerformanceResult> {
        self.points
            .iter()
            .max_by(|a, b| a.torque_nm().total_cmp(&b.torque_nm()))
    }

    /// Point with the highest brake power.
    pub fn peak_power(&self) -> Option<&PerformanceResult> {
        self.points
            .iter()
            .max_by(|a, b| a.bhp().total_cmp(&b.bhp()))
    }
}

impl IntoIterator for PerformanceCurve {
    type Item = PerformanceResult;
    type IntoIter = std::vec::IntoIter<PerformanceResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
