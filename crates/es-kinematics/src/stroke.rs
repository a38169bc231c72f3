//! Four-stroke cycle phases.

use std::fmt;

use es_core::numeric::wrap_cycle_deg;

/// Which stroke a cylinder is on, each spanning 180° of the 720° cycle.
///
/// Intake starts at top dead centre (0°).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrokePhase {
    Intake,
    Compression,
    Power,
    Exhaust,
}

impl StrokePhase {
    pub const ALL: [StrokePhase; 4] = [
        StrokePhase::Intake,
        StrokePhase::Compression,
        StrokePhase::Power,
        StrokePhase::Exhaust,
    ];

    /// Phase at a cylinder's own crank angle (any real value).
    pub fn from_cycle_angle(angle_deg: f64) -> Self {
        let quarter = (wrap_cycle_deg(angle_deg) / 180.0) as usize;
        Self::ALL[quarter.min(3)]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrokePhase::Intake => "intake",
            StrokePhase::Compression => "compression",
            StrokePhase::Power => "power",
            StrokePhase::Exhaust => "exhaust",
        }
    }
}

impl fmt::Display for StrokePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
