//! Where each cylinder sits on the crankshaft and when it fires.
//!
//! Inline engines get one throw per cylinder, fired at even intervals over the
//! 720° cycle. Two-bank layouts (V and boxer) pair cylinders on a shared
//! throw: both cylinders of a pair run at the same crank angle and differ only
//! by a rotation of ± half the bank angle about the crankshaft. Throws are
//! spaced evenly over 720°. This is a visual simplification, not a real
//! firing order.

use crate::error::KinematicsResult;
use es_core::numeric::{DEG_PER_CYCLE, wrap_cycle_deg};
use es_core::{EngineGeometry, Layout};
use uom::si::length::meter;

/// Axial pitch between adjacent throws, in bores.
pub const CYLINDER_SPACING_BORES: f64 = 1.2;

/// Bank a cylinder belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bank {
    /// Single row of an inline engine
    Center,
    /// Rotated by minus half the bank angle
    Left,
    /// Rotated by plus half the bank angle
    Right,
}

/// Fixed placement of one cylinder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderSlot {
    /// Cylinder index, 0-based
    pub index: usize,
    /// Crank throw this cylinder's rod runs on
    pub throw: usize,
    pub bank: Bank,
    /// Position along the crankshaft (m), centred on the engine
    pub axial_offset: f64,
    /// Crank angle added to the base angle, in `[0, 720)`
    pub phase_offset_deg: f64,
    /// Rotation of the cylinder axis about the crankshaft (degrees)
    pub bank_rotation_deg: f64,
}

/// Lay out every cylinder of a validated geometry.
///
/// Two-bank layouts number the cylinders throw by throw: `2i` is the left
/// bank of throw `i` and `2i + 1` the right.
pub fn cylinder_plan(geometry: &EngineGeometry) -> KinematicsResult<Vec<CylinderSlot>> {
    geometry.validate()?;

    let cylinders = geometry.cylinders as usize;
    let spacing = CYLINDER_SPACING_BORES * geometry.bore.get::<meter>();
    let throws = geometry.layout.throw_count(geometry.cylinders) as usize;
    let centred = |throw: usize| (throw as f64 - (throws as f64 - 1.0) / 2.0) * spacing;
    let phase = |throw: usize| wrap_cycle_deg(throw as f64 * DEG_PER_CYCLE / throws as f64);

    let slots = match geometry.layout {
        Layout::Inline => (0..cylinders)
            .map(|i| CylinderSlot {
                index: i,
                throw: i,
                bank: Bank::Center,
                axial_offset: centred(i),
                phase_offset_deg: phase(i),
                bank_rotation_deg: 0.0,
            })
            .collect(),
        Layout::V { .. } | Layout::Boxer => {
            let half = geometry.layout.bank_angle_deg() / 2.0;
            (0..throws)
                .flat_map(|t| {
                    [(Bank::Left, -half), (Bank::Right, half)]
                        .into_iter()
                        .enumerate()
                        .map(move |(side, (bank, rotation))| (t, side, bank, rotation))
                })
                .map(|(t, side, bank, rotation)| CylinderSlot {
                    index: 2 * t + side,
                    throw: t,
                    bank,
                    axial_offset: centred(t),
                    phase_offset_deg: phase(t),
                    bank_rotation_deg: rotation,
                })
                .collect()
        }
    };
    Ok(slots)
}
