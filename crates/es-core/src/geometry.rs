//! Engine geometry shared by the performance and kinematic models.

use std::f64::consts::PI;
use std::fmt;

use crate::error::{EsError, EsResult};
use crate::numeric::ensure_positive;
use crate::units::{Area, Length, Volume};
use uom::si::{area::square_meter, length::meter, volume::cubic_meter};

/// Bank arrangement of the cylinders.
///
/// The set of layouts is closed, so phasing and bank rotation rules match on
/// this exhaustively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// All cylinders in one row, one crank throw each.
    Inline,
    /// Two banks sharing crank throws, separated by `bank_angle_deg`.
    V { bank_angle_deg: f64 },
    /// Horizontally opposed: a V with a fixed 180° bank angle.
    Boxer,
}

impl Layout {
    /// Included angle between the two banks (degrees). Zero for inline engines.
    pub fn bank_angle_deg(&self) -> f64 {
        match self {
            Layout::Inline => 0.0,
            Layout::V { bank_angle_deg } => *bank_angle_deg,
            Layout::Boxer => 180.0,
        }
    }

    /// Number of banks.
    pub fn bank_count(&self) -> u32 {
        match self {
            Layout::Inline => 1,
            Layout::V { .. } | Layout::Boxer => 2,
        }
    }

    /// Number of crank throws needed for `cylinders` cylinders.
    pub fn throw_count(&self, cylinders: u32) -> u32 {
        cylinders / self.bank_count()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Inline => write!(f, "Inline"),
            Layout::V { bank_angle_deg } => write!(f, "V ({bank_angle_deg}°)"),
            Layout::Boxer => write!(f, "Boxer"),
        }
    }
}

/// Cylinder geometry and bank layout of a reciprocating engine.
///
/// Fields are public for convenient construction in tests and adapters;
/// [`EngineGeometry::new`] and every consumer run [`EngineGeometry::validate`]
/// before using the values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineGeometry {
    /// Number of cylinders
    pub cylinders: u32,
    /// Cylinder bore
    pub bore: Length,
    /// Piston stroke (twice the crank radius)
    pub stroke: Length,
    /// Connecting rod centre-to-centre length
    pub rod_length: Length,
    /// Geometric compression ratio (> 1)
    pub compression_ratio: f64,
    /// Bank arrangement
    pub layout: Layout,
}

impl EngineGeometry {
    /// Create a validated geometry.
    ///
    /// # Errors
    /// Returns [`EsError::InvalidParameter`] if any dimension is non-positive,
    /// the compression ratio is not above 1, the rod cannot reach the crank
    /// pin (`rod <= stroke / 2`), or a two-bank layout has an odd cylinder count.
    pub fn new(
        cylinders: u32,
        bore: Length,
        stroke: Length,
        rod_length: Length,
        compression_ratio: f64,
        layout: Layout,
    ) -> EsResult<Self> {
        let geometry = Self {
            cylinders,
            bore,
            stroke,
            rod_length,
            compression_ratio,
            layout,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> EsResult<()> {
        if self.cylinders == 0 {
            return Err(EsError::InvalidParameter {
                what: "cylinder count must be positive",
            });
        }
        ensure_positive(self.bore.get::<meter>(), "bore must be positive")?;
        ensure_positive(self.stroke.get::<meter>(), "stroke must be positive")?;
        ensure_positive(
            self.rod_length.get::<meter>(),
            "connecting rod length must be positive",
        )?;
        if !self.compression_ratio.is_finite() || self.compression_ratio <= 1.0 {
            return Err(EsError::InvalidParameter {
                what: "compression ratio must be greater than 1",
            });
        }
        if self.rod_length <= self.crank_radius() {
            return Err(EsError::InvalidParameter {
                what: "connecting rod must be longer than the crank radius",
            });
        }

        match self.layout {
            Layout::Inline => {}
            Layout::V { bank_angle_deg } => {
                if !bank_angle_deg.is_finite() || bank_angle_deg <= 0.0 || bank_angle_deg > 180.0 {
                    return Err(EsError::InvalidParameter {
                        what: "V bank angle must be in (0, 180] degrees",
                    });
                }
                ensure_even_cylinders(self.cylinders)?;
            }
            Layout::Boxer => ensure_even_cylinders(self.cylinders)?,
        }

        Ok(())
    }

    /// Crank throw radius, half the stroke.
    pub fn crank_radius(&self) -> Length {
        self.stroke / 2.0
    }

    /// Piston crown area of one cylinder.
    pub fn bore_area(&self) -> Area {
        let bore = self.bore.get::<meter>();
        Area::new::<square_meter>(PI / 4.0 * bore * bore)
    }

    /// Swept volume of a single cylinder.
    pub fn cylinder_displacement(&self) -> Volume {
        Volume::new::<cubic_meter>(
            self.bore_area().get::<square_meter>() * self.stroke.get::<meter>(),
        )
    }

    /// Total swept volume, `(π/4)·bore²·stroke·cylinders`.
    pub fn displacement(&self) -> Volume {
        self.cylinder_displacement() * self.cylinders as f64
    }

    /// Clearance volume of a single cylinder, `Vd / (CR - 1)`.
    pub fn clearance_volume(&self) -> Volume {
        self.cylinder_displacement() / (self.compression_ratio - 1.0)
    }

    /// Rod length over crank radius.
    pub fn rod_ratio(&self) -> f64 {
        self.rod_length.get::<meter>() / self.crank_radius().get::<meter>()
    }
}

fn ensure_even_cylinders(cylinders: u32) -> EsResult<()> {
    if cylinders % 2 != 0 {
        return Err(EsError::InvalidParameter {
            what: "two-bank layouts need an even cylinder count",
        });
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::units::mm;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn displacement_scales_with_cylinders_and_bore_squared(
            cylinders in 1_u32..16,
            bore in 40.0_f64..150.0,
            stroke in 40.0_f64..150.0,
        ) {
            let base = EngineGeometry::new(1, mm(bore), mm(stroke), mm(stroke * 2.0), 10.0, Layout::Inline).unwrap();
            let scaled = EngineGeometry::new(cylinders, mm(bore * 2.0), mm(stroke), mm(stroke * 2.0), 10.0, Layout::Inline).unwrap();
            let ratio = scaled.displacement().get::<cubic_meter>() / base.displacement().get::<cubic_meter>();
            prop_assert!((ratio - 4.0 * cylinders as f64).abs() < 1e-9 * ratio);
        }
    }
}
