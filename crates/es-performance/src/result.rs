//! Performance results.

use es_core::units::{MassRate, Power, Pressure, Torque, Velocity, Volume, VolumeRate};
use serde::{Deserialize, Serialize};
use uom::si::{
    mass_rate::kilogram_per_second, power::watt, pressure::kilopascal, torque::newton_meter,
    velocity::meter_per_second, volume::liter, volume_rate::cubic_meter_per_second,
};

/// Watts per (mechanical) horsepower as used in the reports.
pub const W_PER_HP: f64 = 745.7;

/// A dimensionless efficiency, stored as a fraction.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Efficiency(f64);

impl Efficiency {
    pub fn from_fraction(fraction: f64) -> Self {
        Self(fraction)
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }
}

/// Complete steady-state performance at one operating point.
///
/// Quantities are SI (`uom`); the accessor methods convert to the display
/// units used by [`PerformanceReport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceResult {
    /// Engine speed this result was computed at (rev/min)
    pub rpm: f64,
    pub displacement: Volume,
    pub air_mass_flow: MassRate,
    pub fuel_mass_flow: MassRate,
    pub fuel_volume_flow: VolumeRate,
    pub brake_power: Power,
    pub friction_power: Power,
    pub indicated_power: Power,
    pub torque: Torque,
    pub bmep: Pressure,
    pub imep: Pressure,
    pub fmep: Pressure,
    pub mean_piston_speed: Velocity,
    /// Brake specific fuel consumption (g/kWh)
    pub bsfc_g_per_kwh: f64,
    pub mechanical_efficiency: Efficiency,
    pub brake_thermal_efficiency: Efficiency,
    /// Ideal Otto-cycle efficiency; depends on compression ratio only
    pub ideal_thermal_efficiency: Efficiency,
    pub volumetric_efficiency: Efficiency,
}

impl PerformanceResult {
    pub fn displacement_liters(&self) -> f64 {
        self.displacement.get::<liter>()
    }

    pub fn air_mass_flow_kg_s(&self) -> f64 {
        self.air_mass_flow.get::<kilogram_per_second>()
    }

    pub fn fuel_mass_flow_kg_s(&self) -> f64 {
        self.fuel_mass_flow.get::<kilogram_per_second>()
    }

    pub fn fuel_flow_l_per_h(&self) -> f64 {
        self.fuel_volume_flow.get::<cubic_meter_per_second>() * 1000.0 * 3600.0
    }

    /// Brake horsepower.
    pub fn bhp(&self) -> f64 {
        self.brake_power.get::<watt>() / W_PER_HP
    }

    /// Indicated horsepower.
    pub fn ihp(&self) -> f64 {
        self.indicated_power.get::<watt>() / W_PER_HP
    }

    pub fn torque_nm(&self) -> f64 {
        self.torque.get::<newton_meter>()
    }

    pub fn bmep_kpa(&self) -> f64 {
        self.bmep.get::<kilopascal>()
    }

    pub fn imep_kpa(&self) -> f64 {
        self.imep.get::<kilopascal>()
    }

    pub fn fmep_kpa(&self) -> f64 {
        self.fmep.get::<kilopascal>()
    }

    pub fn mean_piston_speed_m_s(&self) -> f64 {
        self.mean_piston_speed.get::<meter_per_second>()
    }

    /// Distance per volume of fuel at a steady road speed, zero when either
    /// the speed or the fuel flow is zero.
    pub fn fuel_economy_km_per_l(&self, vehicle_speed_kph: f64) -> f64 {
        let flow = self.fuel_flow_l_per_h();
        if vehicle_speed_kph > 0.0 && flow > 0.0 {
            vehicle_speed_kph / flow
        } else {
            0.0
        }
    }

    /// Flat, display-unit view of the result.
    pub fn report(&self) -> PerformanceReport {
        PerformanceReport {
            rpm: self.rpm,
            displacement_l: self.displacement_liters(),
            air_mass_flow_kg_s: self.air_mass_flow_kg_s(),
            fuel_mass_flow_kg_s: self.fuel_mass_flow_kg_s(),
            fuel_flow_l_hr: self.fuel_flow_l_per_h(),
            bhp: self.bhp(),
            ihp: self.ihp(),
            torque_nm: self.torque_nm(),
            bmep_kpa: self.bmep_kpa(),
            imep_kpa: self.imep_kpa(),
            fmep_kpa: self.fmep_kpa(),
            bsfc_g_kwh: self.bsfc_g_per_kwh,
            mechanical_efficiency_percent: self.mechanical_efficiency.percent(),
            brake_thermal_efficiency_percent: self.brake_thermal_efficiency.percent(),
            thermal_efficiency_percent: self.ideal_thermal_efficiency.percent(),
            volumetric_efficiency_percent: self.volumetric_efficiency.percent(),
        }
    }
}

/// Stable, named output fields for presentation code.
///
/// Units are part of the field names and do not change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub rpm: f64,
    pub displacement_l: f64,
    pub air_mass_flow_kg_s: f64,
    pub fuel_mass_flow_kg_s: f64,
    pub fuel_flow_l_hr: f64,
    pub bhp: f64,
    pub ihp: f64,
    pub torque_nm: f64,
    pub bmep_kpa: f64,
    pub imep_kpa: f64,
    pub fmep_kpa: f64,
    pub bsfc_g_kwh: f64,
    pub mechanical_efficiency_percent: f64,
    pub brake_thermal_efficiency_percent: f64,
    /// Ideal Otto-cycle efficiency
    pub thermal_efficiency_percent: f64,
    pub volumetric_efficiency_percent: f64,
}
