//! Steady-state engine cycle model.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::conditions::OperatingConditions;
use crate::curves::{AnalyticalCurves, EfficiencyCurves};
use crate::error::{PerfError, PerfResult};
use crate::friction::WatsonHeywood;
use crate::result::{Efficiency, PerformanceResult};
use crate::sweep::{PerformanceCurve, RpmSweep};
use es_core::EngineGeometry;
use es_core::numeric::ensure_positive;
use es_core::units::{
    constants::G_PER_KWH_TO_KG_PER_J, kgps, m3, m3ps, mps, nm, pa, rpm_to_rad_per_s, watts,
};
use es_fuels::{FuelCatalogEntry, FuelSpec, lookup_fuel};
use es_maps::MapDataSource;
use rayon::prelude::*;
use tracing::debug;
use uom::si::{length::meter, mass_density::kilogram_per_cubic_meter, volume::cubic_meter};

/// Ratio of specific heats for air.
pub const GAMMA_AIR: f64 = 1.4;

/// Ideal Otto-cycle thermal efficiency, `1 - CR^(1-γ)`.
pub fn ideal_otto_efficiency(compression_ratio: f64) -> f64 {
    1.0 - compression_ratio.powf(1.0 - GAMMA_AIR)
}

/// Performance model of one engine burning one fuel.
///
/// Holds the inputs that stay fixed while the operating point varies
/// (geometry, fuel, mixture, base BSFC, optional map). Cheap to clone and
/// safe to share between threads.
#[derive(Clone, Debug)]
pub struct PerformanceModel {
    geometry: EngineGeometry,
    fuel: &'static FuelCatalogEntry,
    afr: f64,
    bsfc_base_g_per_kwh: f64,
    map: Option<Arc<MapDataSource>>,
    friction: WatsonHeywood,
}

impl PerformanceModel {
    /// Create a model running on the named fuel at the given air-fuel ratio.
    ///
    /// # Errors
    /// Returns [`PerfError::InvalidParameter`] for invalid geometry, an
    /// unknown fuel, or a non-positive AFR or base BSFC.
    pub fn new(
        geometry: EngineGeometry,
        fuel_name: &str,
        afr: f64,
        bsfc_base_g_per_kwh: f64,
    ) -> PerfResult<Self> {
        geometry.validate()?;
        let fuel = lookup_fuel(fuel_name)?;
        validate_mixture(afr, bsfc_base_g_per_kwh)?;
        Ok(Self {
            geometry,
            fuel,
            afr,
            bsfc_base_g_per_kwh,
            map: None,
            friction: WatsonHeywood::default(),
        })
    }

    /// Same as [`Self::new`] with the fuel's stoichiometric AFR.
    pub fn stoichiometric(
        geometry: EngineGeometry,
        fuel_name: &str,
        bsfc_base_g_per_kwh: f64,
    ) -> PerfResult<Self> {
        let afr = lookup_fuel(fuel_name)?.spec.stoich_afr;
        Self::new(geometry, fuel_name, afr, bsfc_base_g_per_kwh)
    }

    /// Use tabulated VE/BSFC instead of the analytical curves.
    pub fn with_map(mut self, map: Option<MapDataSource>) -> Self {
        self.map = map.map(Arc::new);
        self
    }

    /// Override the friction correlation.
    pub fn with_friction(mut self, friction: WatsonHeywood) -> Self {
        self.friction = friction;
        self
    }

    pub fn geometry(&self) -> &EngineGeometry {
        &self.geometry
    }

    pub fn fuel(&self) -> &'static FuelCatalogEntry {
        self.fuel
    }

    pub fn afr(&self) -> f64 {
        self.afr
    }

    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    /// Evaluate the model at one operating point.
    pub fn compute(&self, conditions: &OperatingConditions) -> PerfResult<PerformanceResult> {
        let analytical = AnalyticalCurves::new(conditions.redline_rpm, self.bsfc_base_g_per_kwh);
        let curves: &dyn EfficiencyCurves = match &self.map {
            Some(map) => map.as_ref(),
            None => &analytical,
        };
        evaluate(
            &self.geometry,
            conditions,
            &self.fuel.spec,
            self.afr,
            curves,
            &self.friction,
        )
    }

    /// Evaluate the model at every speed of `sweep`, keeping all other
    /// conditions from `base`. Points are computed in parallel and returned in
    /// ascending speed order.
    pub fn sweep(
        &self,
        base: &OperatingConditions,
        sweep: &RpmSweep,
    ) -> PerfResult<PerformanceCurve> {
        let points = sweep
            .points()
            .par_iter()
            .map(|&rpm| self.compute(&base.with_rpm(rpm)))
            .collect::<PerfResult<Vec<_>>>()?;
        Ok(PerformanceCurve::new(points))
    }
}

/// One-shot evaluation by fuel name, with an optional map overriding the
/// analytical VE/BSFC curves.
///
/// # Errors
/// Returns [`PerfError::InvalidParameter`] for invalid geometry or operating
/// conditions, an unknown fuel, or a non-positive AFR or base BSFC.
pub fn compute(
    geometry: &EngineGeometry,
    conditions: &OperatingConditions,
    fuel_name: &str,
    afr: f64,
    bsfc_base_g_per_kwh: f64,
    map: Option<&MapDataSource>,
) -> PerfResult<PerformanceResult> {
    let fuel = lookup_fuel(fuel_name)?;
    validate_mixture(afr, bsfc_base_g_per_kwh)?;
    let analytical = AnalyticalCurves::new(conditions.redline_rpm, bsfc_base_g_per_kwh);
    let curves: &dyn EfficiencyCurves = match map {
        Some(map) => map,
        None => &analytical,
    };
    compute_with_curves(geometry, conditions, &fuel.spec, afr, curves)
}

/// Evaluation with an explicit curve strategy and the default friction model.
pub fn compute_with_curves(
    geometry: &EngineGeometry,
    conditions: &OperatingConditions,
    fuel: &FuelSpec,
    afr: f64,
    curves: &dyn EfficiencyCurves,
) -> PerfResult<PerformanceResult> {
    ensure_positive(afr, "air-fuel ratio must be positive")?;
    evaluate(
        geometry,
        conditions,
        fuel,
        afr,
        curves,
        &WatsonHeywood::default(),
    )
}

fn validate_mixture(afr: f64, bsfc_base_g_per_kwh: f64) -> PerfResult<()> {
    ensure_positive(afr, "air-fuel ratio must be positive")?;
    ensure_positive(bsfc_base_g_per_kwh, "base BSFC must be positive")?;
    Ok(())
}

fn finite(value: f64, what: &'static str) -> PerfResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PerfError::NonFinite { what, value })
    }
}

fn evaluate(
    geometry: &EngineGeometry,
    conditions: &OperatingConditions,
    fuel: &FuelSpec,
    afr: f64,
    curves: &dyn EfficiencyCurves,
    friction: &WatsonHeywood,
) -> PerfResult<PerformanceResult> {
    geometry.validate()?;
    conditions.validate()?;

    let rpm = conditions.rpm;
    let vd = geometry.displacement().get::<cubic_meter>();
    let stroke = geometry.stroke.get::<meter>();

    // Breathing and consumption
    let ve = curves.volumetric_efficiency(rpm).max(0.0);
    let bsfc_g_per_kwh = curves.bsfc_g_per_kwh(rpm);
    let bsfc_kg_per_j = bsfc_g_per_kwh * G_PER_KWH_TO_KG_PER_J;

    // Air & fuel flow: one intake stroke per cylinder every two revolutions
    let rho_air = conditions.air_density.get::<kilogram_per_cubic_meter>();
    let mdot_air =
        vd * (rpm / 120.0) * rho_air * ve * conditions.pressure_ratio * conditions.throttle;
    let mdot_fuel = mdot_air / afr;
    let fuel_density_kg_m3 = fuel.density_kg_per_l * 1000.0;
    let fuel_volume_flow = mdot_fuel / fuel_density_kg_m3;

    // Brake power follows from the fuel rate and BSFC
    let brake_power = if bsfc_kg_per_j > 0.0 && rpm > 0.0 {
        mdot_fuel / bsfc_kg_per_j
    } else {
        0.0
    };
    let omega = rpm_to_rad_per_s(rpm);
    let torque = if omega > 0.0 { brake_power / omega } else { 0.0 };
    let bmep = if vd > 0.0 { torque * 4.0 * PI / vd } else { 0.0 };

    // Friction and indicated quantities
    let sp = WatsonHeywood::mean_piston_speed(stroke, rpm);
    let fmep = friction.fmep_pa(sp);
    let friction_power = WatsonHeywood::friction_power_w(fmep, vd, rpm);
    let indicated_power = brake_power + friction_power;
    let imep = if vd > 0.0 && rpm > 0.0 {
        (indicated_power / vd) * (4.0 * PI / (rpm / 60.0))
    } else {
        0.0
    };

    // Efficiencies
    let eta_mech = if indicated_power > 0.0 {
        brake_power / indicated_power
    } else {
        0.0
    };
    let eta_brake_thermal = if mdot_fuel > 0.0 {
        brake_power / (mdot_fuel * fuel.lhv_j_per_kg())
    } else {
        0.0
    };
    let eta_otto = ideal_otto_efficiency(geometry.compression_ratio);

    finite(brake_power, "brake power")?;
    finite(torque, "torque")?;
    finite(imep, "imep")?;

    debug!(
        rpm,
        ve,
        bsfc_g_per_kwh,
        brake_power_w = brake_power,
        torque_nm = torque,
        fmep_pa = fmep,
        "computed operating point"
    );

    Ok(PerformanceResult {
        rpm,
        displacement: m3(vd),
        air_mass_flow: kgps(mdot_air),
        fuel_mass_flow: kgps(mdot_fuel),
        fuel_volume_flow: m3ps(fuel_volume_flow),
        brake_power: watts(brake_power),
        friction_power: watts(friction_power),
        indicated_power: watts(indicated_power),
        torque: nm(torque),
        bmep: pa(bmep),
        imep: pa(imep),
        fmep: pa(fmep),
        mean_piston_speed: mps(sp),
        bsfc_g_per_kwh,
        mechanical_efficiency: Efficiency::from_fraction(eta_mech),
        brake_thermal_efficiency: Efficiency::from_fraction(eta_brake_thermal),
        ideal_thermal_efficiency: Efficiency::from_fraction(eta_otto),
        volumetric_efficiency: Efficiency::from_fraction(ve),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use es_core::{Layout, units::mm};
    use uom::si::power::watt;

    fn geometry() -> EngineGeometry {
        EngineGeometry::new(4, mm(82.5), mm(92.8), mm(140.0), 11.0, Layout::Inline).unwrap()
    }

    /// Curves fixed at one value, independent of speed.
    struct Flat {
        ve: f64,
        bsfc: f64,
    }

    impl EfficiencyCurves for Flat {
        fn volumetric_efficiency(&self, _rpm: f64) -> f64 {
            self.ve
        }

        fn bsfc_g_per_kwh(&self, _rpm: f64) -> f64 {
            self.bsfc
        }
    }

    #[test]
    fn otto_efficiency_of_cr_11() {
        let eta = ideal_otto_efficiency(11.0);
        assert!((eta - (1.0 - 11.0_f64.powf(-0.4))).abs() < 1e-15);
        assert!((eta - 0.6168).abs() < 1e-3);
    }

    #[test]
    fn flat_curves_give_hand_calculated_power() {
        let g = geometry();
        let c = OperatingConditions::sea_level(3000.0, 7000.0).unwrap();
        let fuel = lookup_fuel("Gasoline").unwrap().spec;
        let flat = Flat {
            ve: 0.9,
            bsfc: 250.0,
        };
        let r = compute_with_curves(&g, &c, &fuel, 14.7, &flat).unwrap();

        let vd = g.displacement().get::<cubic_meter>();
        let mdot_air = vd * 25.0 * 1.225 * 0.9;
        let mdot_fuel = mdot_air / 14.7;
        let p = mdot_fuel / (250.0 / 3.6e9);
        assert!((r.brake_power.get::<watt>() - p).abs() < 1e-6 * p);
        assert!((r.torque_nm() - p / (3000.0 * 2.0 * PI / 60.0)).abs() < 1e-6);
        assert!((r.bsfc_g_per_kwh - 250.0).abs() < 1e-12);
        assert!((r.volumetric_efficiency.percent() - 90.0).abs() < 1e-9);

        // 0.0928 m stroke at 3000 rpm
        let sp = 2.0 * 0.0928 * 3000.0 / 60.0;
        let fmep = 1e5 + 600.0 * sp + 20.0 * sp * sp;
        let p_fric = fmep * vd * 3000.0 / 120.0;
        let p_ind = p + p_fric;
        let imep = (p_ind / vd) * (4.0 * PI / 50.0);
        assert!((r.imep.value - imep).abs() < 1e-9 * imep);
        assert!((r.fmep.value - fmep).abs() < 1e-9 * fmep);

        let eta_bt = p / (mdot_fuel * 44.0e6);
        assert!((r.brake_thermal_efficiency.fraction() - eta_bt).abs() < 1e-12);
        // 250 g/kWh on a 44 MJ/kg fuel
        assert!((eta_bt - 3.6e6 / (0.25 * 44.0e6)).abs() < 1e-9);
        assert!((r.mechanical_efficiency.fraction() - p / p_ind).abs() < 1e-12);

        let litres_per_hour = mdot_fuel / 750.0 * 1000.0 * 3600.0;
        assert!((r.fuel_flow_l_per_h() - litres_per_hour).abs() < 1e-9 * litres_per_hour);
    }

    #[test]
    fn map_extrapolated_below_zero_is_guarded() {
        use es_maps::MapRow;

        let row = |rpm, ve_percent, bsfc_g_per_kwh| MapRow {
            rpm,
            ve_percent,
            bsfc_g_per_kwh,
        };
        // Two rows fit a straight line: VE reaches zero at 3000 rpm
        let falling_ve =
            MapDataSource::from_rows(vec![row(1000.0, 80.0, 300.0), row(2000.0, 40.0, 280.0)])
                .unwrap();
        let model = PerformanceModel::new(geometry(), "Gasoline", 14.7, 250.0)
            .unwrap()
            .with_map(Some(falling_ve));
        let r = model
            .compute(&OperatingConditions::sea_level(4000.0, 8500.0).unwrap())
            .unwrap();
        assert!(r.bsfc_g_per_kwh > 0.0);
        assert_eq!(r.volumetric_efficiency.fraction(), 0.0);
        assert_eq!(r.air_mass_flow_kg_s(), 0.0);
        assert_eq!(r.fuel_flow_l_per_h(), 0.0);
        assert_eq!(r.bhp(), 0.0);
        assert_eq!(r.torque_nm(), 0.0);
        assert!(r.friction_power.get::<watt>() > 0.0);

        // BSFC reaches zero at 3000 rpm while VE keeps rising
        let falling_bsfc =
            MapDataSource::from_rows(vec![row(1000.0, 80.0, 300.0), row(2000.0, 90.0, 150.0)])
                .unwrap();
        let r = compute(
            &geometry(),
            &OperatingConditions::sea_level(4000.0, 8500.0).unwrap(),
            "Gasoline",
            14.7,
            250.0,
            Some(&falling_bsfc),
        )
        .unwrap();
        assert!((r.bsfc_g_per_kwh + 150.0).abs() < 1e-9);
        assert!(r.fuel_mass_flow_kg_s() > 0.0);
        assert_eq!(r.bhp(), 0.0);
        assert_eq!(r.torque_nm(), 0.0);
        assert_eq!(r.bmep.value, 0.0);
        assert_eq!(r.brake_thermal_efficiency.fraction(), 0.0);
        assert_eq!(r.mechanical_efficiency.fraction(), 0.0);
    }

    #[test]
    fn bmep_is_torque_over_displacement_per_cycle() {
        let model = PerformanceModel::new(geometry(), "Gasoline", 14.7, 250.0).unwrap();
        let r = model
            .compute(&OperatingConditions::sea_level(4000.0, 8500.0).unwrap())
            .unwrap();
        let vd = r.displacement.get::<cubic_meter>();
        let expected = r.torque_nm() * 4.0 * PI / vd;
        assert!((r.bmep.value - expected).abs() < 1e-6 * expected);
    }

    #[test]
    fn friction_and_indicated_power_balance() {
        let model = PerformanceModel::new(geometry(), "Gasoline", 14.7, 250.0).unwrap();
        let r = model
            .compute(&OperatingConditions::sea_level(5000.0, 8500.0).unwrap())
            .unwrap();
        let total = r.brake_power.get::<watt>() + r.friction_power.get::<watt>();
        assert!((r.indicated_power.get::<watt>() - total).abs() < 1e-9 * total);
        assert!(r.ihp() > r.bhp());
        assert!(r.mechanical_efficiency.fraction() < 1.0);
    }

    #[test]
    fn zero_throttle_makes_no_power() {
        let model = PerformanceModel::new(geometry(), "Gasoline", 14.7, 250.0).unwrap();
        let c = OperatingConditions::new(3000.0, 8500.0, es_core::units::kgpm3(1.2), 1.0, 0.0)
            .unwrap();
        let r = model.compute(&c).unwrap();
        assert_eq!(r.bhp(), 0.0);
        assert_eq!(r.brake_thermal_efficiency.fraction(), 0.0);
        assert_eq!(r.mechanical_efficiency.fraction(), 0.0);
        assert!(r.friction_power.get::<watt>() > 0.0);
    }

    #[test]
    fn boost_scales_air_flow() {
        let model = PerformanceModel::new(geometry(), "Gasoline", 14.7, 250.0).unwrap();
        let na = OperatingConditions::sea_level(3000.0, 8500.0).unwrap();
        let boosted = OperatingConditions { pressure_ratio: 1.5, ..na };
        let a = model.compute(&na).unwrap();
        let b = model.compute(&boosted).unwrap();
        assert!((b.air_mass_flow_kg_s() / a.air_mass_flow_kg_s() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn lower_friction_raises_mechanical_efficiency() {
        let c = OperatingConditions::sea_level(6000.0, 8500.0).unwrap();
        let stock = PerformanceModel::new(geometry(), "Gasoline", 14.7, 250.0).unwrap();
        let slick = stock.clone().with_friction(WatsonHeywood {
            c0: 0.5e5,
            ..WatsonHeywood::default()
        });
        let a = stock.compute(&c).unwrap();
        let b = slick.compute(&c).unwrap();
        assert_eq!(a.bhp(), b.bhp());
        assert!(b.mechanical_efficiency > a.mechanical_efficiency);
        assert!(b.fmep_kpa() < a.fmep_kpa());
    }

    #[test]
    fn stoichiometric_uses_fuel_afr() {
        let model = PerformanceModel::stoichiometric(geometry(), "E85", 300.0).unwrap();
        assert_eq!(model.afr(), 9.7);
        assert_eq!(model.fuel().canonical_id, "E85");
        assert!(!model.has_map());
    }

    #[test]
    fn rejects_bad_mixture_inputs() {
        assert!(PerformanceModel::new(geometry(), "Gasoline", 0.0, 250.0).is_err());
        assert!(PerformanceModel::new(geometry(), "Gasoline", 14.7, -1.0).is_err());
        assert!(matches!(
            PerformanceModel::new(geometry(), "Unobtainium", 14.7, 250.0),
            Err(PerfError::InvalidParameter { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use es_core::{Layout, units::mm};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mechanical_efficiency_in_unit_interval(
            rpm in 100.0_f64..12_000.0,
            throttle in 0.05_f64..=1.0,
            bore in 60.0_f64..120.0,
            stroke in 60.0_f64..120.0,
        ) {
            let g = EngineGeometry::new(4, mm(bore), mm(stroke), mm(stroke * 1.6), 10.0, Layout::Inline).unwrap();
            let c = OperatingConditions::new(rpm, 8000.0, es_core::units::kgpm3(1.2), 1.0, throttle).unwrap();
            let r = compute(&g, &c, "Gasoline", 14.7, 250.0, None).unwrap();
            let eta = r.mechanical_efficiency.fraction();
            prop_assert!(eta > 0.0 && eta < 1.0, "eta = {}", eta);
        }

        #[test]
        fn displacement_is_independent_of_speed(rpm_a in 0.0_f64..10_000.0, rpm_b in 0.0_f64..10_000.0) {
            let g = EngineGeometry::new(6, mm(86.0), mm(86.0), mm(145.0), 10.5, Layout::V { bank_angle_deg: 60.0 }).unwrap();
            let a = compute(&g, &OperatingConditions::sea_level(rpm_a, 7000.0).unwrap(), "Gasoline", 14.7, 250.0, None).unwrap();
            let b = compute(&g, &OperatingConditions::sea_level(rpm_b, 7000.0).unwrap(), "Gasoline", 14.7, 250.0, None).unwrap();
            prop_assert_eq!(a.displacement, b.displacement);
        }
    }
}
