//! Turns a validated engine definition into model inputs.

use std::path::Path;

use crate::error::AppResult;
use es_core::atmosphere::pressure_ratio_from_boost;
use es_core::units::{constants::RHO_AIR_SL, kgpm3, mm};
use es_core::{EngineGeometry, Layout};
use es_maps::MapDataSource;
use es_performance::{OperatingConditions, PerformanceModel};
use es_project::{EngineDefinition, LayoutDef, resolve_map_path};
use tracing::info;

pub fn geometry(def: &EngineDefinition) -> AppResult<EngineGeometry> {
    let engine = &def.engine;
    let layout = match engine.layout {
        LayoutDef::Inline => Layout::Inline,
        LayoutDef::V { bank_angle_deg } => Layout::V { bank_angle_deg },
        LayoutDef::Boxer => Layout::Boxer,
    };
    Ok(EngineGeometry::new(
        engine.cylinders,
        mm(engine.bore_mm),
        mm(engine.stroke_mm),
        mm(engine.rod_length_mm),
        engine.compression_ratio,
        layout,
    )?)
}

/// Operating point of the definition, optionally at another speed.
pub fn conditions(def: &EngineDefinition, rpm: Option<f64>) -> AppResult<OperatingConditions> {
    let op = &def.operating;
    let rpm = rpm.unwrap_or(op.rpm);
    let conditions = match op.ambient {
        Some(ambient) => OperatingConditions::from_ambient(
            rpm,
            op.redline_rpm,
            ambient.altitude_m,
            ambient.temperature_c,
            op.boost_kpa,
            op.throttle,
        )?,
        None => OperatingConditions::new(
            rpm,
            op.redline_rpm,
            kgpm3(op.air_density_kg_m3.unwrap_or(RHO_AIR_SL)),
            pressure_ratio_from_boost(op.boost_kpa),
            op.throttle,
        )?,
    };
    Ok(conditions)
}

/// Pick the VE/BSFC map: explicit override, then the definition's own map,
/// then the default location. `None` means analytical curves.
pub fn select_map(
    def: &EngineDefinition,
    definition_path: &Path,
    override_path: Option<&Path>,
) -> Option<MapDataSource> {
    let map = match (override_path, resolve_map_path(def, definition_path)) {
        (Some(path), _) => MapDataSource::load(path),
        (None, Some(path)) => MapDataSource::load(path),
        (None, None) => MapDataSource::load_default(),
    };
    match &map {
        Some(m) => {
            let (lo, hi) = m.rpm_range();
            info!(engine = %def.name, rpm_min = lo, rpm_max = hi, "using tabulated VE/BSFC");
        }
        None => info!(engine = %def.name, "using analytical VE/BSFC curves"),
    }
    map
}

pub fn model(def: &EngineDefinition, map: Option<MapDataSource>) -> AppResult<PerformanceModel> {
    let geometry = geometry(def)?;
    let fuel = &def.fuel;
    let model = match fuel.afr {
        Some(afr) => PerformanceModel::new(geometry, &fuel.name, afr, fuel.bsfc_base_g_per_kwh)?,
        None => PerformanceModel::stoichiometric(geometry, &fuel.name, fuel.bsfc_base_g_per_kwh)?,
    };
    Ok(model.with_map(map))
}
