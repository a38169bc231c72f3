//! Engine definition file schema.

use serde::{Deserialize, Serialize};

/// Newest schema version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

/// A complete engine definition: geometry, operating point and fuel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDefinition {
    pub version: u32,
    pub name: String,
    pub engine: EngineDef,
    pub operating: OperatingDef,
    pub fuel: FuelDef,
    /// VE/BSFC map; relative paths resolve against the definition file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDef {
    pub cylinders: u32,
    pub bore_mm: f64,
    pub stroke_mm: f64,
    pub rod_length_mm: f64,
    pub compression_ratio: f64,
    #[serde(default)]
    pub layout: LayoutDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type")]
pub enum LayoutDef {
    #[default]
    Inline,
    V {
        bank_angle_deg: f64,
    },
    Boxer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatingDef {
    pub rpm: f64,
    pub redline_rpm: f64,
    #[serde(default = "default_throttle")]
    pub throttle: f64,
    /// Manifold boost above ambient (kPa)
    #[serde(default)]
    pub boost_kpa: f64,
    /// Air density given directly; excludes `ambient`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_density_kg_m3: Option<f64>,
    /// Air density from the standard atmosphere; excludes `air_density_kg_m3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient: Option<AmbientDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AmbientDef {
    pub altitude_m: f64,
    pub temperature_c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelDef {
    pub name: String,
    /// Air-fuel ratio; defaults to the fuel's stoichiometric value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afr: Option<f64>,
    #[serde(default = "default_bsfc_base")]
    pub bsfc_base_g_per_kwh: f64,
}

fn default_throttle() -> f64 {
    1.0
}

fn default_bsfc_base() -> f64 {
    250.0
}
