//! es-project: engine definition file format and validation.
//!
//! Definitions are YAML or JSON. Every load and save validates, so a
//! definition obtained from this crate can be handed to the performance and
//! kinematics models without further checks on field ranges.

pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

pub use schema::*;
pub use validate::{ValidationError, validate_definition};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<EngineDefinition> {
    let content = std::fs::read_to_string(path)?;
    let def: EngineDefinition = serde_yaml::from_str(&content)?;
    validate_definition(&def)?;
    Ok(def)
}

pub fn save_yaml(path: &Path, def: &EngineDefinition) -> ProjectResult<()> {
    validate_definition(def)?;
    let content = serde_yaml::to_string(def)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<EngineDefinition> {
    let content = std::fs::read_to_string(path)?;
    let def: EngineDefinition = serde_json::from_str(&content)?;
    validate_definition(&def)?;
    Ok(def)
}

pub fn save_json(path: &Path, def: &EngineDefinition) -> ProjectResult<()> {
    validate_definition(def)?;
    let content = serde_json::to_string_pretty(def)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &Path) -> ProjectResult<EngineDefinition> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

/// Map file location for a definition loaded from `definition_path`.
///
/// Relative map paths resolve against the definition's directory.
pub fn resolve_map_path(def: &EngineDefinition, definition_path: &Path) -> Option<PathBuf> {
    let map = Path::new(def.map_path.as_deref()?);
    if map.is_absolute() {
        return Some(map.to_path_buf());
    }
    let base = definition_path.parent().unwrap_or_else(|| Path::new(""));
    Some(base.join(map))
}
