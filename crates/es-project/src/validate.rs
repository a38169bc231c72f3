//! Engine definition validation.

use crate::schema::{EngineDef, EngineDefinition, FuelDef, LATEST_VERSION, LayoutDef, OperatingDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Conflicting fields: {first} and {second} cannot both be set")]
    Conflict {
        first: &'static str,
        second: &'static str,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

pub fn validate_definition(def: &EngineDefinition) -> Result<(), ValidationError> {
    if def.version == 0 || def.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: def.version,
        });
    }
    if def.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }
    validate_engine(&def.engine)?;
    validate_operating(&def.operating)?;
    validate_fuel(&def.fuel)?;
    if let Some(path) = &def.map_path
        && path.trim().is_empty()
    {
        return Err(invalid("map_path", "\"\"", "must not be empty when set"));
    }
    Ok(())
}

fn validate_engine(engine: &EngineDef) -> Result<(), ValidationError> {
    if engine.cylinders == 0 {
        return Err(invalid("engine.cylinders", 0, "must be at least 1"));
    }
    positive("engine.bore_mm", engine.bore_mm)?;
    positive("engine.stroke_mm", engine.stroke_mm)?;
    positive("engine.rod_length_mm", engine.rod_length_mm)?;
    if !engine.compression_ratio.is_finite() || engine.compression_ratio <= 1.0 {
        return Err(invalid(
            "engine.compression_ratio",
            engine.compression_ratio,
            "must be greater than 1",
        ));
    }
    if engine.rod_length_mm <= engine.stroke_mm / 2.0 {
        return Err(invalid(
            "engine.rod_length_mm",
            engine.rod_length_mm,
            "must exceed half the stroke",
        ));
    }

    let two_bank = match engine.layout {
        LayoutDef::Inline => false,
        LayoutDef::V { bank_angle_deg } => {
            if !bank_angle_deg.is_finite() || bank_angle_deg <= 0.0 || bank_angle_deg > 180.0 {
                return Err(invalid(
                    "engine.layout.bank_angle_deg",
                    bank_angle_deg,
                    "must be in (0, 180]",
                ));
            }
            true
        }
        LayoutDef::Boxer => true,
    };
    if two_bank && engine.cylinders % 2 != 0 {
        return Err(invalid(
            "engine.cylinders",
            engine.cylinders,
            "V and boxer layouts need an even count",
        ));
    }
    Ok(())
}

fn validate_operating(op: &OperatingDef) -> Result<(), ValidationError> {
    if !op.rpm.is_finite() || op.rpm < 0.0 {
        return Err(invalid("operating.rpm", op.rpm, "must be finite and >= 0"));
    }
    positive("operating.redline_rpm", op.redline_rpm)?;
    if !(0.0..=1.0).contains(&op.throttle) {
        return Err(invalid("operating.throttle", op.throttle, "must be within [0, 1]"));
    }
    if !op.boost_kpa.is_finite() || op.boost_kpa < 0.0 {
        return Err(invalid("operating.boost_kpa", op.boost_kpa, "must be finite and >= 0"));
    }
    match (op.air_density_kg_m3, op.ambient) {
        (Some(_), Some(_)) => {
            return Err(ValidationError::Conflict {
                first: "operating.air_density_kg_m3",
                second: "operating.ambient",
            });
        }
        (Some(rho), None) => positive("operating.air_density_kg_m3", rho)?,
        (None, Some(ambient)) => {
            if !ambient.altitude_m.is_finite() {
                return Err(invalid(
                    "operating.ambient.altitude_m",
                    ambient.altitude_m,
                    "must be finite",
                ));
            }
            if !ambient.temperature_c.is_finite() || ambient.temperature_c <= -273.15 {
                return Err(invalid(
                    "operating.ambient.temperature_c",
                    ambient.temperature_c,
                    "must be above absolute zero",
                ));
            }
        }
        (None, None) => {}
    }
    Ok(())
}

fn validate_fuel(fuel: &FuelDef) -> Result<(), ValidationError> {
    if es_fuels::lookup_fuel(&fuel.name).is_err() {
        let known: Vec<&str> = es_fuels::fuel_catalog()
            .iter()
            .map(|entry| entry.canonical_id)
            .collect();
        return Err(ValidationError::InvalidValue {
            field: "fuel.name".to_string(),
            value: fuel.name.clone(),
            reason: format!("unknown fuel, expected one of {}", known.join(", ")),
        });
    }
    if let Some(afr) = fuel.afr {
        positive("fuel.afr", afr)?;
    }
    positive("fuel.bsfc_base_g_per_kwh", fuel.bsfc_base_g_per_kwh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AmbientDef;

    fn definition() -> EngineDefinition {
        EngineDefinition {
            version: 1,
            name: "Reference I4".to_string(),
            engine: EngineDef {
                cylinders: 4,
                bore_mm: 82.5,
                stroke_mm: 92.8,
                rod_length_mm: 140.0,
                compression_ratio: 11.0,
                layout: LayoutDef::Inline,
            },
            operating: OperatingDef {
                rpm: 2500.0,
                redline_rpm: 8500.0,
                throttle: 1.0,
                boost_kpa: 0.0,
                air_density_kg_m3: Some(1.225),
                ambient: None,
            },
            fuel: FuelDef {
                name: "Gasoline".to_string(),
                afr: Some(14.7),
                bsfc_base_g_per_kwh: 250.0,
            },
            map_path: None,
        }
    }

    fn field_of(err: ValidationError) -> String {
        match err {
            ValidationError::InvalidValue { field, .. } => field,
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn reference_definition_is_valid() {
        validate_definition(&definition()).unwrap();
    }

    #[test]
    fn version_bounds() {
        let mut def = definition();
        def.version = 2;
        assert!(matches!(
            validate_definition(&def),
            Err(ValidationError::UnsupportedVersion { version: 2 })
        ));
        def.version = 0;
        assert!(validate_definition(&def).is_err());
    }

    #[test]
    fn geometry_errors_name_the_field() {
        let mut def = definition();
        def.engine.compression_ratio = 1.0;
        assert_eq!(
            field_of(validate_definition(&def).unwrap_err()),
            "engine.compression_ratio"
        );

        let mut def = definition();
        def.engine.rod_length_mm = 40.0;
        assert_eq!(
            field_of(validate_definition(&def).unwrap_err()),
            "engine.rod_length_mm"
        );

        let mut def = definition();
        def.engine.layout = LayoutDef::V { bank_angle_deg: 90.0 };
        def.engine.cylinders = 5;
        assert_eq!(
            field_of(validate_definition(&def).unwrap_err()),
            "engine.cylinders"
        );
    }

    #[test]
    fn operating_errors() {
        let mut def = definition();
        def.operating.throttle = 1.2;
        assert_eq!(
            field_of(validate_definition(&def).unwrap_err()),
            "operating.throttle"
        );

        let mut def = definition();
        def.operating.ambient = Some(AmbientDef {
            altitude_m: 0.0,
            temperature_c: 15.0,
        });
        assert!(matches!(
            validate_definition(&def),
            Err(ValidationError::Conflict { .. })
        ));

        def.operating.air_density_kg_m3 = None;
        validate_definition(&def).unwrap();
    }

    #[test]
    fn unknown_fuel_lists_the_catalog() {
        let mut def = definition();
        def.fuel.name = "Kerosene".to_string();
        let msg = validate_definition(&def).unwrap_err().to_string();
        assert!(msg.contains("Kerosene"));
        assert!(msg.contains("Gasoline"));
    }
}
