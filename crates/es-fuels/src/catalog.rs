use crate::error::{FuelError, FuelResult};
use es_core::units::constants::J_PER_MJ;

/// Physical properties of a liquid fuel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelSpec {
    /// Lower heating value (MJ/kg)
    pub lhv_mj_per_kg: f64,
    /// Liquid density (kg/L)
    pub density_kg_per_l: f64,
    /// Stoichiometric air-fuel mass ratio
    pub stoich_afr: f64,
}

impl FuelSpec {
    /// Lower heating value in J/kg.
    pub fn lhv_j_per_kg(&self) -> f64 {
        self.lhv_mj_per_kg * J_PER_MJ
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub spec: FuelSpec,
}

impl FuelCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    /// Exact (case-insensitive) match on the id, display name or an alias.
    pub fn is_named(&self, name: &str) -> bool {
        let name = name.trim();
        self.canonical_id.eq_ignore_ascii_case(name)
            || self.display_name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

static FUEL_CATALOG: [FuelCatalogEntry; 3] = [
    FuelCatalogEntry {
        canonical_id: "Gasoline",
        display_name: "Gasoline",
        aliases: &["petrol", "gas"],
        spec: FuelSpec {
            lhv_mj_per_kg: 44.0,
            density_kg_per_l: 0.75,
            stoich_afr: 14.7,
        },
    },
    FuelCatalogEntry {
        canonical_id: "Diesel",
        display_name: "Diesel",
        aliases: &["derv"],
        spec: FuelSpec {
            lhv_mj_per_kg: 42.5,
            density_kg_per_l: 0.85,
            stoich_afr: 14.5,
        },
    },
    FuelCatalogEntry {
        canonical_id: "E85",
        display_name: "E85 Ethanol Blend",
        aliases: &["e-85", "flex fuel"],
        spec: FuelSpec {
            lhv_mj_per_kg: 27.0,
            density_kg_per_l: 0.78,
            stoich_afr: 9.7,
        },
    },
];

pub fn fuel_catalog() -> &'static [FuelCatalogEntry] {
    &FUEL_CATALOG
}

pub fn filter_fuel_catalog(query: &str) -> Vec<FuelCatalogEntry> {
    fuel_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Resolve a fuel by exact name or alias.
///
/// # Errors
/// Returns [`FuelError::UnknownFuel`] when nothing in the catalog carries the name.
pub fn lookup_fuel(name: &str) -> FuelResult<&'static FuelCatalogEntry> {
    fuel_catalog()
        .iter()
        .find(|entry| entry.is_named(name))
        .ok_or_else(|| FuelError::UnknownFuel {
            name: name.to_string(),
        })
}
