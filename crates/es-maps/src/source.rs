//! Map data source: two interpolants over engine speed.

use std::path::Path;

use crate::error::{MapError, MapResult};
use crate::spline::CubicSpline;
use crate::table::{BSFC_COLUMN, MapRow, VE_COLUMN, parse_map_table};
use tracing::{debug, warn};

/// Tabulated VE and BSFC curves over RPM.
///
/// Immutable once built; evaluating it has no side effects, so one source can
/// be shared across threads computing different operating points.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDataSource {
    rows: Vec<MapRow>,
    ve_percent: CubicSpline,
    bsfc_g_per_kwh: CubicSpline,
}

impl MapDataSource {
    /// Conventional location of a map file, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "maps/ve_bsfc.csv";

    /// Load a map, falling back to `None` on any problem.
    ///
    /// A missing file is the normal "no map" case and is logged at debug level;
    /// any other rejection is logged as a warning.
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(map) => {
                let (lo, hi) = map.rpm_range();
                debug!(
                    path = %path.display(),
                    rows = map.rows.len(),
                    rpm_min = lo,
                    rpm_max = hi,
                    "loaded VE/BSFC map"
                );
                Some(map)
            }
            Err(MapError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "no map file, using analytical curves");
                None
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "map file rejected, using analytical curves"
                );
                None
            }
        }
    }

    /// Load the map at [`Self::DEFAULT_PATH`] if there is one.
    pub fn load_default() -> Option<Self> {
        Self::load(Self::DEFAULT_PATH)
    }

    /// Load a map, reporting why it was rejected.
    pub fn try_load(path: impl AsRef<Path>) -> MapResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text)
    }

    /// Build from map text (see [`crate::table`] for the format).
    pub fn from_text(text: &str) -> MapResult<Self> {
        Self::from_rows(parse_map_table(text)?)
    }

    /// Build from samples. Rows are sorted by RPM before fitting.
    ///
    /// # Errors
    /// Fewer than two rows, repeated RPM values, a negative or non-finite VE,
    /// or a non-positive BSFC reject the dataset.
    pub fn from_rows(mut rows: Vec<MapRow>) -> MapResult<Self> {
        if rows.len() < 2 {
            return Err(MapError::TooFewRows {
                min: 2,
                found: rows.len(),
            });
        }
        for row in &rows {
            if !row.rpm.is_finite() {
                return Err(MapError::NonPhysical {
                    column: crate::table::RPM_COLUMN,
                    value: row.rpm,
                });
            }
            if !row.ve_percent.is_finite() || row.ve_percent < 0.0 {
                return Err(MapError::NonPhysical {
                    column: VE_COLUMN,
                    value: row.ve_percent,
                });
            }
            if !row.bsfc_g_per_kwh.is_finite() || row.bsfc_g_per_kwh <= 0.0 {
                return Err(MapError::NonPhysical {
                    column: BSFC_COLUMN,
                    value: row.bsfc_g_per_kwh,
                });
            }
        }
        rows.sort_by(|a, b| a.rpm.total_cmp(&b.rpm));

        let rpms: Vec<f64> = rows.iter().map(|r| r.rpm).collect();
        let ve_percent = CubicSpline::natural(
            rpms.clone(),
            rows.iter().map(|r| r.ve_percent).collect(),
        )?;
        let bsfc_g_per_kwh =
            CubicSpline::natural(rpms, rows.iter().map(|r| r.bsfc_g_per_kwh).collect())?;

        Ok(Self {
            rows,
            ve_percent,
            bsfc_g_per_kwh,
        })
    }

    /// Volumetric efficiency as a fraction at `rpm`.
    pub fn volumetric_efficiency(&self, rpm: f64) -> f64 {
        self.ve_percent.eval(rpm) / 100.0
    }

    /// Brake specific fuel consumption (g/kWh) at `rpm`.
    pub fn bsfc_g_per_kwh(&self, rpm: f64) -> f64 {
        self.bsfc_g_per_kwh.eval(rpm)
    }

    /// Lowest and highest sampled RPM.
    pub fn rpm_range(&self) -> (f64, f64) {
        self.ve_percent.domain()
    }

    pub fn rows(&self) -> &[MapRow] {
        &self.rows
    }
}
