//! Map table text format.
//!
//! Comma-separated with a header row. The header must name `RPM`, `VE` and
//! `BSFC_g_kWh` (case-insensitive, any order); other columns are ignored.
//! Blank lines and lines starting with `#` are skipped.

use crate::error::{MapError, MapResult};

pub const RPM_COLUMN: &str = "RPM";
pub const VE_COLUMN: &str = "VE";
pub const BSFC_COLUMN: &str = "BSFC_g_kWh";

/// One sample of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRow {
    /// Engine speed (rev/min)
    pub rpm: f64,
    /// Volumetric efficiency (percent)
    pub ve_percent: f64,
    /// Brake specific fuel consumption (g/kWh)
    pub bsfc_g_per_kwh: f64,
}

struct ColumnIndex {
    rpm: usize,
    ve: usize,
    bsfc: usize,
}

impl ColumnIndex {
    fn from_header(header: &str) -> MapResult<Self> {
        let names: Vec<&str> = header
            .trim_start_matches('\u{feff}')
            .split(',')
            .map(str::trim)
            .collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| name.eq_ignore_ascii_case(column))
                .ok_or(MapError::MissingColumn { column })
        };

        Ok(Self {
            rpm: find(RPM_COLUMN)?,
            ve: find(VE_COLUMN)?,
            bsfc: find(BSFC_COLUMN)?,
        })
    }
}

/// Parse map text into rows sorted by RPM.
///
/// Does not check row count or RPM uniqueness; see
/// [`crate::MapDataSource::from_rows`] for dataset-level checks.
pub fn parse_map_table(text: &str) -> MapResult<Vec<MapRow>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let Some((_, header)) = lines.next() else {
        return Err(MapError::TooFewRows { min: 2, found: 0 });
    };
    let columns = ColumnIndex::from_header(header)?;

    let mut rows = Vec::new();
    for (line_no, line) in lines {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        let cell = |index: usize, column: &'static str| -> MapResult<f64> {
            let raw = cells.get(index).copied().unwrap_or("");
            raw.parse::<f64>().map_err(|_| MapError::Parse {
                line: line_no,
                column,
                value: raw.to_string(),
            })
        };

        rows.push(MapRow {
            rpm: cell(columns.rpm, RPM_COLUMN)?,
            ve_percent: cell(columns.ve, VE_COLUMN)?,
            bsfc_g_per_kwh: cell(columns.bsfc, BSFC_COLUMN)?,
        });
    }

    rows.sort_by(|a, b| a.rpm.total_cmp(&b.rpm));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_any_column_order() {
        let text = "\
# dyno run 2024-03
BSFC_g_kWh, RPM, VE, AFR
300, 3000, 92.5, 13.1

280, 1000, 81.0, 14.0
";
        let rows = parse_map_table(text).unwrap();
        assert_eq!(rows.len(), 2);
        // sorted by rpm
        assert_eq!(rows[0].rpm, 1000.0);
        assert_eq!(rows[0].ve_percent, 81.0);
        assert_eq!(rows[0].bsfc_g_per_kwh, 280.0);
        assert_eq!(rows[1].rpm, 3000.0);
    }

    #[test]
    fn header_is_case_insensitive() {
        let rows = parse_map_table("rpm,ve,bsfc_g_kwh\n1000,80,260\n").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = parse_map_table("RPM,VE\n1000,80\n").unwrap_err();
        assert!(matches!(err, MapError::MissingColumn { column: "BSFC_g_kWh" }));
    }

    #[test]
    fn bad_cell_reports_line_and_column() {
        let err = parse_map_table("RPM,VE,BSFC_g_kWh\n1000,80,260\n2000,eighty,250\n").unwrap_err();
        match err {
            MapError::Parse {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "VE");
                assert_eq!(value, "eighty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_a_parse_error() {
        assert!(parse_map_table("RPM,VE,BSFC_g_kWh\n1000,80\n").is_err());
    }

    #[test]
    fn empty_text_has_no_header() {
        assert!(matches!(
            parse_map_table("\n# nothing\n"),
            Err(MapError::TooFewRows { found: 0, .. })
        ));
    }
}
