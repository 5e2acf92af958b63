//! Header-row detection and column mapping for lab tables.
//!
//! Lab reports label their columns inconsistently ("Investigation",
//! "Observed Value", "Biological Ref. Interval"). Each logical column has a
//! list of aliases; a header cell matches when it contains any of them.

use crate::models::RawField;

use super::filters::{clean_test_name, is_rejected_name};
use super::types::Table;

/// Only the first rows of a table are considered as header candidates.
const HEADER_SCAN_ROWS: usize = 4;

const TEST_ALIASES: &[&str] = &[
    "test",
    "parameter",
    "investigation",
    "test name",
    "description",
    "analyte",
];
const VALUE_ALIASES: &[&str] = &[
    "value",
    "result",
    "observed",
    "your value",
    "observed value",
    "reading",
];
const UNIT_ALIASES: &[&str] = &["unit", "units", "uom"];
const REFERENCE_ALIASES: &[&str] = &[
    "reference",
    "normal",
    "range",
    "ref range",
    "biological ref",
    "normal range",
    "ref interval",
];
const STATUS_ALIASES: &[&str] = &["status", "flag", "remark", "remarks", "interpretation"];

/// Column index for each logical field of a lab table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub test: Option<usize>,
    pub value: Option<usize>,
    pub unit: Option<usize>,
    pub reference: Option<usize>,
    pub status: Option<usize>,
}

impl ColumnMap {
    /// Layout assumed when no header row is recognized.
    pub fn positional() -> Self {
        Self {
            test: Some(0),
            value: Some(1),
            unit: Some(2),
            reference: Some(3),
            status: Some(4),
        }
    }

    /// Map columns from one row of lower-cased cells.
    pub fn from_header(cells: &[String]) -> Self {
        Self {
            test: find_column(cells, TEST_ALIASES),
            value: find_column(cells, VALUE_ALIASES),
            unit: find_column(cells, UNIT_ALIASES),
            reference: find_column(cells, REFERENCE_ALIASES),
            status: find_column(cells, STATUS_ALIASES),
        }
    }

    pub fn is_header(&self) -> bool {
        self.test.is_some() && self.value.is_some()
    }
}

fn find_column(cells: &[String], aliases: &[&str]) -> Option<usize> {
    cells
        .iter()
        .position(|cell| aliases.iter().any(|alias| cell.contains(alias)))
}

/// Locate the header row. Returns the column map and the index of the header
/// row; data rows follow it. Falls back to positional layout with row 0 as header.
pub fn locate_header(rows: &[Vec<String>]) -> (ColumnMap, usize) {
    for (idx, row) in rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let lower: Vec<String> = row.iter().map(|c| c.to_lowercase()).collect();
        let map = ColumnMap::from_header(&lower);
        if map.is_header() {
            return (map, idx);
        }
    }
    (ColumnMap::positional(), 0)
}

/// Turn a table into result rows, skipping the header and non-data rows.
pub fn parse_lab_table(table: &Table) -> Vec<RawField> {
    if table.len() < 2 {
        return vec![];
    }

    let rows = table.cleaned_rows();
    let (map, header_idx) = locate_header(&rows);
    let Some(test_col) = map.test else {
        return vec![];
    };

    let mut results = Vec::new();
    for row in &rows[header_idx + 1..] {
        if row.len() <= test_col {
            continue;
        }

        let raw_name = row[test_col].trim();
        if is_rejected_name(raw_name) {
            continue;
        }
        // "1." alone survives the raw check and cleans down to nothing.
        let name = clean_test_name(raw_name);
        if is_rejected_name(&name) {
            continue;
        }

        let cell = |col: Option<usize>| {
            col.and_then(|c| row.get(c))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        results.push(RawField {
            name,
            value: cell(map.value),
            unit: cell(map.unit),
            reference_text: cell(map.reference),
            status_text: cell(map.status),
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        Table::from_cells(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn lower(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_lowercase()).collect()
    }

    #[test]
    fn maps_standard_header() {
        let map = ColumnMap::from_header(&lower(&[
            "Test Name",
            "Result",
            "Unit",
            "Reference Range",
            "Flag",
        ]));
        assert_eq!(map, ColumnMap::positional());
        assert!(map.is_header());
    }

    #[test]
    fn maps_reordered_aliases() {
        let map = ColumnMap::from_header(&lower(&[
            "Biological Ref. Interval",
            "Investigation",
            "UOM",
            "Observed Value",
        ]));
        assert_eq!(map.test, Some(1));
        assert_eq!(map.value, Some(3));
        assert_eq!(map.unit, Some(2));
        assert_eq!(map.reference, Some(0));
        assert_eq!(map.status, None);
    }

    #[test]
    fn header_found_below_title_rows() {
        let rows = vec![
            vec!["COMPLETE BLOOD COUNT".to_string()],
            vec!["Parameter".to_string(), "Reading".to_string()],
            vec!["Hemoglobin".to_string(), "13.5".to_string()],
        ];
        let (map, idx) = locate_header(&rows);
        assert_eq!(idx, 1);
        assert_eq!(map.test, Some(0));
        assert_eq!(map.value, Some(1));
    }

    #[test]
    fn header_beyond_fourth_row_not_detected() {
        let mut rows: Vec<Vec<String>> = (0..4).map(|i| vec![format!("Title {i}")]).collect();
        rows.push(vec!["Test".into(), "Result".into()]);
        let (map, idx) = locate_header(&rows);
        assert_eq!(idx, 0);
        assert_eq!(map, ColumnMap::positional());
    }

    #[test]
    fn parses_rows_after_header() {
        let t = table(&[
            &["Test", "Result", "Unit", "Reference", "Status"],
            &["1. Hemoglobin", "10.5", "g/dL", "13.0-17.0", "Low"],
            &["Platelets", "200", "10^3/uL", "150-400", ""],
        ]);
        let rows = parse_lab_table(&t);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Hemoglobin");
        assert_eq!(rows[0].value, "10.5");
        assert_eq!(rows[0].unit, "g/dL");
        assert_eq!(rows[0].reference_text, "13.0-17.0");
        assert_eq!(rows[0].status_text, "Low");
        assert_eq!(rows[1].status_text, "");
    }

    #[test]
    fn positional_fallback_skips_first_row() {
        let t = table(&[
            &["Hemoglobin", "13.5", "g/dL"],
            &["TSH", "2.1", "uIU/mL"],
        ]);
        let rows = parse_lab_table(&t);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "TSH");
        assert_eq!(rows[0].unit, "uIU/mL");
        assert_eq!(rows[0].reference_text, "");
    }

    #[test]
    fn skips_rejected_and_short_rows() {
        let t = table(&[
            &["Investigation", "Observed Value"],
            &["", "12"],
            &["-----", ""],
            &["Total", "5"],
            &["Sample Type", "Serum"],
            &["Creatinine", "1.1"],
        ]);
        let rows = parse_lab_table(&t);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Creatinine");
    }

    #[test]
    fn bare_ordinal_rows_rejected() {
        let t = table(&[
            &["Test", "Result"],
            &["Hemoglobin", "13.5"],
            &["1.", "4.2"],
            &["2)", "7.0"],
        ]);
        let rows = parse_lab_table(&t);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Hemoglobin");
    }

    #[test]
    fn missing_cells_read_empty() {
        let t = Table {
            rows: vec![
                vec![Some("Test".into()), Some("Value".into()), Some("Units".into())],
                vec![Some("Uric Acid".into())],
            ],
        };
        let rows = parse_lab_table(&t);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "");
        assert_eq!(rows[0].unit, "");
    }

    #[test]
    fn single_row_table_ignored() {
        let t = table(&[&["Hemoglobin", "13.5"]]);
        assert!(parse_lab_table(&t).is_empty());
    }
}
