//! Loosely-aligned table scan for reports without rule graphics.
//!
//! Such reports lay results out as whitespace-aligned columns:
//! "Hemoglobin     13.5    g/dL    13.0-17.0". A line is tabular when it
//! splits into at least three cells on gaps of two or more spaces, and
//! consecutive tabular lines form one table.

use crate::models::ExtractionMethod;

use super::types::{Page, Table, TableScanner};

/// Minimum run of spaces separating two cells.
const MIN_GAP: usize = 2;

/// Minimum number of cells for a line to count as a table row.
const MIN_CELLS: usize = 3;

/// Minimum number of consecutive tabular lines.
const MIN_TABLE_ROWS: usize = 2;

pub struct AlignedTableScanner;

impl TableScanner for AlignedTableScanner {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::AlignedTable
    }

    fn scan(&self, page: &Page) -> Vec<Table> {
        detect_aligned_tables(&page.text)
    }
}

pub fn detect_aligned_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        let cells = split_on_gaps(line);
        if cells.len() >= MIN_CELLS {
            current.push(cells);
            continue;
        }
        if current.len() >= MIN_TABLE_ROWS {
            tables.push(Table::from_cells(std::mem::take(&mut current)));
        }
        current.clear();
    }
    if current.len() >= MIN_TABLE_ROWS {
        tables.push(Table::from_cells(current));
    }

    tables
}

/// Split a line into cells at runs of MIN_GAP+ spaces. Tabs count as gaps.
fn split_on_gaps(line: &str) -> Vec<String> {
    let normalized = line.replace('\t', "  ");
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut spaces = 0;

    for ch in normalized.trim().chars() {
        if ch == ' ' {
            spaces += 1;
            continue;
        }
        if spaces >= MIN_GAP {
            cells.push(std::mem::take(&mut cell));
        } else if spaces > 0 {
            cell.push(' ');
        }
        spaces = 0;
        cell.push(ch);
    }
    if !cell.is_empty() {
        cells.push(cell);
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_wide_gaps_only() {
        assert_eq!(
            split_on_gaps("Hemoglobin      13.5   g/dL   13.0 - 17.0"),
            vec!["Hemoglobin", "13.5", "g/dL", "13.0 - 17.0"]
        );
        assert_eq!(split_on_gaps("Blood Urea Nitrogen  14"), vec!["Blood Urea Nitrogen", "14"]);
        assert!(split_on_gaps("   ").is_empty());
    }

    #[test]
    fn single_spaces_stay_in_cell() {
        assert_eq!(split_on_gaps("This is a normal sentence."), vec!["This is a normal sentence."]);
    }

    #[test]
    fn aligned_block_detected() {
        let text = "APOLLO DIAGNOSTICS\n\
                    Test Name         Result    Unit      Reference Range\n\
                    Hemoglobin        10.5      g/dL      13.0-17.0\n\
                    Platelet Count    200       10^3/uL   150-400\n\
                    \n\
                    End of report";
        let tables = detect_aligned_tables(text);
        assert_eq!(tables.len(), 1);
        let rows = tables[0].cleaned_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec!["Platelet Count", "200", "10^3/uL", "150-400"]);
    }

    #[test]
    fn two_cell_lines_not_tabular() {
        let text = "Hemoglobin    13.5\nPlatelets    200";
        assert!(detect_aligned_tables(text).is_empty());
    }

    #[test]
    fn lone_tabular_line_ignored() {
        let text = "Intro text\nName    Age    City\nMore prose here.";
        assert!(detect_aligned_tables(text).is_empty());
    }

    #[test]
    fn blocks_split_by_prose() {
        let text = "A    1    x\nB    2    y\nsome prose\nC    3    z\nD    4    w";
        assert_eq!(detect_aligned_tables(text).len(), 2);
    }

    #[test]
    fn french_units_survive() {
        let text = "Créatinine    72     µmol/L\nHémoglobine   14,2   g/dL";
        let rows = detect_aligned_tables(text)[0].cleaned_rows();
        assert_eq!(rows[0][0], "Créatinine");
        assert_eq!(rows[0][2], "µmol/L");
    }
}
