//! Bordered-table scan.
//!
//! Uses the grids the decoder recovered from rule graphics, plus explicit
//! grids in the text layer: pipe/box-drawing delimited rows or tab-separated
//! rows. Rule lines between rows are borders and do not end a table.

use crate::models::ExtractionMethod;

use super::types::{Page, Table, TableScanner};

/// Minimum number of delimited lines that form a table.
const MIN_TABLE_ROWS: usize = 2;

const CELL_DELIMITERS: &[char] = &['|', '│', '┃'];

/// Characters that make up a horizontal rule line.
const RULE_CHARS: &[char] = &['-', '=', '─', '━', '═'];

const BOX_JUNCTIONS: &[char] = &['┼', '├', '┤', '┌', '┐', '└', '┘', '┬', '┴', '╋', '╬'];

pub struct BorderedTableScanner;

impl TableScanner for BorderedTableScanner {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::BorderedTable
    }

    fn scan(&self, page: &Page) -> Vec<Table> {
        let mut tables: Vec<Table> = page
            .ruled_tables
            .iter()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();
        tables.extend(detect_text_grids(&page.text));
        tables
    }
}

enum GridLine {
    Row(Vec<String>),
    Border,
    Other,
}

/// Find runs of delimited lines in page text.
pub fn detect_text_grids(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        match classify_line(line) {
            GridLine::Row(cells) => current.push(cells),
            GridLine::Border => {}
            GridLine::Other => flush(&mut current, &mut tables),
        }
    }
    flush(&mut current, &mut tables);

    tables
}

fn flush(current: &mut Vec<Vec<String>>, tables: &mut Vec<Table>) {
    if current.len() >= MIN_TABLE_ROWS {
        tables.push(Table::from_cells(std::mem::take(current)));
    } else {
        current.clear();
    }
}

fn classify_line(line: &str) -> GridLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return GridLine::Other;
    }
    if is_rule_line(trimmed) {
        return GridLine::Border;
    }

    let delimiters = trimmed.chars().filter(|c| CELL_DELIMITERS.contains(c)).count();
    if delimiters >= 2 {
        return GridLine::Row(split_delimited(trimmed));
    }

    if line.matches('\t').count() >= 2 {
        return GridLine::Row(line.split('\t').map(|c| c.trim().to_string()).collect());
    }

    GridLine::Other
}

/// "+----+", "|----|:---:|", "├──┼──┤" and similar.
fn is_rule_line(trimmed: &str) -> bool {
    trimmed.chars().any(|c| RULE_CHARS.contains(&c))
        && trimmed.chars().all(|c| {
            RULE_CHARS.contains(&c)
                || CELL_DELIMITERS.contains(&c)
                || matches!(c, '+' | ':' | ' ')
                || BOX_JUNCTIONS.contains(&c)
        })
}

fn split_delimited(trimmed: &str) -> Vec<String> {
    let mut cells: Vec<String> = trimmed
        .split(CELL_DELIMITERS)
        .map(|c| c.trim().to_string())
        .collect();

    // Outer borders leave empty cells at both ends.
    if trimmed.starts_with(CELL_DELIMITERS) && cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if trimmed.ends_with(CELL_DELIMITERS) && cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}
