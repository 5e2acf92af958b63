use serde::{Deserialize, Serialize};

use crate::models::{ExtractionMethod, PatientInfo, RawField};

/// Page separator used by plain-text exports of multi-page reports.
pub const PAGE_BREAK: char = '\u{0c}';

/// Decoded content of a lab report, one entry per page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    /// Build a document from plain text, splitting pages on form feeds.
    pub fn from_text(text: &str) -> Self {
        Self {
            pages: text.split(PAGE_BREAK).map(Page::from_text).collect(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// One page: its text layer plus any grids the decoder recovered from rule lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub text: String,
    #[serde(default)]
    pub ruled_tables: Vec<Table>,
}

impl Page {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ruled_tables: vec![],
        }
    }
}

/// Cell matrix. `None` marks a cell the decoder saw as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build a table from already-split text cells; empty cells become `None`.
    pub fn from_cells(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| if cell.is_empty() { None } else { Some(cell) })
                        .collect()
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with `None` replaced by "" and every cell trimmed.
    pub fn cleaned_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_deref().map(str::trim).unwrap_or("").to_string())
                    .collect()
            })
            .collect()
    }
}

/// Output of the document extractor, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedReport {
    pub fields: Vec<RawField>,
    pub patient: PatientInfo,
    pub method: ExtractionMethod,
    pub raw_text: String,
    pub page_count: usize,
}

/// A table-detection strategy. Returns the tables found on a page, possibly none.
pub trait TableScanner: Send + Sync {
    fn method(&self) -> ExtractionMethod;

    fn scan(&self, page: &Page) -> Vec<Table>;
}
