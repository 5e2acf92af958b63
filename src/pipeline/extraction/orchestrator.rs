//! Extraction strategy cascade.
//!
//! The primary scanner runs on every page. Secondary scanners only run on a
//! page while nothing has been collected yet. If no scanner produced rows on
//! any page, the line-pattern fallback runs over the concatenated text.

use crate::models::{ExtractionMethod, RawField};

use super::aligned::AlignedTableScanner;
use super::columns::parse_lab_table;
use super::grid::BorderedTableScanner;
use super::header::extract_patient_info;
use super::sanitize::sanitize_page_text;
use super::text_pattern::extract_from_text;
use super::types::{Document, ExtractedReport, Page, TableScanner};

/// Ordered table scanners followed by the text-pattern fallback.
pub struct ReportExtractor {
    scanners: Vec<Box<dyn TableScanner>>,
}

impl Default for ReportExtractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(BorderedTableScanner),
            Box::new(AlignedTableScanner),
        ])
    }
}

impl ReportExtractor {
    pub fn new(scanners: Vec<Box<dyn TableScanner>>) -> Self {
        Self { scanners }
    }

    pub fn extract(&self, document: &Document) -> ExtractedReport {
        let page_count = document.page_count();
        let pages: Vec<Page> = document
            .pages
            .iter()
            .map(|p| Page {
                text: sanitize_page_text(&p.text),
                ruled_tables: p.ruled_tables.clone(),
            })
            .collect();

        let patient = pages
            .first()
            .map(|p| extract_patient_info(&p.text))
            .unwrap_or_default();

        let mut fields: Vec<RawField> = Vec::new();
        let mut method: Option<ExtractionMethod> = None;

        for (idx, page) in pages.iter().enumerate() {
            tracing::debug!(page = idx + 1, total = page_count, "Scanning page");

            for (rank, scanner) in self.scanners.iter().enumerate() {
                if rank > 0 && !fields.is_empty() {
                    break;
                }

                let rows: Vec<RawField> = scanner
                    .scan(page)
                    .iter()
                    .flat_map(parse_lab_table)
                    .collect();
                if rows.is_empty() {
                    continue;
                }

                tracing::debug!(
                    page = idx + 1,
                    method = %scanner.method(),
                    rows = rows.len(),
                    "Table rows extracted"
                );
                method.get_or_insert(scanner.method());
                fields.extend(rows);
            }
        }

        let raw_text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        if fields.is_empty() {
            tracing::warn!("No tables detected, using text pattern fallback");
            fields = extract_from_text(&raw_text);
            if !fields.is_empty() {
                method = Some(ExtractionMethod::TextPattern);
            }
        }

        let method = method.unwrap_or(ExtractionMethod::Empty);
        tracing::info!(
            pages = page_count,
            rows = fields.len(),
            method = %method,
            "Extraction complete"
        );

        ExtractedReport {
            fields,
            patient,
            method,
            raw_text,
            page_count,
        }
    }
}
