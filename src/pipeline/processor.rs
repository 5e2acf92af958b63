//! Lab report processing orchestrator.
//!
//! Drives one document through the pipeline:
//! extract → normalize → classify → aggregate.
//!
//! Per-row problems never fail the batch: unresolved names and non-numeric
//! values come out as UNKNOWN. Only unreadable input is an error.

use std::path::Path;

use uuid::Uuid;

use crate::intelligence::{aggregate, classify_field, BenchmarkStore};
use crate::models::{
    ClassifiedField, LabAnalysis, Language, NormalizedField, PipelineResult, RawField,
};
use crate::pipeline::extraction::{Document, ReportExtractor};
use crate::pipeline::normalize::normalize;
use crate::pipeline::LabError;

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

pub struct LabReportProcessor<'a> {
    extractor: ReportExtractor,
    store: &'a BenchmarkStore,
    language: Language,
}

impl Default for LabReportProcessor<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl LabReportProcessor<'static> {
    /// Processor backed by the built-in benchmark corpus.
    pub fn new() -> Self {
        Self::with_store(BenchmarkStore::global())
    }
}

impl<'a> LabReportProcessor<'a> {
    pub fn with_store(store: &'a BenchmarkStore) -> Self {
        Self {
            extractor: ReportExtractor::default(),
            store,
            language: Language::default(),
        }
    }

    /// Language stamped on every analysis this processor produces.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Classify already-normalized fields, in input order.
    pub fn classify_fields(&self, fields: &[NormalizedField]) -> Vec<ClassifiedField> {
        fields
            .iter()
            .cloned()
            .map(|f| classify_field(f, self.store))
            .collect()
    }

    /// Normalize, classify and aggregate rows obtained elsewhere.
    pub fn analyze_fields(&self, fields: Vec<RawField>) -> PipelineResult {
        let normalized = normalize(fields);
        aggregate(self.classify_fields(&normalized))
    }

    /// Run the full pipeline over a decoded document.
    pub fn process(&self, document: &Document) -> LabAnalysis {
        let report_id = Uuid::new_v4();
        let extracted = self.extractor.extract(document);
        let method = extracted.method;

        let result = self.analyze_fields(extracted.fields);
        let needs_text_summary = result.is_empty();

        if needs_text_summary {
            tracing::warn!(
                report_id = %report_id,
                method = %method,
                "No lab values extracted, text summary required"
            );
        }

        tracing::info!(
            report_id = %report_id,
            total = result.stats.total,
            abnormal = result.stats.abnormal,
            critical = result.stats.critical,
            "Lab report analyzed"
        );

        LabAnalysis {
            report_id,
            patient: extracted.patient,
            result,
            extraction_method: method,
            page_count: extracted.page_count,
            raw_text: extracted.raw_text,
            needs_text_summary,
            language: self.language,
            analyzed_at: chrono::Local::now().naive_local(),
        }
    }

    /// Read a UTF-8 text export (pages separated by form feeds) and process it.
    pub fn process_file(&self, path: &Path) -> Result<LabAnalysis, LabError> {
        if !path.exists() {
            return Err(LabError::InputNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| LabError::Encoding(format!("{}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), "Processing lab report");
        Ok(self.process(&Document::from_text(&text)))
    }
}
