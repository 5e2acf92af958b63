use serde::{Deserialize, Serialize};

use crate::models::{ClassifiedField, LabAnalysis, LabStats, LabStatus, Language, PatientInfo};

use super::{format_bound, HandoffError, SummaryGenerator};

/// Everything the summary generator needs for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub patient: PatientInfo,
    pub language: Language,
    /// One line per classified field, most severe first.
    pub findings: Vec<String>,
    pub stats: LabStats,
    pub critical_flags: Vec<String>,
    /// Set only when no rows were extracted; the generator works from the text.
    pub raw_text: Option<String>,
}

impl SummaryRequest {
    pub fn build(analysis: &LabAnalysis) -> Self {
        let findings = analysis
            .result
            .fields
            .iter()
            .filter_map(finding_line)
            .collect();

        Self {
            patient: analysis.patient.clone(),
            language: analysis.language,
            findings,
            stats: analysis.result.stats,
            critical_flags: analysis.result.critical_flags.clone(),
            raw_text: analysis
                .needs_text_summary
                .then(|| analysis.raw_text.clone()),
        }
    }

    /// Findings block for a prompt, or the raw text when nothing was tabulated.
    pub fn findings_text(&self) -> String {
        match &self.raw_text {
            Some(text) => format!(
                "No structured tables found. \
                 Please analyze the following raw text from the report:\n{text}"
            ),
            None => self.findings.join("\n"),
        }
    }
}

/// "- Hemoglobin: 10.5 g/dL [LOW] (normal: 13.0–17.0 g/dL)". None for UNKNOWN.
pub fn finding_line(field: &ClassifiedField) -> Option<String> {
    if field.status == LabStatus::Unknown {
        return None;
    }
    let benchmark = field.benchmark.as_ref()?;
    let raw = &field.field.raw;
    Some(format!(
        "- {}: {} {} [{}] (normal: {}–{} {})",
        raw.name,
        raw.value,
        raw.unit,
        field.status,
        format_bound(benchmark.min),
        format_bound(benchmark.max),
        benchmark.unit,
    ))
}

/// Build the request in the analysis language and hand it to the generator.
pub fn generate_summary(
    analysis: &LabAnalysis,
    generator: &dyn SummaryGenerator,
) -> Result<String, HandoffError> {
    let request = SummaryRequest::build(analysis);
    tracing::info!(
        report_id = %analysis.report_id,
        language = %request.language,
        findings = request.findings.len(),
        text_fallback = request.raw_text.is_some(),
        "Requesting summary"
    );
    generator.generate(&request)
}
