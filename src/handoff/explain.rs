use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ClassifiedField, LabAnalysis, LabStatus, Language};

use super::{format_bound, SummaryGenerator};

/// Generator input for explaining one critical value to the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationRequest {
    pub test: String,
    pub value: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub benchmark_unit: String,
    pub language: Language,
}

impl ExplanationRequest {
    /// None when the field has no resolved benchmark.
    pub fn for_field(field: &ClassifiedField, language: Language) -> Option<Self> {
        let benchmark = field.benchmark.as_ref()?;
        let raw = &field.field.raw;
        Some(Self {
            test: raw.name.clone(),
            value: raw.value.clone(),
            unit: raw.unit.clone(),
            min: benchmark.min,
            max: benchmark.max,
            benchmark_unit: benchmark.unit.clone(),
            language,
        })
    }

    pub fn prompt(&self) -> String {
        format!(
            "The patient's {} is {} {}. Normal range is {}–{} {}. \
             In 1-2 simple sentences, explain what this means for the patient \
             and why it's urgent.",
            self.test,
            self.value,
            self.unit,
            format_bound(self.min),
            format_bound(self.max),
            self.benchmark_unit,
        )
    }
}

/// Explanation per critical test, keyed by test name. A failed generation
/// falls back to the benchmark description.
pub fn explain_critical(
    analysis: &LabAnalysis,
    generator: &dyn SummaryGenerator,
) -> BTreeMap<String, String> {
    let mut explanations = BTreeMap::new();

    for field in analysis.result.with_status(LabStatus::Critical) {
        let Some(request) = ExplanationRequest::for_field(field, analysis.language) else {
            continue;
        };

        let text = match generator.explain(&request) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!(
                    test = %request.test,
                    error = %e,
                    "Explanation failed, using description"
                );
                field
                    .benchmark
                    .as_ref()
                    .map(|b| b.description.clone())
                    .unwrap_or_default()
            }
        };
        explanations.insert(request.test, text);
    }

    tracing::debug!(
        report_id = %analysis.report_id,
        explained = explanations.len(),
        "Critical values explained"
    );
    explanations
}
