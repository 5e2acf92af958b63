//! Short spoken messages for abnormal findings.
//! English states the value and the range. Hindi and Telugu give the
//! direction and ask the patient to see a doctor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::{ClassifiedField, LabAnalysis, LabStatus, Language};

use super::{format_bound, AudioRenderer, HandoffError};

pub struct FindingMessages;

impl FindingMessages {
    pub fn english(
        test: &str,
        status: LabStatus,
        value: &str,
        unit: &str,
        min: f64,
        max: f64,
    ) -> String {
        format!(
            "{} is {}. Your value is {} {}, normal range is {} to {}.",
            test,
            status,
            value,
            unit,
            format_bound(min),
            format_bound(max),
        )
    }

    pub fn hindi(test: &str, direction: &str) -> String {
        format!("{test} का स्तर {direction} है। कृपया डॉक्टर से मिलें।")
    }

    pub fn telugu(test: &str, direction: &str) -> String {
        format!("{test} స్థాయి {direction}గా ఉంది. దయచేసి వైద్యుడిని సంప్రదించండి.")
    }
}

/// "high" for HIGH and CRITICAL, "low" otherwise.
fn direction(status: LabStatus) -> &'static str {
    match status {
        LabStatus::High | LabStatus::Critical => "high",
        _ => "low",
    }
}

/// Message for one field, or None when it is NORMAL or UNKNOWN.
pub fn finding_message(field: &ClassifiedField, language: Language) -> Option<String> {
    if !matches!(field.status, LabStatus::Low | LabStatus::High | LabStatus::Critical) {
        return None;
    }
    let name = field.name();
    let message = match language {
        Language::Hindi => FindingMessages::hindi(name, direction(field.status)),
        Language::Telugu => FindingMessages::telugu(name, direction(field.status)),
        Language::English => {
            let benchmark = field.benchmark.as_ref()?;
            FindingMessages::english(
                name,
                field.status,
                &field.field.raw.value,
                &field.field.raw.unit,
                benchmark.min,
                benchmark.max,
            )
        }
    };
    Some(message)
}

/// A rendered clip for one abnormal finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingAudio {
    pub test: String,
    pub status: LabStatus,
    pub message: String,
    pub audio_path: PathBuf,
}

/// Render one clip per abnormal finding in the analysis language, in
/// severity order.
pub fn render_finding_audio(
    analysis: &LabAnalysis,
    renderer: &dyn AudioRenderer,
) -> Result<Vec<FindingAudio>, HandoffError> {
    let language = analysis.language;
    let mut clips = Vec::new();
    for field in &analysis.result.fields {
        let Some(message) = finding_message(field, language) else {
            continue;
        };
        let audio_path = renderer.render(&message, language)?;
        clips.push(FindingAudio {
            test: field.name().to_string(),
            status: field.status,
            message,
            audio_path,
        });
    }

    tracing::info!(
        report_id = %analysis.report_id,
        language = language.code(),
        clips = clips.len(),
        "Finding audio rendered"
    );
    Ok(clips)
}
