//! Interfaces to the external collaborators that consume an analysis.
//! A text generator writes the patient summary and critical explanations,
//! a speech renderer voices findings, and a notifier carries critical alerts.
//! Only the request shapes live here.

pub mod alert;
pub mod explain;
pub mod messages;
pub mod summary;

pub use alert::*;
pub use explain::*;
pub use messages::*;
pub use summary::*;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Language;

#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("Summary generation failed: {0}")]
    Summary(String),

    #[error("Audio rendering failed: {0}")]
    Audio(String),

    #[error("Alert delivery failed: {0}")]
    Notify(String),
}

/// Produces plain-language text for a report.
pub trait SummaryGenerator: Send + Sync {
    fn generate(&self, request: &SummaryRequest) -> Result<String, HandoffError>;

    /// One or two sentences on a single critical value.
    fn explain(&self, request: &ExplanationRequest) -> Result<String, HandoffError>;
}

/// Renders text to speech. Returns where the audio was written.
pub trait AudioRenderer: Send + Sync {
    fn render(&self, text: &str, language: Language) -> Result<PathBuf, HandoffError>;
}

/// Delivers a critical-result alert to the care team.
pub trait AlertNotifier: Send + Sync {
    fn notify(&self, alert: &CriticalAlert) -> Result<(), HandoffError>;
}

/// Format a range bound with at least one decimal ("13.0", "0.4", "150.0").
pub(crate) fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
