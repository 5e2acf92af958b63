use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{LabAnalysis, LabStatus};

use super::{format_bound, AlertNotifier, HandoffError};

/// Notification for a report with at least one CRITICAL value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalAlert {
    pub id: Uuid,
    pub report_id: Uuid,
    pub patient_name: String,
    pub flags: Vec<String>,
    pub message: String,
    pub detected_at: NaiveDateTime,
}

/// Build the alert for an analysis. None when nothing is critical.
pub fn build_critical_alert(analysis: &LabAnalysis) -> Option<CriticalAlert> {
    if !analysis.result.has_critical() {
        return None;
    }

    let detected_at = chrono::Local::now().naive_local();
    let values: Vec<String> = analysis
        .result
        .with_status(LabStatus::Critical)
        .map(|f| {
            let raw = &f.field.raw;
            match &f.benchmark {
                Some(b) => format!(
                    "- {}: {} {} (normal: {}–{} {})",
                    raw.name,
                    raw.value,
                    raw.unit,
                    format_bound(b.min),
                    format_bound(b.max),
                    b.unit
                ),
                None => format!("- {}: {} {}", raw.name, raw.value, raw.unit),
            }
        })
        .collect();

    let patient = &analysis.patient;
    let message = format!(
        "🚨 CRITICAL LAB ALERT 🚨\n\n\
         Patient: {}\n\
         Age/Gender: {}/{}\n\
         Lab: {}\n\
         Time: {}\n\n\
         Critical values:\n{}\n\n\
         ⚠️ Immediate attention required.",
        patient.name,
        patient.age,
        patient.gender,
        patient.lab_name,
        detected_at.format("%d/%m/%Y %H:%M"),
        values.join("\n"),
    );

    Some(CriticalAlert {
        id: Uuid::new_v4(),
        report_id: analysis.report_id,
        patient_name: patient.name.clone(),
        flags: analysis.result.critical_flags.clone(),
        message,
        detected_at,
    })
}

/// Notify only when the report has critical values. Returns whether a
/// notification was sent.
pub fn dispatch_critical_alert(
    analysis: &LabAnalysis,
    notifier: &dyn AlertNotifier,
) -> Result<bool, HandoffError> {
    let Some(alert) = build_critical_alert(analysis) else {
        tracing::debug!(report_id = %analysis.report_id, "No critical values, alert skipped");
        return Ok(false);
    };

    match notifier.notify(&alert) {
        Ok(()) => {
            tracing::info!(
                report_id = %analysis.report_id,
                alert_id = %alert.id,
                flags = alert.flags.len(),
                "Critical alert sent"
            );
            Ok(true)
        }
        Err(e) => {
            tracing::error!(report_id = %analysis.report_id, error = %e, "Critical alert failed");
            Err(e)
        }
    }
}
