use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ExtractionMethod, LabStatus, Language};
use super::lab::ClassifiedField;

/// Placeholder for header fields that could not be found.
pub const UNKNOWN: &str = "Unknown";

/// Subject and lab identity read from the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub date: String,
    pub lab_name: String,
}

impl Default for PatientInfo {
    fn default() -> Self {
        Self {
            name: UNKNOWN.into(),
            age: UNKNOWN.into(),
            gender: UNKNOWN.into(),
            date: UNKNOWN.into(),
            lab_name: UNKNOWN.into(),
        }
    }
}

impl PatientInfo {
    /// Parse the report date (day-first, as printed by the labs we see).
    pub fn collection_date(&self) -> Option<NaiveDate> {
        const LONG_YEAR: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
        const SHORT_YEAR: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];

        // %Y also accepts two digits, so pick the family from the year width.
        let year_digits = self.date.rsplit(['/', '-', '.']).next().map_or(0, str::len);
        let formats = if year_digits == 2 { SHORT_YEAR } else { LONG_YEAR };
        formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&self.date, fmt).ok())
    }

    pub fn age_years(&self) -> Option<u32> {
        self.age.parse().ok()
    }
}

/// Counts per status over one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabStats {
    pub total: usize,
    pub normal: usize,
    pub abnormal: usize,
    pub critical: usize,
}

/// Severity-ordered classification output for one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub fields: Vec<ClassifiedField>,
    pub stats: LabStats,
    pub critical_flags: Vec<String>,
}

impl PipelineResult {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn with_status(&self, status: LabStatus) -> impl Iterator<Item = &ClassifiedField> {
        self.fields.iter().filter(move |f| f.status == status)
    }

    pub fn has_critical(&self) -> bool {
        !self.critical_flags.is_empty()
    }
}

/// Everything the pipeline produced for a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabAnalysis {
    pub report_id: Uuid,
    pub patient: PatientInfo,
    pub result: PipelineResult,
    pub extraction_method: ExtractionMethod,
    pub page_count: usize,
    pub raw_text: String,
    /// No rows could be extracted; summarize from `raw_text` instead.
    pub needs_text_summary: bool,
    /// Language for the summary, explanations and audio.
    #[serde(default)]
    pub language: Language,
    pub analyzed_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_with_date(date: &str) -> PatientInfo {
        PatientInfo {
            date: date.into(),
            ..PatientInfo::default()
        }
    }

    #[test]
    fn defaults_are_unknown() {
        let info = PatientInfo::default();
        assert_eq!(info.name, "Unknown");
        assert_eq!(info.age, "Unknown");
        assert_eq!(info.gender, "Unknown");
        assert_eq!(info.date, "Unknown");
        assert_eq!(info.lab_name, "Unknown");
        assert!(info.collection_date().is_none());
        assert!(info.age_years().is_none());
    }

    #[test]
    fn collection_date_accepts_common_separators() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        assert_eq!(info_with_date("27/02/2026").collection_date(), Some(expected));
        assert_eq!(info_with_date("27-02-2026").collection_date(), Some(expected));
        assert_eq!(info_with_date("27.02.2026").collection_date(), Some(expected));
        assert_eq!(info_with_date("27/02/26").collection_date(), Some(expected));
    }

    #[test]
    fn collection_date_rejects_impossible_dates() {
        assert!(info_with_date("31/02/2026").collection_date().is_none());
        assert!(info_with_date("13/13/2026").collection_date().is_none());
    }

    #[test]
    fn age_parses_integer() {
        let info = PatientInfo {
            age: "45".into(),
            ..PatientInfo::default()
        };
        assert_eq!(info.age_years(), Some(45));
    }
}
