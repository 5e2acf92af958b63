use serde::{Deserialize, Serialize};

use super::enums::{GenderScope, LabStatus};

/// One extracted report row, exactly as read from the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub reference_text: String,
    pub status_text: String,
}

impl RawField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Number of non-empty attributes, used to pick between duplicate rows.
    pub fn completeness(&self) -> usize {
        [
            &self.name,
            &self.value,
            &self.unit,
            &self.reference_text,
            &self.status_text,
        ]
        .iter()
        .filter(|v| !v.is_empty())
        .count()
    }
}

/// A cleaned, deduplicated row with its value coerced to a number when possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedField {
    #[serde(flatten)]
    pub raw: RawField,
    pub numeric_value: Option<f64>,
}

impl NormalizedField {
    pub fn name(&self) -> &str {
        &self.raw.name
    }
}

/// Clinical reference interval for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRange {
    pub test_name: String,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    #[serde(default = "default_gender_scope")]
    pub gender_scope: GenderScope,
    #[serde(default)]
    pub description: String,
}

fn default_gender_scope() -> GenderScope {
    GenderScope::All
}

/// A normalized field plus its classification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedField {
    #[serde(flatten)]
    pub field: NormalizedField,
    pub status: LabStatus,
    pub severity_rank: u8,
    pub risk_icon: String,
    pub risk_color: String,
    pub benchmark: Option<BenchmarkRange>,
    pub deviation_pct: Option<f64>,
}

impl ClassifiedField {
    /// Rank and display metadata are derived from the status.
    pub fn new(
        field: NormalizedField,
        status: LabStatus,
        benchmark: Option<BenchmarkRange>,
        deviation_pct: Option<f64>,
    ) -> Self {
        Self {
            field,
            status,
            severity_rank: status.severity_rank(),
            risk_icon: status.icon().to_string(),
            risk_color: status.color().to_string(),
            benchmark,
            deviation_pct,
        }
    }

    pub fn name(&self) -> &str {
        self.field.name()
    }
}
