//! Value classification against a reference range.

use crate::models::{BenchmarkRange, ClassifiedField, LabStatus, NormalizedField};

use super::benchmarks::BenchmarkStore;

/// Below `min * CRITICAL_LOW_FACTOR` is critical.
pub const CRITICAL_LOW_FACTOR: f64 = 0.65;

/// Above `max * CRITICAL_HIGH_FACTOR` is critical.
pub const CRITICAL_HIGH_FACTOR: f64 = 1.6;

pub fn classify_value(value: f64, min: f64, max: f64) -> LabStatus {
    if value < min * CRITICAL_LOW_FACTOR || value > max * CRITICAL_HIGH_FACTOR {
        LabStatus::Critical
    } else if value < min {
        LabStatus::Low
    } else if value > max {
        LabStatus::High
    } else {
        LabStatus::Normal
    }
}

/// Percent distance outside the range, one decimal. Zero inside the range.
/// A zero bound yields zero rather than dividing by it. Exact ties round to
/// even, so 6.25 becomes 6.2.
pub fn deviation_pct(value: f64, min: f64, max: f64) -> f64 {
    let pct = if value < min && min != 0.0 {
        (min - value) / min * 100.0
    } else if value > max && max != 0.0 {
        (value - max) / max * 100.0
    } else {
        0.0
    };
    format!("{pct:.1}").parse().unwrap_or(pct)
}

/// Status and deviation for a value, or `(Unknown, None)` without both inputs.
pub fn classify(
    value: Option<f64>,
    benchmark: Option<&BenchmarkRange>,
) -> (LabStatus, Option<f64>) {
    match (value, benchmark) {
        (Some(v), Some(b)) => (
            classify_value(v, b.min, b.max),
            Some(deviation_pct(v, b.min, b.max)),
        ),
        _ => (LabStatus::Unknown, None),
    }
}

/// Resolve the top benchmark for a field and classify its value.
pub fn classify_field(field: NormalizedField, store: &BenchmarkStore) -> ClassifiedField {
    let benchmark = store.best_match(field.name()).map(|m| m.range);
    let (status, deviation_pct) = classify(field.numeric_value, benchmark.as_ref());

    if benchmark.is_none() {
        tracing::debug!(test = %field.name(), "No benchmark found");
    }

    ClassifiedField::new(field, status, benchmark, deviation_pct)
}
