//! Record normalization: name cleanup, deduplication and numeric coercion.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{NormalizedField, RawField};
use crate::pipeline::extraction::filters::clean_test_name;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("valid regex"));

/// Parse the first number in a value cell. Thousands separators are ignored.
/// Returns `None` when the cell holds no digit ("N/A", "Negative", "").
pub fn parse_numeric(value: &str) -> Option<f64> {
    let stripped = value.replace(',', "");
    let m = FIRST_NUMBER.find(&stripped)?;
    m.as_str().trim_end_matches('.').parse().ok()
}

/// Collapse rows sharing a name (case-insensitive). The most complete row wins;
/// on a tie the first one is kept. Output keeps first-appearance order.
pub fn deduplicate(fields: Vec<RawField>) -> Vec<RawField> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<RawField> = Vec::with_capacity(fields.len());

    for field in fields {
        let key = field.name.trim().to_lowercase();
        match slots.get(&key) {
            Some(&idx) => {
                if field.completeness() > kept[idx].completeness() {
                    kept[idx] = field;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(field);
            }
        }
    }

    kept
}

pub fn normalize(fields: Vec<RawField>) -> Vec<NormalizedField> {
    let input = fields.len();
    let cleaned = fields
        .into_iter()
        .filter_map(|mut f| {
            f.name = clean_test_name(&f.name);
            (!f.name.is_empty()).then_some(f)
        })
        .collect();

    let normalized: Vec<NormalizedField> = deduplicate(cleaned)
        .into_iter()
        .map(|raw| NormalizedField {
            numeric_value: parse_numeric(&raw.value),
            raw,
        })
        .collect();

    tracing::debug!(input, output = normalized.len(), "Fields normalized");
    normalized
}
