//! Line-pattern fallback for reports where no table could be detected.
//!
//! Handles lines such as:
//!   Hemoglobin        13.5    g/dL    13.0-17.0
//!   SGPT/ALT  :  42  U/L  (0-40)

use std::sync::LazyLock;

use regex::Regex;

use crate::models::RawField;

use super::filters::{clean_test_name, has_non_data_prefix, is_rejected_name};

/// Name, 2+ spaces, number, optional unit, optional "min-max" range.
static SPACED_COLUMNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z][A-Za-z\s()/\-.]{2,45}?)\s{2,}([0-9]+\.?[0-9]*)\s*([a-zA-Z/%µgLUd]{1,12})?\s*([0-9]+\.?[0-9]*\s*[-–]\s*[0-9]+\.?[0-9]*)?",
    )
    .expect("valid regex")
});

/// Name, ":" or "-", number, optional unit.
static COLON_SEPARATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z][A-Za-z\s()/\-.]{2,40})\s*[:\-]\s*([0-9]+\.?[0-9]*)\s*([a-zA-Z/%µgLUd]{1,12})?",
    )
    .expect("valid regex")
});

const MIN_LINE_CHARS: usize = 5;
const MIN_NAME_CHARS: usize = 3;

/// Extract result rows line by line. First matching pattern wins per line.
pub fn extract_from_text(text: &str) -> Vec<RawField> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<RawField> {
    let line = line.trim();
    if line.chars().count() < MIN_LINE_CHARS || has_non_data_prefix(line) {
        return None;
    }

    let caps = SPACED_COLUMNS
        .captures(line)
        .or_else(|| COLON_SEPARATED.captures(line))?;

    let name = clean_test_name(caps.get(1)?.as_str());
    if name.chars().count() < MIN_NAME_CHARS || is_rejected_name(&name) {
        return None;
    }

    let group = |i: usize| caps.get(i).map(|m| m.as_str().trim().to_string()).unwrap_or_default();

    Some(RawField {
        name,
        value: group(2),
        unit: group(3),
        reference_text: group(4),
        status_text: String::new(),
    })
}
