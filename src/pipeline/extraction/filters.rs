//! Row rejection and test-name cleanup shared by every extraction strategy.

use std::sync::LazyLock;

use regex::Regex;

/// Lines and names starting with these words are report furniture, not results.
static NON_DATA_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(page|report|date|time|printed|lab|doctor|address|phone|email|gender|sex|sample|specimen|barcode|accession|ref\s*by|referred|collected|received|reported|technician|pathologist|authorised|authorized|signature|stamp|www|http)",
    )
    .expect("valid regex")
});

/// Separator rows drawn with dashes, stars, underscores or box rules.
static DECORATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\-*=_\s─━═]+$").expect("valid regex"));

static LEADING_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[.)]\s*").expect("valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Column-title words that show up as names when a header row repeats.
const HEADER_WORDS: &[&str] = &["test", "parameter", "investigation", "total"];

pub fn has_non_data_prefix(text: &str) -> bool {
    NON_DATA_PREFIX.is_match(text)
}

/// True when a candidate test name cannot be a result row.
pub fn is_rejected_name(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || name.chars().count() < 2 {
        return true;
    }
    if has_non_data_prefix(name) {
        return true;
    }
    let lower = name.to_lowercase();
    if HEADER_WORDS.contains(&lower.as_str()) {
        return true;
    }
    DECORATIVE.is_match(name)
}

/// Strip leading "1." / "1)" markers, collapse whitespace runs, trim.
pub fn clean_test_name(name: &str) -> String {
    let mut current = name.trim();
    while let Some(m) = LEADING_ORDINAL.find(current) {
        current = current[m.end()..].trim_start();
    }
    WHITESPACE_RUN.replace_all(current, " ").trim().to_string()
}
