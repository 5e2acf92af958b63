//! Patient demographics and lab identity from the first page of a report.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::PatientInfo;

static NAME_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Patient\s*Name|Name)\s*[:\-]?\s*([A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+){1,3})")
        .expect("valid regex")
});

static NAME_TITLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Mr\.|Mrs\.|Ms\.|Dr\.)\s*([A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+){1,3})")
        .expect("valid regex")
});

static AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bAge\s*[:\-]?\s*([0-9]{1,3})\s*(?:Yrs?\.?|Years?)?").expect("valid regex")
});

static GENDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Sex|Gender)\s*[:\-]?\s*(Male|Female|M|F)\b").expect("valid regex")
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:Date|Collected|Reported)\s*[:\-]?\s*([0-9]{1,2}[/\-.][0-9]{1,2}[/\-.][0-9]{2,4})",
    )
    .expect("valid regex")
});

/// Lab chains recognized by name anywhere on the first page. Order matters.
const KNOWN_LABS: &[&str] = &[
    "Apollo",
    "SRL",
    "Thyrocare",
    "Metropolis",
    "LIMS",
    "Dr Lal",
    "Vijaya",
    "CARE",
];

/// Read header metadata. Fields that are not found stay "Unknown".
pub fn extract_patient_info(text: &str) -> PatientInfo {
    let mut info = PatientInfo::default();

    if let Some(name) = [&*NAME_LABELED, &*NAME_TITLED]
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
    {
        info.name = name.as_str().trim().to_string();
    }

    if let Some(age) = AGE.captures(text).and_then(|c| c.get(1)) {
        info.age = age.as_str().to_string();
    }

    if let Some(gender) = GENDER.captures(text).and_then(|c| c.get(1)) {
        let g = gender.as_str().to_uppercase();
        info.gender = if g == "M" || g == "MALE" { "Male" } else { "Female" }.to_string();
    }

    if let Some(date) = DATE.captures(text).and_then(|c| c.get(1)) {
        info.date = date.as_str().to_string();
    }

    let lower = text.to_lowercase();
    if let Some(lab) = KNOWN_LABS.iter().find(|lab| lower.contains(&lab.to_lowercase())) {
        info.lab_name = (*lab).to_string();
    }

    info
}
