//! Clinical reference ranges and lookup by test name.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::LazyLock;

use crate::models::{BenchmarkRange, GenderScope};

use super::resolver::{rank, tokens};
use super::types::{BenchmarkError, BenchmarkMatch};

static BUILTIN: LazyLock<BenchmarkStore> = LazyLock::new(BenchmarkStore::builtin);

/// Immutable benchmark corpus with pre-tokenized names.
#[derive(Debug, Clone)]
pub struct BenchmarkStore {
    ranges: Vec<BenchmarkRange>,
    keys: Vec<Vec<String>>,
}

impl BenchmarkStore {
    /// Build a store, rejecting an empty corpus or any entry with `min > max`.
    pub fn from_ranges(ranges: Vec<BenchmarkRange>) -> Result<Self, BenchmarkError> {
        if ranges.is_empty() {
            return Err(BenchmarkError::Empty);
        }
        if let Some(bad) = ranges
            .iter()
            .find(|r| !matches!(r.min.partial_cmp(&r.max), Some(Ordering::Less | Ordering::Equal)))
        {
            return Err(BenchmarkError::InvalidRange {
                test_name: bad.test_name.clone(),
                min: bad.min,
                max: bad.max,
            });
        }
        Ok(Self::indexed(ranges))
    }

    fn indexed(ranges: Vec<BenchmarkRange>) -> Self {
        let keys = ranges.iter().map(|r| tokens(&r.test_name)).collect();
        Self { ranges, keys }
    }

    /// Parse a JSON array of ranges.
    pub fn from_json(source: &str, json: &str) -> Result<Self, BenchmarkError> {
        let ranges: Vec<BenchmarkRange> = serde_json::from_str(json)
            .map_err(|e| BenchmarkError::Parse(source.to_string(), e.to_string()))?;
        Self::from_ranges(ranges)
    }

    /// Load a JSON benchmark file replacing the built-in corpus.
    pub fn load(path: &Path) -> Result<Self, BenchmarkError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| BenchmarkError::Load(path.display().to_string(), e.to_string()))?;
        let store = Self::from_json(&path.display().to_string(), &json)?;
        tracing::info!(path = %path.display(), entries = store.len(), "Benchmark file loaded");
        Ok(store)
    }

    /// The built-in corpus, shared for the process lifetime.
    pub fn global() -> &'static BenchmarkStore {
        &BUILTIN
    }

    /// Reference ranges for common CBC, liver, kidney, glucose, lipid and
    /// thyroid tests. Gender-specific entries list the male range first.
    pub fn builtin() -> Self {
        use GenderScope::{All, Female, Male};

        Self::indexed(vec![
            // CBC
            range(
                "Hemoglobin",
                13.0,
                17.0,
                "g/dL",
                Male,
                "Oxygen-carrying protein in red blood cells. Low values indicate anemia.",
            ),
            range(
                "Hemoglobin",
                12.0,
                15.5,
                "g/dL",
                Female,
                "Oxygen-carrying protein in red blood cells. Low values indicate anemia.",
            ),
            range(
                "WBC",
                4.5,
                11.0,
                "10³/µL",
                All,
                "White blood cells fight infection. High values may indicate infection or inflammation.",
            ),
            range(
                "Platelets",
                150.0,
                400.0,
                "10³/µL",
                All,
                "Clotting cells. Low values increase bleeding risk; high values may indicate clotting risk.",
            ),
            range(
                "RBC",
                4.5,
                5.5,
                "10⁶/µL",
                Male,
                "Red blood cells carry oxygen throughout the body.",
            ),
            range(
                "RBC",
                4.0,
                5.0,
                "10⁶/µL",
                Female,
                "Red blood cells carry oxygen throughout the body.",
            ),
            range(
                "Hematocrit",
                40.0,
                52.0,
                "%",
                Male,
                "Percentage of blood volume made up of red blood cells.",
            ),
            range(
                "Hematocrit",
                36.0,
                48.0,
                "%",
                Female,
                "Percentage of blood volume made up of red blood cells.",
            ),
            range(
                "MCV",
                80.0,
                100.0,
                "fL",
                All,
                "Mean corpuscular volume, the average size of red blood cells.",
            ),
            // Liver
            range(
                "SGPT",
                7.0,
                40.0,
                "U/L",
                All,
                "ALT liver enzyme. Elevated levels indicate liver cell damage.",
            ),
            range(
                "ALT",
                7.0,
                40.0,
                "U/L",
                All,
                "Alanine aminotransferase, a liver enzyme. High values suggest liver damage.",
            ),
            range(
                "SGOT",
                10.0,
                40.0,
                "U/L",
                All,
                "AST enzyme found in liver and heart. Elevated in liver disease or heart attack.",
            ),
            range(
                "AST",
                10.0,
                40.0,
                "U/L",
                All,
                "Aspartate aminotransferase. Elevated in liver disease or heart attack.",
            ),
            range(
                "Bilirubin Total",
                0.2,
                1.2,
                "mg/dL",
                All,
                "Waste product from red blood cell breakdown. High levels cause jaundice.",
            ),
            // Kidney
            range(
                "Creatinine",
                0.7,
                1.3,
                "mg/dL",
                Male,
                "Kidney waste marker. Elevated values indicate reduced kidney function.",
            ),
            range(
                "Creatinine",
                0.5,
                1.1,
                "mg/dL",
                Female,
                "Kidney waste marker. Elevated values indicate reduced kidney function.",
            ),
            range(
                "Blood Urea Nitrogen",
                7.0,
                20.0,
                "mg/dL",
                All,
                "Kidney function marker. High values may indicate kidney disease or dehydration.",
            ),
            range(
                "BUN",
                7.0,
                20.0,
                "mg/dL",
                All,
                "Blood urea nitrogen, a kidney function indicator.",
            ),
            range(
                "Uric Acid",
                3.5,
                7.2,
                "mg/dL",
                Male,
                "High levels can cause gout. Low levels are rare but may indicate kidney issues.",
            ),
            // Glucose
            range(
                "Fasting Blood Glucose",
                70.0,
                100.0,
                "mg/dL",
                All,
                "Blood sugar after fasting. 100 to 125 is pre-diabetic; above 126 is diabetic range.",
            ),
            range(
                "Blood Glucose Fasting",
                70.0,
                100.0,
                "mg/dL",
                All,
                "Fasting blood sugar level.",
            ),
            range(
                "HbA1c",
                4.0,
                5.7,
                "%",
                All,
                "3-month average blood sugar. 5.7 to 6.4% is pre-diabetic; 6.5%+ indicates diabetes.",
            ),
            range(
                "Post Prandial Glucose",
                70.0,
                140.0,
                "mg/dL",
                All,
                "Blood sugar 2 hours after eating.",
            ),
            // Lipids
            range(
                "Total Cholesterol",
                0.0,
                200.0,
                "mg/dL",
                All,
                "Overall cholesterol. Above 240 is high risk for heart disease.",
            ),
            range(
                "LDL Cholesterol",
                0.0,
                100.0,
                "mg/dL",
                All,
                "Bad cholesterol. High LDL increases heart disease risk.",
            ),
            range(
                "HDL Cholesterol",
                40.0,
                60.0,
                "mg/dL",
                Male,
                "Good cholesterol. Higher HDL is protective against heart disease.",
            ),
            range(
                "Triglycerides",
                0.0,
                150.0,
                "mg/dL",
                All,
                "Blood fats. High levels increase heart disease and pancreatitis risk.",
            ),
            // Thyroid
            range(
                "TSH",
                0.4,
                4.0,
                "µIU/mL",
                All,
                "Thyroid-stimulating hormone. Low TSH means overactive thyroid; high TSH means underactive thyroid.",
            ),
            range(
                "T3",
                80.0,
                200.0,
                "ng/dL",
                All,
                "Triiodothyronine, the active thyroid hormone affecting metabolism.",
            ),
            range(
                "T4",
                5.0,
                12.0,
                "µg/dL",
                All,
                "Thyroxine, the main thyroid hormone controlling metabolism.",
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[BenchmarkRange] {
        &self.ranges
    }

    /// Candidate ranges for a test name, best first. May be empty.
    pub fn resolve(&self, test_name: &str) -> Vec<BenchmarkMatch> {
        rank(test_name, self.keys.iter().map(Vec::as_slice))
            .into_iter()
            .map(|(idx, score)| BenchmarkMatch {
                range: self.ranges[idx].clone(),
                score,
            })
            .collect()
    }

    pub fn best_match(&self, test_name: &str) -> Option<BenchmarkMatch> {
        self.resolve(test_name).into_iter().next()
    }
}

fn range(
    test: &str,
    min: f64,
    max: f64,
    unit: &str,
    gender_scope: GenderScope,
    description: &str,
) -> BenchmarkRange {
    BenchmarkRange {
        test_name: test.to_string(),
        min,
        max,
        unit: unit.to_string(),
        gender_scope,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_corpus_shape() {
        let store = BenchmarkStore::builtin();
        assert_eq!(store.len(), 30);
        assert!(store.ranges().iter().all(|r| r.min <= r.max));
        assert!(BenchmarkStore::from_ranges(store.ranges().to_vec()).is_ok());
    }

    #[test]
    fn global_is_builtin() {
        assert_eq!(BenchmarkStore::global().len(), 30);
    }

    #[test]
    fn exact_name_resolves() {
        let m = BenchmarkStore::global().best_match("TSH").unwrap();
        assert_eq!(m.range.test_name, "TSH");
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn gender_duplicates_resolve_to_male_first() {
        let matches = BenchmarkStore::global().resolve("Hemoglobin");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].range.gender_scope, GenderScope::Male);
        assert_eq!(matches[0].range.min, 13.0);
        assert_eq!(matches[1].range.gender_scope, GenderScope::Female);
    }

    #[test]
    fn noisy_names_resolve() {
        let store = BenchmarkStore::global();
        assert_eq!(store.best_match("Platelet Count").unwrap().range.test_name, "Platelets");
        assert_eq!(store.best_match("Haemoglobin").unwrap().range.test_name, "Hemoglobin");
        assert_eq!(store.best_match("Total Bilirubin").unwrap().range.test_name, "Bilirubin Total");
        assert_eq!(store.best_match("SGPT/ALT").unwrap().range.test_name, "SGPT");
    }

    #[test]
    fn unrelated_name_unresolved() {
        let store = BenchmarkStore::global();
        assert!(store.resolve("Vitamin D3").is_empty());
        assert!(store.best_match("ESR").is_none());
        assert!(store.best_match("MCH").is_none());
    }

    #[test]
    fn resolve_scores_descend() {
        let matches = BenchmarkStore::global().resolve("Cholesterol");
        assert!(!matches.is_empty());
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(matches.iter().all(|m| m.range.test_name.ends_with("Cholesterol")));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut ranges = BenchmarkStore::builtin().ranges().to_vec();
        ranges[3].min = 500.0;
        let err = BenchmarkStore::from_ranges(ranges).unwrap_err();
        assert!(matches!(
            err,
            BenchmarkError::InvalidRange { ref test_name, .. } if test_name == "Platelets"
        ));
    }

    #[test]
    fn rejects_empty_corpus() {
        assert!(matches!(BenchmarkStore::from_ranges(vec![]), Err(BenchmarkError::Empty)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"test_name": "Ferritin", "min": 30, "max": 400,
                 "unit": "ng/mL", "gender_scope": "male"}}]"#
        )
        .unwrap();

        let store = BenchmarkStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 1);
        let m = store.best_match("Serum Ferritin").unwrap();
        assert_eq!(m.range.max, 400.0);
        assert_eq!(m.range.gender_scope, GenderScope::Male);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BenchmarkStore::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, BenchmarkError::Load(..)));
    }

    #[test]
    fn load_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = BenchmarkStore::load(file.path()).unwrap_err();
        assert!(matches!(err, BenchmarkError::Parse(..)));
    }
}
