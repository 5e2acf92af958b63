use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::BenchmarkRange;

/// A benchmark candidate for a test name, scored by name similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMatch {
    pub range: BenchmarkRange,
    /// Similarity in [0, 1]; 1.0 for an exact name match.
    pub score: f64,
}

#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("Failed to load benchmark file {0}: {1}")]
    Load(String, String),

    #[error("Failed to parse benchmark data {0}: {1}")]
    Parse(String, String),

    #[error("Invalid range for {test_name}: min {min} > max {max}")]
    InvalidRange { test_name: String, min: f64, max: f64 },

    #[error("Benchmark corpus is empty")]
    Empty,
}
