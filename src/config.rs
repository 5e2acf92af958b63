use std::path::PathBuf;

use crate::intelligence::{BenchmarkError, BenchmarkStore};
use crate::models::Language;

/// Application-level constants
pub const APP_NAME: &str = "LabTriage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path to a JSON benchmark file replacing the built-in corpus.
pub const BENCHMARKS_ENV: &str = "LABTRIAGE_BENCHMARKS";
/// Default summary language name (English, Telugu, Hindi).
pub const LANGUAGE_ENV: &str = "LABTRIAGE_LANGUAGE";

const BENCHMARKS_FILE: &str = "benchmarks.json";

/// Get the application data directory: ~/LabTriage/.
/// Falls back to the working directory when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Log filter used when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "labtriage=info"
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub benchmarks_path: Option<PathBuf>,
    pub language: Language,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let benchmarks_path = lookup(BENCHMARKS_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                let candidate = app_data_dir().join(BENCHMARKS_FILE);
                candidate.is_file().then_some(candidate)
            });

        let language = lookup(LANGUAGE_ENV)
            .map(|v| Language::from_name_or_default(&v))
            .unwrap_or_default();

        Self {
            benchmarks_path,
            language,
        }
    }

    /// The configured benchmark file, or a copy of the built-in corpus.
    pub fn load_benchmarks(&self) -> Result<BenchmarkStore, BenchmarkError> {
        match &self.benchmarks_path {
            Some(path) => BenchmarkStore::load(path),
            None => Ok(BenchmarkStore::global().clone()),
        }
    }
}
