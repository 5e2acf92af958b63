pub mod config;
pub mod models;
pub mod pipeline;
pub mod intelligence; // Benchmark resolution, classification, aggregation
pub mod handoff; // Summary, audio and alert collaborators

use std::path::Path;

use tracing_subscriber::EnvFilter;

pub use config::Settings;
pub use intelligence::BenchmarkStore;
pub use models::{LabAnalysis, LabStatus, Language, PipelineResult};
pub use pipeline::extraction::Document;
pub use pipeline::{LabError, LabReportProcessor};

/// Install the fmt subscriber. RUST_LOG overrides the crate default filter.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Analyze a text export using the benchmarks and language selected by the
/// environment.
pub fn analyze_report(path: &Path) -> Result<LabAnalysis, LabError> {
    analyze_report_with(&Settings::from_env(), path)
}

pub fn analyze_report_with(settings: &Settings, path: &Path) -> Result<LabAnalysis, LabError> {
    let store = settings.load_benchmarks()?;
    tracing::info!(
        version = config::APP_VERSION,
        benchmarks = store.len(),
        language = %settings.language,
        "{} analyzing report",
        config::APP_NAME
    );
    LabReportProcessor::with_store(&store)
        .with_language(settings.language)
        .process_file(path)
}
