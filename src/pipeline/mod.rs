pub mod extraction;
pub mod normalize;
pub mod processor;

pub use processor::LabReportProcessor;

use std::path::PathBuf;

use thiserror::Error;

use crate::intelligence::BenchmarkError;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text encoding error: {0}")]
    Encoding(String),

    #[error("Benchmark data error: {0}")]
    Benchmark(#[from] BenchmarkError),
}
