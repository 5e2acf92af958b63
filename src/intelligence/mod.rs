pub mod aggregate;
pub mod benchmarks;
pub mod classify;
pub mod resolver;
pub mod types;

pub use aggregate::aggregate;
pub use benchmarks::BenchmarkStore;
pub use classify::{classify, classify_field, classify_value, deviation_pct};
pub use types::*;
