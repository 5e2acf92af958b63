pub mod types;
pub mod sanitize;
pub mod filters;
pub mod columns;
pub mod grid;
pub mod aligned;
pub mod text_pattern;
pub mod header;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use columns::parse_lab_table;
pub use header::extract_patient_info;
pub use text_pattern::extract_from_text;
pub use grid::BorderedTableScanner;
pub use aligned::AlignedTableScanner;
pub use orchestrator::*;
