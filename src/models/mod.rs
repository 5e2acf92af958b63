pub mod enums;
pub mod lab;
pub mod report;

pub use enums::*;
pub use lab::*;
pub use report::*;
