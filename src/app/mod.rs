pub mod names;
pub mod report;
