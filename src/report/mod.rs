//! Scan-record parsing and report model construction.

pub mod builder;
pub mod catalog;
pub mod grade;

pub use builder::{BuildError, ReportModel, build, domain_from_url};
pub use grade::letter_grade;
