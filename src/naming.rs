//! Deterministic artifact naming.
//!
//! Identical (domain, date) pairs always map to the same filename, so
//! re-running a report overwrites the previous artifact instead of stacking
//! versions next to it.

use chrono::{DateTime, Local};

/// `<domain-with-dots-as-hyphens>_<YYYY-MM-DD>_<suffix>.<ext>`
///
/// The date comes from the scan's `generatedAt` timestamp when it parses;
/// otherwise the current processing date is used, so naming never fails.
pub fn artifact_name(domain: &str, generated_at: &str, suffix: &str, extension: &str) -> String {
    let date = match DateTime::parse_from_rfc3339(generated_at) {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => Local::now().format("%Y-%m-%d").to_string(),
    };

    format!("{}_{}_{}.{}", domain.replace('.', "-"), date, suffix, extension)
}
