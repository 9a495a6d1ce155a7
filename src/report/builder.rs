//! Builds the canonical report model out of a raw scan record.
//!
//! Scan records are loosely-typed JSON documents: the four required fields
//! are validated and everything else passes through to the template
//! untouched.

use chrono::DateTime;
use miette::Diagnostic;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use super::{catalog, grade};

pub const REQUIRED_FIELDS: [&str; 4] = ["url", "generatedAt", "overallScore", "overallRating"];

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("scan record is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be an integer between 0 and 100, got `{value}`")]
    InvalidScore { field: String, value: Value },

    #[error("field `modules` must be an object")]
    InvalidModules,
}

/// Canonical render-ready model: the raw record plus derived fields.
#[derive(Debug, Clone)]
pub struct ReportModel {
    doc: Map<String, Value>,
}

impl ReportModel {
    /// Host component of the scanned URL, `www.` prefix stripped.
    pub fn domain(&self) -> &str {
        self.doc
            .get("domain")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The raw `generatedAt` timestamp string.
    pub fn generated_at(&self) -> &str {
        self.doc
            .get("generatedAt")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The full document handed to the template.
    pub fn as_doc(&self) -> &Map<String, Value> {
        &self.doc
    }
}

pub fn build(raw: &Value) -> Result<ReportModel, BuildError> {
    let record = raw.as_object().ok_or(BuildError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if !record.contains_key(field) {
            return Err(BuildError::MissingField(field));
        }
    }

    let overall_score = parse_score(&record["overallScore"], "overallScore")?;

    let mut doc = record.clone();

    doc.insert(
        "overallGrade".into(),
        Value::from(grade::letter_grade(overall_score)),
    );

    let module_grades = grade_modules(record.get("modules"))?;
    annotate_modules(&mut doc, &module_grades);

    let url = record["url"].as_str().unwrap_or_default();
    doc.insert("domain".into(), Value::from(domain_from_url(url)));

    let generated_at = record["generatedAt"].as_str().unwrap_or_default();
    doc.insert(
        "formattedDate".into(),
        Value::from(format_scan_date(generated_at)),
    );

    Ok(ReportModel { doc })
}

fn parse_score(value: &Value, field: &str) -> Result<i64, BuildError> {
    // Numeric strings are tolerated the way upstream scanners emit them.
    let score = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match score {
        Some(score) if (0..=100).contains(&score) => Ok(score),
        _ => Err(BuildError::InvalidScore {
            field: field.to_string(),
            value: value.clone(),
        }),
    }
}

/// Grades every module that carries a `summary.score`, validating the score
/// range along the way. Modules without a score simply get no grade.
fn grade_modules(modules: Option<&Value>) -> Result<Map<String, Value>, BuildError> {
    let mut grades = Map::new();

    let Some(modules) = modules else {
        return Ok(grades);
    };

    let modules = modules.as_object().ok_or(BuildError::InvalidModules)?;

    for (key, module) in modules {
        let score = module.pointer("/summary/score");

        if let Some(score) = score {
            let score = parse_score(score, &format!("modules.{key}.summary.score"))?;
            grades.insert(key.clone(), Value::from(grade::letter_grade(score)));
        }
    }

    Ok(grades)
}

fn annotate_modules(doc: &mut Map<String, Value>, grades: &Map<String, Value>) {
    doc.insert("moduleGrade".into(), Value::Object(grades.clone()));

    let module_keys: Vec<String> = doc
        .get("modules")
        .and_then(Value::as_object)
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    let mut icons = Map::new();
    let mut descriptions = Map::new();

    for key in module_keys {
        icons.insert(key.clone(), Value::from(catalog::icon_for(&key)));
        descriptions.insert(key.clone(), Value::from(catalog::description_for(&key)));
    }

    doc.insert("moduleIcons".into(), Value::Object(icons));
    doc.insert("moduleDescriptions".into(), Value::Object(descriptions));
}

/// Extracts the host from the scanned URL, stripping the scheme, a leading
/// `www.` and any trailing slash.
pub fn domain_from_url(raw: &str) -> String {
    if let Ok(parsed) = Url::parse(raw) {
        if let Some(host) = parsed.host_str() {
            let host = host.strip_prefix("www.").unwrap_or(host);
            return host.to_string();
        }
    }

    // Scheme-less input: trim the prefixes by hand.
    let rest = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    rest.trim_end_matches('/').to_string()
}

/// Renders the scan timestamp for humans. An unparsable timestamp keeps the
/// raw string, it never fails the job.
fn format_scan_date(generated_at: &str) -> String {
    match DateTime::parse_from_rfc3339(generated_at) {
        Ok(date) => date.format("%B %d, %Y").to_string(),
        Err(_) => generated_at.to_string(),
    }
}
